// src/services/telegram.rs

//! Telegram Bot API delivery channel.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::utils::truncate_graphemes;

/// Destination for forwarded messages.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Send a plain text message.
    async fn send_text(&self, text: &str) -> Result<()>;

    /// Send an image with a caption.
    async fn send_photo(&self, photo: Vec<u8>, caption: &str) -> Result<()>;

    /// Send a PDF document with a file name and caption.
    async fn send_document(&self, document: Vec<u8>, filename: &str, caption: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// `Channel` posting to a Telegram chat through the Bot API.
#[derive(Debug, Clone)]
pub struct TelegramChannel {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
    disable_web_page_preview: bool,
    text_limit: usize,
    caption_limit: usize,
    send_timeout: Duration,
    photo_timeout: Duration,
    document_timeout: Duration,
}

impl TelegramChannel {
    /// Create a channel from application configuration.
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_base: config.telegram.api_base.trim_end_matches('/').to_string(),
            bot_token: config.telegram.bot_token.clone(),
            chat_id: config.telegram.channel.clone(),
            disable_web_page_preview: config.telegram.disable_web_page_preview,
            text_limit: config.message.text_limit,
            caption_limit: config.message.caption_limit,
            send_timeout: Duration::from_secs(config.delivery.send_timeout_secs),
            photo_timeout: Duration::from_secs(config.delivery.image_timeout_secs),
            document_timeout: Duration::from_secs(config.delivery.document_timeout_secs),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.bot_token, method)
    }

    fn text_payload(&self, text: &str) -> serde_json::Value {
        json!({
            "chat_id": self.chat_id,
            "text": truncate_graphemes(text, self.text_limit),
            "disable_web_page_preview": self.disable_web_page_preview,
        })
    }

    fn caption<'a>(&self, caption: &'a str) -> &'a str {
        truncate_graphemes(caption, self.caption_limit)
    }

    /// Check HTTP status and the API's `ok` flag.
    async fn check(method: &str, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        let body = response.text().await?;
        let parsed: Option<ApiResponse> = serde_json::from_str(&body).ok();

        match parsed {
            Some(api) if status.is_success() && api.ok => Ok(()),
            Some(api) => Err(AppError::delivery(
                method,
                api.description.unwrap_or_else(|| status.to_string()),
            )),
            None if status.is_success() => Err(AppError::delivery(
                method,
                format!("unexpected response body: {}", body.trim()),
            )),
            None => Err(AppError::delivery(method, status)),
        }
    }
}

#[async_trait]
impl Channel for TelegramChannel {
    async fn send_text(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .timeout(self.send_timeout)
            .json(&self.text_payload(text))
            .send()
            .await?;
        Self::check("sendMessage", response).await
    }

    async fn send_photo(&self, photo: Vec<u8>, caption: &str) -> Result<()> {
        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", self.caption(caption).to_string())
            .part("photo", Part::bytes(photo).file_name("image.jpg"));

        let response = self
            .client
            .post(self.method_url("sendPhoto"))
            .timeout(self.photo_timeout)
            .multipart(form)
            .send()
            .await?;
        Self::check("sendPhoto", response).await
    }

    async fn send_document(&self, document: Vec<u8>, filename: &str, caption: &str) -> Result<()> {
        let part = Part::bytes(document)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", self.caption(caption).to_string())
            .part("document", part);

        let response = self
            .client
            .post(self.method_url("sendDocument"))
            .timeout(self.document_timeout)
            .multipart(form)
            .send()
            .await?;
        Self::check("sendDocument", response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> TelegramChannel {
        let mut config = Config::default();
        config.telegram.api_base = "https://api.telegram.org/".to_string();
        config.telegram.bot_token = "123:abc".to_string();
        config.telegram.channel = "@mirror".to_string();
        config.message.text_limit = 5;
        config.message.caption_limit = 3;
        TelegramChannel::new(Client::new(), &config)
    }

    #[test]
    fn test_method_url() {
        assert_eq!(
            channel().method_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_text_payload_truncates_and_disables_preview() {
        let payload = channel().text_payload("hello world");
        assert_eq!(payload["chat_id"], "@mirror");
        assert_eq!(payload["text"], "hello");
        assert_eq!(payload["disable_web_page_preview"], true);
    }

    #[test]
    fn test_caption_limit() {
        assert_eq!(channel().caption("🔥 New"), "🔥 N");
    }

    #[test]
    fn test_api_response_parsing() {
        let api: ApiResponse =
            serde_json::from_str(r#"{"ok":false,"error_code":400,"description":"Bad Request"}"#)
                .unwrap();
        assert!(!api.ok);
        assert_eq!(api.description.as_deref(), Some("Bad Request"));
    }
}
