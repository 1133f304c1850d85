//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Upstream feed settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Destination channel settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Message decoration and display limits
    #[serde(default)]
    pub message: MessageConfig,

    /// HTTP and pacing behavior
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Overlay values taken from environment-style lookups.
    ///
    /// Recognised keys: `FEED_URL`, `BOT_TOKEN`, `DEST_CHANNEL`, `FOLLOW_LINE`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("FEED_URL") {
            self.feed.url = url;
        }
        if let Some(token) = lookup("BOT_TOKEN") {
            self.telegram.bot_token = token;
        }
        if let Some(channel) = lookup("DEST_CHANNEL") {
            self.telegram.channel = channel;
        }
        if let Some(line) = lookup("FOLLOW_LINE") {
            self.message.follow_line = line;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.feed.url.trim().is_empty() {
            return Err(AppError::validation("feed.url is empty"));
        }
        url::Url::parse(&self.feed.url)?;
        url::Url::parse(&self.telegram.api_base)?;
        if self.telegram.bot_token.trim().is_empty() {
            return Err(AppError::validation("telegram.bot_token is empty"));
        }
        if self.telegram.channel.trim().is_empty() {
            return Err(AppError::validation("telegram.channel is empty"));
        }
        if self.message.text_limit == 0 || self.message.caption_limit == 0 {
            return Err(AppError::validation("message limits must be > 0"));
        }
        if self.message.document_filename.trim().is_empty() {
            return Err(AppError::validation("message.document_filename is empty"));
        }
        if self.delivery.user_agent.trim().is_empty() {
            return Err(AppError::validation("delivery.user_agent is empty"));
        }
        let timeouts = [
            self.delivery.feed_timeout_secs,
            self.delivery.image_timeout_secs,
            self.delivery.document_timeout_secs,
            self.delivery.send_timeout_secs,
            self.delivery.connect_timeout_secs,
        ];
        if timeouts.contains(&0) {
            return Err(AppError::validation("delivery timeouts must be > 0"));
        }
        Ok(())
    }
}

/// Upstream feed settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedConfig {
    /// RSS feed URL
    #[serde(default)]
    pub url: String,
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,

    /// Destination chat id or `@channel` username
    #[serde(default)]
    pub channel: String,

    #[serde(default = "defaults::api_base")]
    pub api_base: String,

    #[serde(default = "defaults::enabled")]
    pub disable_web_page_preview: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            channel: String::new(),
            api_base: defaults::api_base(),
            disable_web_page_preview: defaults::enabled(),
        }
    }
}

/// Message decoration and display limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    #[serde(default = "defaults::header")]
    pub header: String,

    #[serde(default = "defaults::separator")]
    pub separator: String,

    #[serde(default = "defaults::follow_line")]
    pub follow_line: String,

    /// Maximum characters of a plain text message
    #[serde(default = "defaults::text_limit")]
    pub text_limit: usize,

    /// Maximum characters of a photo or document caption
    #[serde(default = "defaults::caption_limit")]
    pub caption_limit: usize,

    /// File name used when sending sanitized documents
    #[serde(default = "defaults::document_filename")]
    pub document_filename: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            header: defaults::header(),
            separator: defaults::separator(),
            follow_line: defaults::follow_line(),
            text_limit: defaults::text_limit(),
            caption_limit: defaults::caption_limit(),
            document_filename: defaults::document_filename(),
        }
    }
}

/// What to do with an item whose document cannot be sanitized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFailurePolicy {
    /// Log the failure and continue with the next item
    #[default]
    Skip,
    /// Abort the run without touching the checkpoint
    Abort,
}

/// HTTP client and pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Pause between delivered items in milliseconds
    #[serde(default = "defaults::delay_ms")]
    pub delay_ms: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    #[serde(default = "defaults::feed_timeout")]
    pub feed_timeout_secs: u64,

    #[serde(default = "defaults::image_timeout")]
    pub image_timeout_secs: u64,

    #[serde(default = "defaults::document_timeout")]
    pub document_timeout_secs: u64,

    /// Timeout for plain text sends
    #[serde(default = "defaults::send_timeout")]
    pub send_timeout_secs: u64,

    /// TCP/TLS connect timeout shared by every request
    #[serde(default = "defaults::connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default)]
    pub on_document_error: DocumentFailurePolicy,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            delay_ms: defaults::delay_ms(),
            user_agent: defaults::user_agent(),
            feed_timeout_secs: defaults::feed_timeout(),
            image_timeout_secs: defaults::image_timeout(),
            document_timeout_secs: defaults::document_timeout(),
            send_timeout_secs: defaults::send_timeout(),
            connect_timeout_secs: defaults::connect_timeout(),
            on_document_error: DocumentFailurePolicy::default(),
        }
    }
}

mod defaults {
    pub fn api_base() -> String {
        "https://api.telegram.org".into()
    }
    pub fn enabled() -> bool {
        true
    }

    // Message defaults
    pub fn header() -> String {
        "🔥 New Update".into()
    }
    pub fn separator() -> String {
        "━━━━━━━━━━━━━━".into()
    }
    pub fn follow_line() -> String {
        "📢 Follow @topgkguru".into()
    }
    pub fn text_limit() -> usize {
        3900
    }
    pub fn caption_limit() -> usize {
        900
    }
    pub fn document_filename() -> String {
        "document.pdf".into()
    }

    // Delivery defaults
    pub fn delay_ms() -> u64 {
        1000
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; feedmirror/0.1)".into()
    }
    pub fn feed_timeout() -> u64 {
        90
    }
    pub fn image_timeout() -> u64 {
        180
    }
    pub fn document_timeout() -> u64 {
        300
    }
    pub fn send_timeout() -> u64 {
        60
    }
    pub fn connect_timeout() -> u64 {
        30
    }
}
