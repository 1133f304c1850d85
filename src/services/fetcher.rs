// src/services/fetcher.rs

//! Feed and media download.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;

/// Source of feed text and attachment bytes.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Download a resource as text.
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String>;

    /// Download a resource as raw bytes.
    async fn fetch_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>>;
}

/// `Fetcher` backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String> {
        log::debug!("GET {}", url);
        let text = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }

    async fn fetch_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>> {
        log::debug!("GET {} (binary)", url);
        let bytes = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}
