// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::Result;
use crate::models::DeliveryConfig;

/// Create a configured asynchronous HTTP client.
///
/// Only the connect timeout is client-wide; requests set their own total timeout.
pub fn create_async_client(config: &DeliveryConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_with_defaults() {
        let config = DeliveryConfig {
            connect_timeout_secs: 5,
            ..DeliveryConfig::default()
        };
        assert!(create_async_client(&config).is_ok());
    }
}
