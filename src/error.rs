// src/error.rs

//! Unified error handling for the forwarder.

use std::fmt;

use thiserror::Error;

/// Result type alias for forwarder operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Document could not be parsed or re-serialized
    #[error("Document error: {0}")]
    Document(#[from] lopdf::Error),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Fetched body is not an RSS document
    #[error("Feed error: {0}")]
    Feed(String),

    /// The delivery channel rejected a call
    #[error("Delivery error in {method}: {message}")]
    Delivery { method: String, message: String },
}

impl AppError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a feed error.
    pub fn feed(message: impl Into<String>) -> Self {
        Self::Feed(message.into())
    }

    /// Create a delivery error for a channel method.
    pub fn delivery(method: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Delivery {
            method: method.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error came from document parsing or serialization.
    pub fn is_document(&self) -> bool {
        matches!(self, Self::Document(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_display() {
        let err = AppError::delivery("sendPhoto", "Bad Request: wrong file");
        assert_eq!(
            err.to_string(),
            "Delivery error in sendPhoto: Bad Request: wrong file"
        );
    }

    #[test]
    fn test_is_document() {
        assert!(!AppError::feed("empty").is_document());
        let err = lopdf::Document::load_mem(b"not a pdf")
            .map(|_| ())
            .map_err(AppError::from)
            .unwrap_err();
        assert!(err.is_document());
    }
}
