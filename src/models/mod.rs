// src/models/mod.rs

//! Domain models for the forwarder.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod checkpoint;
mod config;
mod item;

// Re-export all public types
pub use checkpoint::{Checkpoint, RunSummary};
pub use config::{
    Config, DeliveryConfig, DocumentFailurePolicy, FeedConfig, MessageConfig, TelegramConfig,
};
pub use item::{Attachment, ExtractedItem, FeedItem, MediaKind};
