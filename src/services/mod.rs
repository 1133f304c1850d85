//! Service layer for the forwarder.
//!
//! This module contains the business logic for:
//! - Item extraction from raw feed markup (`ItemExtractor`)
//! - Title/description merging (`ContentMerger`)
//! - PDF link sanitization (`DocumentSanitizer`)
//! - Feed and media download (`Fetcher`)
//! - Message delivery (`Channel`, `TelegramChannel`)

mod extractor;
mod fetcher;
mod merger;
mod sanitizer;
mod telegram;

pub use extractor::ItemExtractor;
pub use fetcher::{Fetcher, HttpFetcher};
pub use merger::ContentMerger;
pub use sanitizer::{DocumentSanitizer, SanitizeReport};
pub use telegram::{Channel, TelegramChannel};
