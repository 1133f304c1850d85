//! Utility functions and helpers.
//!
//! - `markup`: entity decoding and tag stripping
//! - `links`: URL removal
//! - `truncation`: trailing `[...]` / `…` detection and normalization
//! - `text`: grapheme-safe display truncation

pub mod http;
pub mod links;
pub mod markup;
pub mod text;
pub mod truncation;

pub use links::remove_links;
pub use markup::{collapse_blank_lines, strip_tags, unwrap_cdata};
pub use text::truncate_graphemes;
pub use truncation::{collapse_whitespace, is_truncated, normalize};
