// src/models/item.rs

//! Feed item data structures.

use serde::{Deserialize, Serialize};

/// How an attachment should be delivered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Pdf,
}

impl MediaKind {
    /// Classify a MIME type string. Unknown types yield `None`.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let ctype = content_type.trim().to_ascii_lowercase();
        if ctype.starts_with("image/") {
            Some(Self::Image)
        } else if ctype == "application/pdf" {
            Some(Self::Pdf)
        } else {
            None
        }
    }
}

/// Enclosure declared by the feed for one item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    /// Resource URL
    pub url: String,

    /// Declared MIME type, if the enclosure carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl Attachment {
    pub fn kind(&self) -> Option<MediaKind> {
        self.content_type
            .as_deref()
            .and_then(MediaKind::from_content_type)
    }
}

/// Fields pulled out of one `<item>` record after cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedItem {
    /// Title after markup stripping and prefix removal, before link removal
    pub raw_title: String,

    /// Title after full cleanup
    pub title: String,

    /// Description after full cleanup
    pub description: String,

    /// `guid`, or `link` when the guid is absent
    pub identifier: String,

    pub attachment: Option<Attachment>,
}

/// A canonical, forwardable item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedItem {
    /// Stable key used for checkpointing
    pub identifier: String,

    /// Plain-text body (no URLs, markup, or CDATA markers)
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_kind: Option<MediaKind>,
}

impl FeedItem {
    /// Build a feed item from extracted fields and a merged body.
    pub fn new(
        identifier: impl Into<String>,
        text: impl Into<String>,
        attachment: Option<Attachment>,
    ) -> Self {
        let media_kind = attachment.as_ref().and_then(Attachment::kind);
        Self {
            identifier: identifier.into(),
            text: text.into(),
            media_url: attachment.map(|a| a.url),
            media_kind,
        }
    }

    /// Media URL paired with its kind, when both are known.
    pub fn media(&self) -> Option<(&str, MediaKind)> {
        match (&self.media_url, self.media_kind) {
            (Some(url), Some(kind)) => Some((url.as_str(), kind)),
            _ => None,
        }
    }
}
