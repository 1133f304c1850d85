// src/services/extractor.rs

//! Item extraction service.
//!
//! Splits raw feed text into `<item>` records and pulls the title,
//! description, identifier and enclosure out of each one with tag-scanning
//! regexes. Malformed or missing fields default to empty.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Attachment, ExtractedItem, FeedItem};
use crate::services::ContentMerger;
use crate::utils::{remove_links, strip_tags, unwrap_cdata};

static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<item(?:\s[^>]*)?>(.*?)</item>").expect("valid item regex"));
static ENCLOSURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<enclosure\b([^>]*)>").expect("valid enclosure regex"));
static TITLE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\[(?:Photo|Media)\]\s*").expect("valid prefix regex"));
static DESC_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[Photo\]\s*").expect("valid prefix regex"));
static FEED_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?:rss|channel|item)\b").expect("valid feed regex"));

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("title"));
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("description"));
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("link"));
static GUID_RE: LazyLock<Regex> = LazyLock::new(|| tag_regex("guid"));
static URL_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| attribute_regex("url"));
static TYPE_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| attribute_regex("type"));

fn tag_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"(?s)<{tag}(?:\s[^>]*)?>(.*?)</{tag}>")).expect("valid tag regex")
}

fn attribute_regex(name: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)(?:^|\s){name}\s*=\s*(?:"([^"]*)"|'([^']*)')"#
    ))
    .expect("valid attribute regex")
}

/// Service turning raw feed markup into canonical feed items.
#[derive(Debug, Clone, Default)]
pub struct ItemExtractor {
    merger: ContentMerger,
}

impl ItemExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the body looks like an RSS document at all.
    ///
    /// A channel with no items still counts; an HTML error page does not.
    pub fn is_feed_document(&self, xml: &str) -> bool {
        FEED_MARKER_RE.is_match(xml)
    }

    /// Parse every `<item>` in document order.
    pub fn parse_feed(&self, xml: &str) -> Vec<FeedItem> {
        ITEM_RE
            .captures_iter(xml)
            .filter_map(|caps| caps.get(1))
            .map(|m| self.parse_item(m.as_str()))
            .collect()
    }

    /// Turn one raw `<item>` body into a canonical feed item.
    pub fn parse_item(&self, item_xml: &str) -> FeedItem {
        let extracted = self.extract(item_xml);
        if extracted.identifier.is_empty() {
            log::warn!("Feed item has neither guid nor link; it cannot be checkpointed");
        }

        let text = self.merger.merge_extracted(&extracted);
        FeedItem::new(extracted.identifier, text, extracted.attachment)
    }

    /// Extract and clean the individual fields of one `<item>` body.
    pub fn extract(&self, item_xml: &str) -> ExtractedItem {
        let title_raw = unwrap_cdata(&pick(item_xml, &TITLE_RE));
        let desc_raw = unwrap_cdata(&pick(item_xml, &DESCRIPTION_RE));
        let link = pick(item_xml, &LINK_RE);
        let guid = pick(item_xml, &GUID_RE);
        let identifier = if guid.is_empty() { link } else { guid };

        let raw_title = strip_title_prefix(&strip_tags(&title_raw));
        let description = strip_description_prefix(&strip_tags(&desc_raw));

        ExtractedItem {
            title: remove_links(&raw_title),
            description: remove_links(&description),
            raw_title,
            identifier,
            attachment: pick_enclosure(item_xml),
        }
    }
}

/// Inner text of the first match of a tag regex, trimmed; empty when absent.
fn pick(item_xml: &str, tag_re: &Regex) -> String {
    tag_re
        .captures(item_xml)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Read `url` and `type` from the first `<enclosure>` carrying a url.
fn pick_enclosure(item_xml: &str) -> Option<Attachment> {
    let found = ENCLOSURE_RE
        .captures_iter(item_xml)
        .filter_map(|caps| caps.get(1))
        .find_map(|attrs| {
            let attrs = attrs.as_str();
            let url = attribute(attrs, &URL_ATTR_RE).filter(|u| !u.is_empty())?;
            Some((url, attribute(attrs, &TYPE_ATTR_RE)))
        });
    let Some((url, content_type)) = found else {
        if ENCLOSURE_RE.is_match(item_xml) {
            log::debug!("Ignoring enclosures without url attribute");
        }
        return None;
    };

    Some(Attachment {
        url: html_escape::decode_html_entities(&url).into_owned(),
        content_type: content_type.filter(|t| !t.is_empty()),
    })
}

fn attribute(attrs: &str, attr_re: &Regex) -> Option<String> {
    let caps = attr_re.captures(attrs)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().trim().to_string())
}

fn strip_title_prefix(title: &str) -> String {
    TITLE_PREFIX_RE.replace(title, "").trim().to_string()
}

fn strip_description_prefix(description: &str) -> String {
    DESC_PREFIX_RE.replace(description, "").trim().to_string()
}
