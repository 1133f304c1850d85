// src/services/merger.rs

//! Content merging service.
//!
//! Many feeds repeat the title as the first line of the description, or send
//! a cut-off title followed by the full text. The merger keeps a single copy.

use crate::models::ExtractedItem;
use crate::utils::{collapse_blank_lines, is_truncated, normalize};

/// Decides whether a title is redundant and builds the message body.
#[derive(Debug, Clone, Default)]
pub struct ContentMerger;

impl ContentMerger {
    pub fn new() -> Self {
        Self
    }

    /// Merge the cleaned fields of an extracted item.
    ///
    /// The title counts as truncated when either the pre-link-removal title or
    /// the cleaned title ends with a marker.
    pub fn merge_extracted(&self, item: &ExtractedItem) -> String {
        let truncated = is_truncated(&item.raw_title) || is_truncated(&item.title);
        self.merge(&item.title, &item.description, truncated)
    }

    /// Produce the combined body for a title and description.
    pub fn merge(&self, title: &str, description: &str, title_truncated: bool) -> String {
        let combined = if title_truncated || Self::title_is_redundant(title, description) {
            description.to_string()
        } else {
            match (title.is_empty(), description.is_empty()) {
                (false, false) => format!("{title}\n\n{description}"),
                (false, true) => title.to_string(),
                _ => description.to_string(),
            }
        };

        collapse_blank_lines(&combined).trim().to_string()
    }

    fn title_is_redundant(title: &str, description: &str) -> bool {
        let title_norm = normalize(title);
        if title_norm.is_empty() {
            return false;
        }

        let first_line = description
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("");
        let first_norm = normalize(first_line);
        if !first_norm.is_empty()
            && (first_norm.starts_with(&title_norm) || title_norm.starts_with(&first_norm))
        {
            return true;
        }

        let desc_norm = normalize(description);
        !desc_norm.is_empty() && desc_norm.starts_with(&title_norm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge(title: &str, description: &str) -> String {
        let truncated = is_truncated(title);
        ContentMerger::new().merge(title, description, truncated)
    }

    #[test]
    fn test_prefix_title_dropped() {
        let desc = "Breaking news: details follow\n\nMore text.";
        assert_eq!(merge("Breaking news", desc), desc);
    }

    #[test]
    fn test_truncated_title_dropped() {
        let desc = "Event Tomorrow at noon, full details...";
        assert_eq!(merge("Event Tomorrow [...]", desc), desc);
    }

    #[test]
    fn test_truncated_title_never_precedes_description() {
        let out = merge("Totally different headline…", "Body text here.");
        assert_eq!(out, "Body text here.");
        assert!(!out.contains("headline"));
    }

    #[test]
    fn test_first_line_prefix_of_title() {
        let desc = "Results declared\nSee the list below.";
        assert_eq!(merge("Results declared for 2026", desc), desc);
    }

    #[test]
    fn test_skips_leading_blank_lines() {
        let desc = "\n   \nAdmit card released today\nDownload now.";
        assert_eq!(
            merge("Admit   card released", desc),
            "Admit card released today\nDownload now."
        );
    }

    #[test]
    fn test_title_spanning_lines() {
        let desc = "Scholarship\nportal opens Monday";
        assert_eq!(merge("Scholarship portal opens", desc), desc);
    }

    #[test]
    fn test_distinct_title_kept() {
        assert_eq!(
            merge("Holiday notice", "Offices stay closed on Friday."),
            "Holiday notice\n\nOffices stay closed on Friday."
        );
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(merge("Only title", ""), "Only title");
        assert_eq!(merge("", "Only description"), "Only description");
        assert_eq!(merge("", ""), "");
    }

    #[test]
    fn test_collapses_blank_lines() {
        assert_eq!(merge("Title", "a\n\n\n\nb"), "Title\n\na\n\nb");
    }

    #[test]
    fn test_marker_exposed_by_link_removal() {
        let item = ExtractedItem {
            raw_title: "Read https://example.com/x…more".to_string(),
            title: "Read …".to_string(),
            description: "Read all about it".to_string(),
            ..ExtractedItem::default()
        };
        assert_eq!(ContentMerger::new().merge_extracted(&item), "Read all about it");
    }
}
