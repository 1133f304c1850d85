// src/utils/truncation.rs

//! Truncation marker detection and comparison-safe normalization.
//!
//! Upstream feeds cut long titles and append `[...]`, `[…]`, `…` or `...`.
//! A truncated title is a prefix fragment of the description and must not be
//! forwarded on its own.

use std::sync::LazyLock;

use regex::Regex;

static TRUNC_END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\[\s*(?:\.\.\.|…)\s*\]\s*$|\s*(?:…|\.\.\.)\s*$")
        .expect("valid truncation regex")
});

/// Whether the text ends with a truncation marker.
pub fn is_truncated(text: &str) -> bool {
    TRUNC_END_RE.is_match(text)
}

/// Strip a trailing truncation marker and collapse all whitespace.
pub fn normalize(text: &str) -> String {
    let stripped = TRUNC_END_RE.replace(text, "");
    collapse_whitespace(&stripped)
}

/// Collapse every whitespace run to a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_markers() {
        assert!(is_truncated("Event Tomorrow [...]"));
        assert!(is_truncated("Event Tomorrow [ … ]"));
        assert!(is_truncated("Event Tomorrow…"));
        assert!(is_truncated("Event Tomorrow ...  "));
    }

    #[test]
    fn test_marker_must_be_trailing() {
        assert!(!is_truncated("Wait... what happened"));
        assert!(!is_truncated("[...] at the start"));
        assert!(!is_truncated("Complete title"));
        assert!(!is_truncated(""));
    }

    #[test]
    fn test_normalize_strips_marker() {
        assert_eq!(normalize("Event Tomorrow [...]"), "Event Tomorrow");
        assert_eq!(normalize("Event   Tomorrow…"), "Event Tomorrow");
        assert_eq!(normalize("Event\nTomorrow ..."), "Event Tomorrow");
    }

    #[test]
    fn test_normalize_plain() {
        assert_eq!(normalize("  Breaking\tnews  "), "Breaking news");
        assert_eq!(normalize(""), "");
    }
}
