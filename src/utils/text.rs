// src/utils/text.rs

//! Display-limit helpers.

use unicode_segmentation::UnicodeSegmentation;

/// Cut text to at most `max` user-perceived characters.
///
/// Grapheme clusters are never split, so emoji sequences and combining marks
/// survive intact.
pub fn truncate_graphemes(text: &str, max: usize) -> &str {
    match text.grapheme_indices(true).nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_graphemes("hello", 10), "hello");
        assert_eq!(truncate_graphemes("hello", 5), "hello");
    }

    #[test]
    fn test_cuts_at_limit() {
        assert_eq!(truncate_graphemes("hello world", 5), "hello");
        assert_eq!(truncate_graphemes("abc", 0), "");
    }

    #[test]
    fn test_keeps_clusters_whole() {
        let text = "🔥🇰🇷e\u{301}x";
        assert_eq!(truncate_graphemes(text, 2), "🔥🇰🇷");
        assert_eq!(truncate_graphemes(text, 3), "🔥🇰🇷e\u{301}");
    }
}
