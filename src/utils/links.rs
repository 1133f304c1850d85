// src/utils/links.rs

//! Link removal.
//!
//! Strips URL-like substrings and the empty `()` / `[]` shells they leave
//! behind, so the removal is not visible in the forwarded text.

use std::sync::LazyLock;

use regex::Regex;

use super::markup::collapse_blank_lines;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:https?://\S+\b|https?://|www\.\S+\b|www\.|t\.me/\S+\b|telegram\.me/\S+\b)",
    )
    .expect("valid url regex")
});
static EMPTY_PARENS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\)").expect("valid parens regex"));
static EMPTY_BRACKETS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*\]").expect("valid brackets regex"));
static SPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("valid space regex"));

/// Remove links from plain text.
///
/// A URL keeps trailing punctuation that is not part of a word. A bare
/// scheme or `www.` with nothing after it is removed as well.
pub fn remove_links(input: &str) -> String {
    let text = URL_RE.replace_all(input, "");
    let text = EMPTY_PARENS_RE.replace_all(&text, "");
    let text = EMPTY_BRACKETS_RE.replace_all(&text, "");
    let text = SPACE_RUN_RE.replace_all(&text, " ");
    collapse_blank_lines(&text).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_schemes() {
        assert_eq!(
            remove_links("Read more at https://example.com/a?b=1 today"),
            "Read more at today"
        );
        assert_eq!(remove_links("HTTP://EXAMPLE.COM/X"), "");
    }

    #[test]
    fn test_removes_bare_hosts() {
        assert_eq!(remove_links("Visit www.example.org/page now"), "Visit now");
        assert_eq!(remove_links("Join t.me/somechannel"), "Join");
        assert_eq!(remove_links("Join telegram.me/somechannel!"), "Join !");
    }

    #[test]
    fn test_cleans_empty_shells() {
        assert_eq!(remove_links("Source (https://example.com) here"), "Source here");
        assert_eq!(remove_links("Link [ https://example.com ] end"), "Link end");
    }

    #[test]
    fn test_keeps_trailing_punctuation() {
        assert_eq!(remove_links("See https://example.com/page."), "See .");
    }

    #[test]
    fn test_collapses_newlines() {
        assert_eq!(
            remove_links("a\n\nhttps://x.io/y\n\nb"),
            "a\n\nb"
        );
    }

    #[test]
    fn test_no_bare_url_fragments_left() {
        let inputs = [
            "https://a.com/1 and http://b.org/2",
            "(www.example.com) [http://x.y/z]",
            "text https://example.com/path?q=1#frag more",
            "mixed www.site.net/a, https://site.net/b; t.me/c",
        ];
        for input in inputs {
            let out = remove_links(input);
            assert!(!out.contains("http"), "{input} -> {out}");
            assert!(!out.contains("www."), "{input} -> {out}");
        }
    }

    #[test]
    fn test_removes_bare_scheme_and_www() {
        assert_eq!(remove_links("see https:// now and www. too"), "see now and too");
        assert_eq!(remove_links("ends with http://"), "ends with");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(remove_links("Exam dates announced"), "Exam dates announced");
    }
}
