// src/utils/markup.rs

//! Markup stripping for feed titles and descriptions.

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

static BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid break regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<.*?>").expect("valid tag regex"));
static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank line regex"));
static CDATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!\[CDATA\[|\]\]>").expect("valid cdata regex"));

/// Convert escaped, tagged text into plain text.
///
/// Entities are decoded first, so escaped markup (`&lt;b&gt;`) is removed
/// together with literal tags.
pub fn strip_tags(input: &str) -> String {
    let decoded = decode_html_entities(input);
    let with_breaks = BREAK_RE.replace_all(&decoded, "\n");
    let untagged = TAG_RE.replace_all(&with_breaks, "");
    collapse_blank_lines(&untagged).trim().to_string()
}

/// Collapse runs of three or more newlines to exactly two.
pub fn collapse_blank_lines(input: &str) -> String {
    BLANK_LINES_RE.replace_all(input, "\n\n").into_owned()
}

/// Remove every CDATA open/close marker.
pub fn unwrap_cdata(input: &str) -> String {
    CDATA_RE.replace_all(input, "").into_owned()
}
