//! Shared helpers for the listing and article parsers: static pattern
//! compilation, element text flattening, and integer scraping.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

/// Compiles a regex at static init; panics on invalid pattern.
pub fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Parses a CSS selector at static init; panics on invalid selector.
pub fn compile_static_selector(selector: &str) -> Selector {
    Selector::parse(selector)
        .unwrap_or_else(|e| panic!("invalid static selector '{selector}': {e:?}"))
}

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"\d+"));

/// Returns the element's text nodes, trimmed and concatenated with no separator,
/// so inline markup such as `<b>持ち物</b>：…` reads as one run of text.
#[must_use]
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .collect()
}

/// Returns the first run of ASCII digits in `text` as an integer.
///
/// Thousands separators (`,`) are removed first so `"2,034"` parses as 2034.
#[must_use]
pub fn first_integer(text: &str) -> Option<u32> {
    let cleaned = text.replace(',', "");
    DIGITS_RE
        .find(&cleaned)
        .and_then(|m| m.as_str().parse().ok())
}
