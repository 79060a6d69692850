//! Compiled regex patterns used while classifying hrefs and sniffing charsets.
//!
//! All patterns are compiled once at first use via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Matches a leading URI scheme (`https:`, `mailto:`, `javascript:` ...).
///
/// Leading ASCII whitespace and control characters are tolerated because
/// browsers ignore them when resolving an href.
pub static URL_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\x00-\x20]*([A-Za-z][A-Za-z0-9+.\-]*):").expect("URL_SCHEME regex")
});

/// Match `<meta charset="...">`.
pub static CHARSET_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("CHARSET_META regex")
});

/// Scheme of an href, lower-cased, if it declares one.
#[must_use]
pub fn scheme_of(href: &str) -> Option<String> {
    URL_SCHEME
        .captures(href)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_of_detects_common_schemes() {
        assert_eq!(scheme_of("https://example.com").as_deref(), Some("https"));
        assert_eq!(scheme_of("MAILTO:a@b.com").as_deref(), Some("mailto"));
        assert_eq!(scheme_of("  javascript:void(0)").as_deref(), Some("javascript"));
        assert_eq!(scheme_of("tel:+123").as_deref(), Some("tel"));
    }

    #[test]
    fn scheme_of_ignores_relative_forms() {
        assert_eq!(scheme_of("/path:with-colon"), None);
        assert_eq!(scheme_of("//cdn.example.com/x"), None);
        assert_eq!(scheme_of("#top"), None);
        assert_eq!(scheme_of("page.html"), None);
        assert_eq!(scheme_of(""), None);
    }

    #[test]
    fn charset_meta_captures_label() {
        let caps = CHARSET_META.captures(r#"<META Charset="ISO-8859-1">"#);
        assert_eq!(
            caps.and_then(|c| c.get(1)).map(|m| m.as_str()),
            Some("ISO-8859-1")
        );
    }
}
