//! URL Utility Functions
//!
//! Small helpers for looking at hrefs the way the rewriter and extractor
//! need: which form an href takes, how a protocol-relative href is promoted,
//! and how a host is reduced to a comparable domain.

use std::borrow::Cow;

use url::Url;

use crate::patterns::scheme_of;
use crate::site::Scheme;

/// Check whether an href names no scheme or a web one.
///
/// `mailto:`, `tel:`, `javascript:`, `file:`, `ftp:` and any other scheme
/// are rejected, as is an `http:`/`https:` href without `//`. The scheme
/// match is case-insensitive.
#[must_use]
pub fn is_web_href(href: &str) -> bool {
    scheme_of(href).is_none() || is_absolute_web(href)
}

/// Check whether an href is protocol-relative (`//host/path`).
///
/// Browsers read `\` like `/` in web URLs, so `/\host` and `\\host` count
/// too.
#[inline]
#[must_use]
pub fn is_protocol_relative(href: &str) -> bool {
    let mut chars = href.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('/' | '\\'), Some('/' | '\\'))
    )
}

/// Check whether an href is root-relative (`/path`, but not `//host`).
#[inline]
#[must_use]
pub fn is_root_relative(href: &str) -> bool {
    href.starts_with('/') && !is_protocol_relative(href)
}

/// Check whether an href is an absolute web URL: `http://`, `https://`
/// (any case) or protocol-relative.
#[must_use]
pub fn is_absolute_web(href: &str) -> bool {
    if is_protocol_relative(href) {
        return true;
    }
    match scheme_of(href).as_deref() {
        Some("http" | "https") => href
            .split_once(':')
            .is_some_and(|(_, rest)| rest.starts_with("//")),
        _ => false,
    }
}

/// Promote a protocol-relative href to an absolute URL using the active
/// request scheme. Any other href is returned untouched.
///
/// ```
/// use rs_linkrel::site::Scheme;
/// use rs_linkrel::url_utils::promote_protocol_relative;
///
/// assert_eq!(
///     promote_protocol_relative("//cdn.example.com/a.js", Scheme::Https),
///     "https://cdn.example.com/a.js"
/// );
/// assert_eq!(promote_protocol_relative("/local", Scheme::Https), "/local");
/// ```
#[must_use]
pub fn promote_protocol_relative(href: &str, scheme: Scheme) -> Cow<'_, str> {
    if is_protocol_relative(href) {
        Cow::Owned(format!("{}://{}", scheme.as_str(), &href[2..]))
    } else {
        Cow::Borrowed(href)
    }
}

/// Extract the host component of a URL.
///
/// Protocol-relative input is promoted first. Relative paths, fragments,
/// empty strings and URLs without an authority yield `None`.
#[must_use]
pub fn host_of(url_str: &str, scheme: Scheme) -> Option<String> {
    let url_str = url_str.trim();
    if url_str.is_empty() || url_str.starts_with('#') {
        return None;
    }

    let promoted = promote_protocol_relative(url_str, scheme);
    let parsed = Url::parse(&promoted).ok()?;
    parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .map(str::to_string)
}

/// Reduce a host to the form used for comparisons: lower-cased, without a
/// trailing dot and without a leading `www.`.
///
/// ```
/// use rs_linkrel::url_utils::normalize_host;
///
/// assert_eq!(normalize_host("WWW.Example.COM."), "example.com");
/// assert_eq!(normalize_host("blog.example.com"), "blog.example.com");
/// ```
#[must_use]
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

/// Extract and normalize the domain of a URL in one step.
///
/// Returns `None` when no host can be extracted or the normalized form is
/// empty.
#[must_use]
pub fn domain_of(url_str: &str, scheme: Scheme) -> Option<String> {
    host_of(url_str, scheme)
        .map(|h| normalize_host(&h))
        .filter(|d| !d.is_empty())
}
