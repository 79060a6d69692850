//! Bulk link removal.
//!
//! Unwraps anchors that point at a given URL or domain, leaving their text
//! in place. Used after a report has shown which documents link somewhere
//! unwanted; each document is then re-indexed by the caller.

use tracing::debug;
use url::Url;

use crate::dom::{self, Selection};
use crate::link_extractor::resolve_href;
use crate::result::{LinkRecord, Removal};
use crate::site::Site;
use crate::url_utils::{domain_of, normalize_host};

/// Which anchors to remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Anchors whose resolved URL equals this absolute URL.
    Url(String),
    /// Anchors whose normalized domain equals this domain.
    Domain(String),
}

impl LinkTarget {
    /// Target a single URL, as stored in [`LinkRecord::url`].
    #[must_use]
    pub fn url(url: &str) -> Self {
        Self::Url(url.trim().to_string())
    }

    /// Target every link to a domain. `www.` and case are ignored.
    #[must_use]
    pub fn domain(domain: &str) -> Self {
        Self::Domain(normalize_host(domain))
    }

    /// Whether a resolved href matches this target.
    #[must_use]
    pub fn matches<S: Site + ?Sized>(&self, resolved: &str, site: &S) -> bool {
        match self {
            Self::Url(url) => same_url(url, resolved),
            Self::Domain(domain) => {
                domain_of(resolved, site.current_scheme()).is_some_and(|d| &d == domain)
            }
        }
    }

    /// Whether a stored record points at this target.
    #[must_use]
    pub fn matches_record(&self, record: &LinkRecord) -> bool {
        match self {
            Self::Url(url) => same_url(url, &record.url),
            Self::Domain(domain) => &record.domain == domain,
        }
    }
}

fn same_url(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Unwrap every anchor in `html` that matches `target`.
///
/// Hrefs are resolved the same way the extractor resolves them, so a target
/// taken from a stored [`LinkRecord`](crate::LinkRecord) matches the anchors
/// that produced it. When nothing matches, the input comes back unchanged.
///
/// ```rust
/// use rs_linkrel::removal::{remove_links, LinkTarget};
/// use rs_linkrel::SiteConfig;
///
/// let site = SiteConfig::new("https://example.com")?;
/// let html = r#"<p>See <a href="https://spam.net/x">this</a> and <a href="/ok">that</a>.</p>"#;
///
/// let out = remove_links(html, &LinkTarget::domain("spam.net"), &site);
/// assert_eq!(out.removed, 1);
/// assert_eq!(out.html, r#"<p>See this and <a href="/ok">that</a>.</p>"#);
/// # Ok::<(), rs_linkrel::Error>(())
/// ```
#[must_use]
pub fn remove_links<S: Site + ?Sized>(html: &str, target: &LinkTarget, site: &S) -> Removal {
    let unchanged = || Removal {
        html: html.to_string(),
        removed: 0,
    };

    if html.trim().is_empty() {
        return unchanged();
    }

    let doc = dom::parse_fragment(html);
    let matching: Vec<Selection> = dom::anchors(&doc)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|anchor| {
            dom::get_attribute(anchor, "href")
                .and_then(|raw| resolve_href(&raw, site))
                .is_some_and(|resolved| target.matches(&resolved, site))
        })
        .collect();

    if matching.is_empty() {
        return unchanged();
    }

    for anchor in &matching {
        dom::unwrap_element(anchor);
    }

    debug!(removed = matching.len(), ?target, "removed links");

    Removal {
        html: dom::fragment_html(&doc),
        removed: matching.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::SiteConfig;

    fn site() -> SiteConfig {
        SiteConfig::new("https://example.com").unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn url_target_matches_resolved_root_relative_links() {
        let out = remove_links(
            r#"<a href="/old">Old</a> <a href="/new">New</a>"#,
            &LinkTarget::url("https://example.com/old"),
            &site(),
        );
        assert_eq!(out.removed, 1);
        assert_eq!(out.html, r#"Old <a href="/new">New</a>"#);
    }

    #[test]
    fn url_target_ignores_trailing_slash_differences_of_the_root() {
        let out = remove_links(
            r#"<a href="https://other.com">x</a>"#,
            &LinkTarget::url("https://other.com/"),
            &site(),
        );
        assert_eq!(out.removed, 1);
    }

    #[test]
    fn domain_target_ignores_www_and_case() {
        let out = remove_links(
            r#"<a href="https://WWW.Spam.net/a">a</a><a href="//spam.net/b">b</a><a href="https://notspam.net">c</a>"#,
            &LinkTarget::domain("www.spam.net"),
            &site(),
        );
        assert_eq!(out.removed, 2);
        assert_eq!(out.html, r#"ab<a href="https://notspam.net">c</a>"#);
    }

    #[test]
    fn non_matching_input_is_returned_verbatim() {
        let html = "<p>Nothing   <A HREF='/x'>here</A></p>";
        let out = remove_links(html, &LinkTarget::domain("spam.net"), &site());
        assert_eq!(out.removed, 0);
        assert_eq!(out.html, html);
    }

    #[test]
    fn mailto_links_are_never_removed() {
        let html = r#"<a href="mailto:x@spam.net">mail</a>"#;
        let out = remove_links(html, &LinkTarget::domain("spam.net"), &site());
        assert_eq!(out.removed, 0);
    }
}
