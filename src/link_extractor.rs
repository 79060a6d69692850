//! Link extraction and aggregation.
//!
//! Collects the web links of a fragment into [`LinkRecord`]s, one per
//! distinct `(url, anchor_text)` pair, counting repeats. The caller owns
//! storage: records from a scan replace whatever was stored for the same
//! document (see [`crate::store`]).

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::classifier::is_external;
use crate::dom::{self, Selection};
use crate::result::LinkRecord;
use crate::site::Site;
use crate::url_utils::{domain_of, is_absolute_web, is_root_relative, promote_protocol_relative};

/// Extract and aggregate the web links of `html`.
///
/// Only absolute web URLs (`http://`, `https://`, `//`) and root-relative
/// paths are recorded. Root-relative paths go through
/// [`Site::resolve_root_relative`]; protocol-relative URLs are promoted with
/// [`Site::current_scheme`]. Records come back in first-occurrence order.
///
/// # Example
///
/// ```rust
/// use rs_linkrel::{extract_links, SiteConfig};
///
/// let site = SiteConfig::new("https://example.com")?;
/// let html = r#"<a href="/x">Click</a><a href="/x">Click</a><a href="https://other.com">Out</a>"#;
///
/// let links = extract_links(html, &site);
/// assert_eq!(links.len(), 2);
/// assert_eq!(links[0].url, "https://example.com/x");
/// assert_eq!(links[0].link_count, 2);
/// assert!(links[1].is_external);
/// # Ok::<(), rs_linkrel::Error>(())
/// ```
#[must_use]
pub fn extract_links<S: Site + ?Sized>(html: &str, site: &S) -> Vec<LinkRecord> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let doc = dom::parse_fragment(html);
    let mut aggregator = LinkAggregator::default();

    for node in dom::anchors(&doc).nodes() {
        let anchor = Selection::from(*node);
        if let Some(record) = scan_anchor(&anchor, site) {
            aggregator.add(record);
        }
    }

    let records = aggregator.into_records();
    debug!(records = records.len(), "extracted links");
    records
}

/// Resolve an href to the absolute URL a record is stored under.
///
/// Returns `None` for anything that is not recorded: empty hrefs,
/// fragments, non-web schemes and document-relative paths.
pub(crate) fn resolve_href<S: Site + ?Sized>(raw: &str, site: &S) -> Option<String> {
    let decoded = html_escape::decode_html_entities(raw);
    let href = decoded.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if is_absolute_web(href) {
        return Some(promote_protocol_relative(href, site.current_scheme()).into_owned());
    }

    if is_root_relative(href) {
        return Some(site.resolve_root_relative(href));
    }

    None
}

fn scan_anchor<S: Site + ?Sized>(anchor: &Selection, site: &S) -> Option<LinkRecord> {
    let raw = dom::get_attribute(anchor, "href")?;
    let Some(url) = resolve_href(&raw, site) else {
        trace!(href = %raw, "not recording anchor");
        return None;
    };

    let scheme = site.current_scheme();
    let domain = domain_of(&url, scheme)?;
    let is_external = is_external(&url, site.home_host(), scheme);
    let anchor_text = dom::text_content(anchor).trim().to_string();

    Some(LinkRecord {
        url,
        domain,
        anchor_text,
        is_external,
        link_count: 1,
    })
}

/// Accumulates records keyed by `(url, anchor_text)`, keeping
/// first-occurrence order.
#[derive(Debug, Default)]
pub struct LinkAggregator {
    records: Vec<LinkRecord>,
    index: HashMap<(String, String), usize>,
}

impl LinkAggregator {
    /// Add a record, merging its count into an existing one with the same key.
    pub fn add(&mut self, record: LinkRecord) {
        let key = (record.url.clone(), record.anchor_text.clone());
        match self.index.get(&key) {
            Some(&pos) => {
                let existing = &mut self.records[pos];
                existing.link_count = existing.link_count.saturating_add(record.link_count);
            }
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Number of distinct records so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finish and return the records.
    #[must_use]
    pub fn into_records(self) -> Vec<LinkRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::{Scheme, SiteConfig};

    fn site() -> SiteConfig {
        SiteConfig::new("https://www.example.com").unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn resolve_href_forms() {
        let site = site();
        assert_eq!(
            resolve_href("/a?b=1&amp;c=2", &site).as_deref(),
            Some("https://www.example.com/a?b=1&c=2")
        );
        assert_eq!(
            resolve_href("//cdn.other.com/x", &site.clone().with_scheme(Scheme::Http)).as_deref(),
            Some("http://cdn.other.com/x")
        );
        assert_eq!(
            resolve_href(" https://other.com ", &site).as_deref(),
            Some("https://other.com")
        );
        assert_eq!(resolve_href("#top", &site), None);
        assert_eq!(resolve_href("page.html", &site), None);
        assert_eq!(resolve_href("mailto:a@b.com", &site), None);
        assert_eq!(resolve_href("ftp://files.example.com", &site), None);
        assert_eq!(resolve_href("", &site), None);
    }

    #[test]
    fn records_carry_domain_and_classification() {
        let links = extract_links(
            r#"<a href="https://WWW.Other.com/p">Other</a><a href="/in">In</a>"#,
            &site(),
        );
        assert_eq!(links.len(), 2);

        assert_eq!(links[0].domain, "other.com");
        assert!(links[0].is_external);

        assert_eq!(links[1].url, "https://www.example.com/in");
        assert_eq!(links[1].domain, "example.com");
        assert!(!links[1].is_external);
    }

    #[test]
    fn anchor_text_is_trimmed_and_includes_nested_text() {
        let links = extract_links(
            "<a href=\"/x\">\n  <strong>Read</strong> more  </a>",
            &site(),
        );
        assert_eq!(links[0].anchor_text, "Read more");
    }

    #[test]
    fn aggregator_merges_by_url_and_text() {
        let mut agg = LinkAggregator::default();
        let record = |text: &str| LinkRecord {
            url: "https://a.com/".to_string(),
            domain: "a.com".to_string(),
            anchor_text: text.to_string(),
            is_external: true,
            link_count: 1,
        };
        agg.add(record("one"));
        agg.add(record("two"));
        agg.add(record("one"));

        assert_eq!(agg.len(), 2);
        let records = agg.into_records();
        assert_eq!(records[0].anchor_text, "one");
        assert_eq!(records[0].link_count, 2);
        assert_eq!(records[1].link_count, 1);
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(extract_links("", &site()).is_empty());
        assert!(extract_links("<p>no links</p>", &site()).is_empty());
    }
}
