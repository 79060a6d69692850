//! Result types produced by rewriting, extraction and removal.

use serde::{Deserialize, Serialize};

/// One aggregated link found in a document.
///
/// Records are keyed by `(url, anchor_text)` within a single scan;
/// `link_count` says how many anchors in the document shared that pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Absolute URL (root-relative hrefs resolved, protocol-relative promoted).
    pub url: String,

    /// Normalized host of `url`: lower-cased, no leading `www.`.
    pub domain: String,

    /// Trimmed text content of the anchor, nested elements included.
    pub anchor_text: String,

    /// Whether `domain` differs from the home host.
    pub is_external: bool,

    /// Number of anchors in the document with this `(url, anchor_text)`.
    pub link_count: u32,
}

/// Output of [`rewrite_with_report`](crate::rewrite_with_report).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    /// Rewritten markup, or the untouched input when nothing changed.
    pub html: String,

    /// Anchors that were classified (web links with an href).
    pub anchors_seen: usize,

    /// Anchors whose `rel` or `target` was written.
    pub anchors_changed: usize,
}

impl RewriteResult {
    pub(crate) fn unchanged(html: &str) -> Self {
        Self {
            html: html.to_string(),
            anchors_seen: 0,
            anchors_changed: 0,
        }
    }

    /// Whether any anchor was modified.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.anchors_changed > 0
    }
}

/// Output of [`remove_links`](crate::removal::remove_links).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// Markup with matching anchors unwrapped, or the untouched input.
    pub html: String,

    /// Number of anchors unwrapped.
    pub removed: usize,
}
