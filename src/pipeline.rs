//! Content update pipeline.
//!
//! Saving a document is two explicit steps: rewrite the content and hand the
//! new markup back to the host, then (once the host has stored it) index its
//! links. Nothing here re-enters the host's save path, so the host needs no
//! "ignore my own update" guard.

use tracing::info;

use crate::link_extractor::extract_links;
use crate::options::Options;
use crate::removal::{remove_links, LinkTarget};
use crate::rewriter::rewrite_with_report;
use crate::site::Site;
use crate::store::{replace_links, IndexReport, LinkStore, SourceId};
use crate::Result;

/// Content produced by the rewrite step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUpdate {
    /// The content to store.
    pub content: String,
    /// Whether `content` differs from the input. When `false` the host can
    /// skip writing it back.
    pub changed: bool,
}

/// Step one: rewrite link attributes and return the content to store.
#[must_use]
pub fn rewrite_and_return_new_content<S: Site + ?Sized>(
    html: &str,
    options: &Options,
    site: &S,
) -> ContentUpdate {
    let result = rewrite_with_report(html, options, site);
    ContentUpdate {
        changed: result.changed(),
        content: result.html,
    }
}

/// Step two: extracts links from stored content and replaces a store's
/// records for that document.
#[derive(Debug)]
pub struct LinkIndexer<'a, S: ?Sized, L: ?Sized> {
    site: &'a S,
    store: &'a mut L,
}

impl<'a, S: Site + ?Sized, L: LinkStore + ?Sized> LinkIndexer<'a, S, L> {
    /// Create an indexer writing into `store`.
    pub fn new(site: &'a S, store: &'a mut L) -> Self {
        Self { site, store }
    }

    /// Extract the links of `html` and make them the stored set for
    /// `source_id`.
    ///
    /// # Errors
    ///
    /// Fails only if the store cannot delete the previous record set.
    pub fn index(&mut self, source_id: SourceId, html: &str) -> Result<IndexReport> {
        let records = extract_links(html, self.site);
        replace_links(self.store, source_id, &records)
    }

    /// Forget every link of a deleted document.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the delete fails.
    pub fn forget(&mut self, source_id: SourceId) -> Result<usize> {
        self.store.delete_for_source(source_id)
    }

    /// Remove links matching `target` from a document and re-index it.
    ///
    /// Returns the new content (for the host to store) with the index
    /// report. Content without matching links is returned unchanged and
    /// still re-indexed, which also repairs a stale record set.
    ///
    /// # Errors
    ///
    /// Fails only if the store cannot delete the previous record set.
    pub fn remove_and_reindex(
        &mut self,
        source_id: SourceId,
        html: &str,
        target: &LinkTarget,
    ) -> Result<(ContentUpdate, IndexReport)> {
        let removal = remove_links(html, target, self.site);
        let report = self.index(source_id, &removal.html)?;

        info!(source_id, removed = removal.removed, "removed links from document");

        Ok((
            ContentUpdate {
                changed: removal.removed > 0,
                content: removal.html,
            },
            report,
        ))
    }
}
