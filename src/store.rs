//! Link storage.
//!
//! The extractor hands back a fresh record set per document. Storage is
//! full-replace: every record previously stored for a source is deleted,
//! then the new set is inserted one record at a time. A failed insert is
//! reported and skipped; the rest of the set still goes in.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::result::LinkRecord;
use crate::{Error, Result};

/// Identifier of the document a record set was extracted from (a post id).
pub type SourceId = u64;

/// A [`LinkRecord`] as kept by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLink {
    /// Document the link was found in.
    pub source_id: SourceId,

    /// The aggregated link.
    #[serde(flatten)]
    pub record: LinkRecord,

    /// When the record set was written.
    pub indexed_at: DateTime<Utc>,
}

/// Storage collaborator for link records.
pub trait LinkStore {
    /// Delete every record stored for `source_id`, returning how many went.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the backend cannot delete.
    fn delete_for_source(&mut self, source_id: SourceId) -> Result<usize>;

    /// Insert one record for `source_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the backend rejects the record.
    fn insert(&mut self, source_id: SourceId, record: &LinkRecord) -> Result<()>;

    /// All stored links, for reporting.
    fn all_links(&self) -> Vec<StoredLink>;
}

/// Record that could not be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedInsert {
    /// The record that was rejected.
    pub record: LinkRecord,
    /// The store's error message.
    pub error: String,
}

/// Outcome of replacing a source's record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReport {
    /// Document that was re-indexed.
    pub source_id: SourceId,
    /// Records removed before inserting.
    pub deleted: usize,
    /// Records inserted.
    pub inserted: usize,
    /// Records the store rejected.
    pub failed: Vec<FailedInsert>,
}

impl IndexReport {
    /// Whether every record was stored.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Replace the stored records of `source_id` with `records`.
///
/// # Errors
///
/// Returns the store's error if the delete step fails; nothing is inserted
/// in that case. Insert failures do not make this fail: they are listed in
/// [`IndexReport::failed`].
pub fn replace_links<L: LinkStore + ?Sized>(
    store: &mut L,
    source_id: SourceId,
    records: &[LinkRecord],
) -> Result<IndexReport> {
    let deleted = store.delete_for_source(source_id)?;

    let mut inserted = 0;
    let mut failed = Vec::new();
    for record in records {
        match store.insert(source_id, record) {
            Ok(()) => inserted += 1,
            Err(e) => {
                warn!(source_id, url = %record.url, error = %e, "failed to store link");
                failed.push(FailedInsert {
                    record: record.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    debug!(source_id, deleted, inserted, failed = failed.len(), "replaced link records");

    Ok(IndexReport {
        source_id,
        deleted,
        inserted,
        failed,
    })
}

/// In-memory [`LinkStore`].
///
/// Enforces the same uniqueness a link table would: one row per
/// `(source_id, url, anchor_text)`.
#[derive(Debug, Clone, Default)]
pub struct MemoryLinkStore {
    links: BTreeMap<SourceId, Vec<StoredLink>>,
}

impl MemoryLinkStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Links stored for one source.
    #[must_use]
    pub fn links_for_source(&self, source_id: SourceId) -> &[StoredLink] {
        self.links.get(&source_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LinkStore for MemoryLinkStore {
    fn delete_for_source(&mut self, source_id: SourceId) -> Result<usize> {
        Ok(self.links.remove(&source_id).map_or(0, |v| v.len()))
    }

    fn insert(&mut self, source_id: SourceId, record: &LinkRecord) -> Result<()> {
        let rows = self.links.entry(source_id).or_default();
        if rows
            .iter()
            .any(|r| r.record.url == record.url && r.record.anchor_text == record.anchor_text)
        {
            return Err(Error::Store(format!(
                "duplicate link {:?} ({:?}) for source {source_id}",
                record.url, record.anchor_text
            )));
        }

        rows.push(StoredLink {
            source_id,
            record: record.clone(),
            indexed_at: Utc::now(),
        });
        Ok(())
    }

    fn all_links(&self) -> Vec<StoredLink> {
        self.links.values().flatten().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, text: &str) -> LinkRecord {
        LinkRecord {
            url: url.to_string(),
            domain: "example.com".to_string(),
            anchor_text: text.to_string(),
            is_external: false,
            link_count: 1,
        }
    }

    #[test]
    fn replace_deletes_previous_records_first() {
        let mut store = MemoryLinkStore::new();
        let first = replace_links(&mut store, 7, &[record("https://example.com/a", "A")])
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(first.deleted, 0);
        assert_eq!(first.inserted, 1);

        let second = replace_links(
            &mut store,
            7,
            &[record("https://example.com/b", "B"), record("https://example.com/c", "C")],
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(second.deleted, 1);
        assert_eq!(second.inserted, 2);
        assert_eq!(store.links_for_source(7).len(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn other_sources_are_untouched() {
        let mut store = MemoryLinkStore::new();
        let _ = replace_links(&mut store, 1, &[record("https://example.com/a", "A")]);
        let _ = replace_links(&mut store, 2, &[record("https://example.com/a", "A")]);
        let _ = replace_links(&mut store, 1, &[]);

        assert!(store.links_for_source(1).is_empty());
        assert_eq!(store.links_for_source(2).len(), 1);
    }

    #[test]
    fn duplicate_insert_is_reported_and_the_rest_still_stored() {
        let mut store = MemoryLinkStore::new();
        let report = replace_links(
            &mut store,
            3,
            &[
                record("https://example.com/a", "A"),
                record("https://example.com/a", "A"),
                record("https://example.com/b", "B"),
            ],
        )
        .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(report.inserted, 2);
        assert_eq!(report.failed.len(), 1);
        assert!(!report.is_complete());
        assert!(report.failed[0].error.contains("duplicate"));
    }

    #[test]
    fn stored_link_serializes_flat() {
        let link = StoredLink {
            source_id: 9,
            record: record("https://example.com/a", "A"),
            indexed_at: Utc::now(),
        };
        let json = serde_json::to_value(&link).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(json["source_id"], 9);
        assert_eq!(json["url"], "https://example.com/a");
        assert_eq!(json["link_count"], 1);
    }
}
