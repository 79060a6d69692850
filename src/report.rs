//! Reporting over stored links.
//!
//! Summaries for an admin "links" screen: totals per domain, internal vs.
//! external filtering, and which documents link to a given target (the
//! input to bulk removal).

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::removal::LinkTarget;
use crate::store::{SourceId, StoredLink};

/// Aggregate of every stored link to one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainSummary {
    /// Normalized domain.
    pub domain: String,
    /// Whether links to this domain are external.
    pub is_external: bool,
    /// Sum of `link_count` over all records.
    pub link_count: u64,
    /// Distinct URLs on this domain.
    pub unique_urls: usize,
    /// Distinct documents linking to this domain.
    pub sources: usize,
}

/// Which links a report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkFilter {
    /// Every link.
    #[default]
    All,
    /// Only links to the home host.
    Internal,
    /// Only links to other hosts.
    External,
}

impl LinkFilter {
    /// Whether a stored link passes this filter.
    #[must_use]
    pub fn accepts(self, link: &StoredLink) -> bool {
        match self {
            Self::All => true,
            Self::Internal => !link.record.is_external,
            Self::External => link.record.is_external,
        }
    }
}

#[derive(Default)]
struct DomainAcc {
    is_external: bool,
    link_count: u64,
    urls: BTreeSet<String>,
    sources: BTreeSet<SourceId>,
}

/// Totals per domain, busiest first (ties broken by domain name).
#[must_use]
pub fn summarize_domains(links: &[StoredLink], filter: LinkFilter) -> Vec<DomainSummary> {
    let mut by_domain: BTreeMap<&str, DomainAcc> = BTreeMap::new();

    for link in links.iter().filter(|l| filter.accepts(l)) {
        let acc = by_domain.entry(link.record.domain.as_str()).or_default();
        acc.is_external |= link.record.is_external;
        acc.link_count += u64::from(link.record.link_count);
        acc.urls.insert(link.record.url.clone());
        acc.sources.insert(link.source_id);
    }

    let mut summaries: Vec<DomainSummary> = by_domain
        .into_iter()
        .map(|(domain, acc)| DomainSummary {
            domain: domain.to_string(),
            is_external: acc.is_external,
            link_count: acc.link_count,
            unique_urls: acc.urls.len(),
            sources: acc.sources.len(),
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.link_count
            .cmp(&a.link_count)
            .then_with(|| a.domain.cmp(&b.domain))
    });
    summaries
}

/// Stored links passing `filter`.
#[must_use]
pub fn filter_links(links: &[StoredLink], filter: LinkFilter) -> Vec<&StoredLink> {
    links.iter().filter(|l| filter.accepts(l)).collect()
}

/// Documents containing at least one link to `target`, in ascending order.
#[must_use]
pub fn sources_linking_to(links: &[StoredLink], target: &LinkTarget) -> Vec<SourceId> {
    links
        .iter()
        .filter(|l| target.matches_record(&l.record))
        .map(|l| l.source_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
