//! Link attribute rewriter.
//!
//! Walks every anchor of a fragment, classifies it against the home host and
//! applies the `rel`/`target` policy from [`Options`]. When no anchor ends up
//! different the input string is returned untouched, so content that needs
//! no change never picks up serializer churn.
//!
//! Changed content is re-serialized from the parsed fragment, so markup the
//! parser repairs comes back repaired (see [`dom::parse_fragment`]).

use tracing::{debug, trace};

use crate::classifier::LinkKind;
use crate::dom::{self, Selection};
use crate::options::Options;
use crate::rel::{RelTokens, NOFOLLOW, NOOPENER, NOREFERRER, SPONSORED, UGC};
use crate::result::RewriteResult;
use crate::site::Site;
use crate::url_utils::is_web_href;

const BLANK: &str = "_blank";

/// What happened to a single anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnchorOutcome {
    /// Not a web link (no href, fragment, mailto: ...).
    Skipped,
    /// Classified, but the policy produced the attributes it already had.
    Unchanged,
    /// `rel` or `target` was written.
    Changed,
}

/// Rewrite anchors in `html` and return the resulting markup.
///
/// See [`rewrite_with_report`] for the counts behind the result.
#[must_use]
pub fn rewrite<S: Site + ?Sized>(html: &str, options: &Options, site: &S) -> String {
    rewrite_with_report(html, options, site).html
}

/// Rewrite anchors in `html`, reporting how many were seen and changed.
///
/// The returned HTML is the re-serialized fragment when at least one anchor
/// changed, and a byte-for-byte copy of `html` otherwise.
#[must_use]
pub fn rewrite_with_report<S: Site + ?Sized>(
    html: &str,
    options: &Options,
    site: &S,
) -> RewriteResult {
    if html.trim().is_empty() {
        return RewriteResult::unchanged(html);
    }

    let doc = dom::parse_fragment(html);
    let anchors = dom::anchors(&doc);

    let mut seen = 0;
    let mut changed = 0;
    for node in anchors.nodes() {
        let anchor = Selection::from(*node);
        match apply_policy(&anchor, options, site) {
            AnchorOutcome::Skipped => {}
            AnchorOutcome::Unchanged => seen += 1,
            AnchorOutcome::Changed => {
                seen += 1;
                changed += 1;
            }
        }
    }

    debug!(
        anchors = anchors.length(),
        classified = seen,
        changed,
        "rewrote link attributes"
    );

    if changed == 0 {
        return RewriteResult {
            anchors_seen: seen,
            ..RewriteResult::unchanged(html)
        };
    }

    RewriteResult {
        html: dom::fragment_html(&doc),
        anchors_seen: seen,
        anchors_changed: changed,
    }
}

/// Whether an href is a web link the policy applies to.
pub(crate) fn is_rewritable_href(href: &str) -> bool {
    !(href.is_empty() || href.starts_with('#')) && is_web_href(href)
}

fn apply_policy<S: Site + ?Sized>(anchor: &Selection, options: &Options, site: &S) -> AnchorOutcome {
    let Some(href) = dom::get_attribute(anchor, "href") else {
        return AnchorOutcome::Skipped;
    };
    let href = href.trim();
    if !is_rewritable_href(href) {
        trace!(href, "skipping anchor");
        return AnchorOutcome::Skipped;
    }

    let kind = LinkKind::of(href, site.home_host(), site.current_scheme());

    let old_rel = dom::get_attribute(anchor, "rel").unwrap_or_default();
    let old_target = dom::get_attribute(anchor, "target");

    let mut rel = RelTokens::parse(&old_rel);
    let mut target = old_target.clone();

    if kind.is_external() && options.external_target_blank && target.is_none() {
        target = Some(BLANK.to_string());
    }

    // Anything opening a new tab gets noopener, whatever put it there.
    if target.as_deref().is_some_and(|t| t.trim().eq_ignore_ascii_case(BLANK)) {
        rel.insert(NOOPENER);
    }

    match kind {
        LinkKind::External => {
            rel.insert_if(options.external_nofollow, NOFOLLOW);
            rel.insert_if(options.external_sponsored, SPONSORED);
            rel.insert_if(options.external_ugc, UGC);
            rel.insert_if(options.external_noreferrer, NOREFERRER);
            rel.insert_if(options.external_noopener, NOOPENER);
        }
        LinkKind::Internal => {
            if options.internal_target_blank && target.is_none() {
                target = Some(BLANK.to_string());
                rel.insert(NOOPENER);
            }
            rel.insert_if(options.internal_nofollow, NOFOLLOW);
        }
    }

    let target_changed = target != old_target;
    if target_changed {
        if let Some(value) = target.as_deref() {
            dom::set_attribute(anchor, "target", value);
        }
    }

    let new_rel = rel.to_attr_value();
    let rel_changed = new_rel.as_deref().unwrap_or_default() != old_rel;
    match new_rel.as_deref() {
        Some(value) if rel_changed => dom::set_attribute(anchor, "rel", value),
        Some(_) => {}
        // An empty `rel=""` is dropped too, but only shows up in the output
        // when some other anchor forces re-serialization.
        None if dom::has_attribute(anchor, "rel") => dom::remove_attribute(anchor, "rel"),
        None => {}
    }

    trace!(href, ?kind, rel = %rel, rel_changed, target_changed, "classified anchor");

    if rel_changed || target_changed {
        AnchorOutcome::Changed
    } else {
        AnchorOutcome::Unchanged
    }
}
