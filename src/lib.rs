//! # rs-linkrel
//!
//! Link classification, `rel`/`target` rewriting and link aggregation for
//! HTML content.
//!
//! Given a post body and a home host, the crate decides which anchors are
//! internal and which are external, applies a configurable `rel`/`target`
//! policy to them, and collects per-document link records for reporting and
//! bulk removal.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_linkrel::{rewrite, Options, SiteConfig};
//!
//! let site = SiteConfig::new("https://example.com")?;
//! let options = Options {
//!     external_nofollow: true,
//!     external_target_blank: true,
//!     external_noopener: true,
//!     ..Options::default()
//! };
//!
//! let html = r#"<p><a href="https://other.com">Go</a></p>"#;
//! assert_eq!(
//!     rewrite(html, &options, &site),
//!     r#"<p><a href="https://other.com" target="_blank" rel="nofollow noopener">Go</a></p>"#
//! );
//! # Ok::<(), rs_linkrel::Error>(())
//! ```
//!
//! ## Guarantees
//!
//! - `rel` values are written deduplicated and sorted, so rewriting is
//!   idempotent.
//! - Any anchor ending up with `target="_blank"` carries `noopener`.
//! - Content that needs no change is returned byte-for-byte.
//! - Malformed markup never fails: it is either repaired by the HTML5
//!   parser or left alone.

mod error;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// URL form checks, protocol-relative promotion and host normalization.
pub mod url_utils;

/// Home host, request scheme and root-relative resolution.
pub mod site;

/// Internal/external classification.
pub mod classifier;

/// `rel` token sets.
pub mod rel;

/// `rel`/`target` rewriting.
pub mod rewriter;

/// Link extraction and aggregation.
pub mod link_extractor;

/// Unwrapping anchors that point at a URL or domain.
pub mod removal;

/// Link record storage with full-replace semantics.
pub mod store;

/// Summaries over stored links.
pub mod report;

/// Two-step rewrite/index pipeline.
pub mod pipeline;

/// Character encoding handling for byte input.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use link_extractor::extract_links;
pub use options::Options;
pub use result::{LinkRecord, Removal, RewriteResult};
pub use rewriter::{rewrite, rewrite_with_report};
pub use site::{HomeHost, Scheme, Site, SiteConfig};

/// Decide whether `url` is external to `home_host`.
///
/// `home_host` may carry `www.`, a port or mixed case; an empty home host
/// makes every link internal. Protocol-relative URLs are promoted with the
/// default scheme (`https`); use [`classifier::is_external`] to pass the
/// active request scheme.
///
/// ```rust
/// use rs_linkrel::is_external;
///
/// assert!(!is_external("https://example.com/x", "www.example.com"));
/// assert!(is_external("https://other.com/x", "example.com"));
/// assert!(!is_external("#top", "example.com"));
/// ```
#[must_use]
pub fn is_external(url: &str, home_host: &str) -> bool {
    classifier::is_external(url, &HomeHost::new(home_host), Scheme::default())
}

/// Rewrite anchors in encoded content and return it in the same encoding.
///
/// `charset` is the declared encoding label if the caller knows it;
/// otherwise a `<meta charset>` declaration or UTF-8 is assumed. A byte order
/// mark wins over both and is written back. When no anchor changes, the input
/// bytes are returned as they are.
///
/// # Errors
///
/// Returns [`Error::EncodingError`] if `charset` is not a known label.
pub fn rewrite_bytes<S: Site + ?Sized>(
    html: &[u8],
    charset: Option<&str>,
    options: &Options,
    site: &S,
) -> Result<Vec<u8>> {
    let decoded = encoding::decode(html, charset)?;
    let result = rewrite_with_report(&decoded.text, options, site);

    if !result.changed() {
        return Ok(html.to_vec());
    }

    Ok(decoded.reencode(&result.html))
}

/// Extract links from encoded content.
///
/// # Errors
///
/// Returns [`Error::EncodingError`] if `charset` is not a known label.
pub fn extract_links_bytes<S: Site + ?Sized>(
    html: &[u8],
    charset: Option<&str>,
    site: &S,
) -> Result<Vec<LinkRecord>> {
    let decoded = encoding::decode(html, charset)?;
    Ok(extract_links(&decoded.text, site))
}
