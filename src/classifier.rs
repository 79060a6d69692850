//! Internal/external link classification.
//!
//! A link is external only when its URL explicitly names a host that differs
//! from the home host. Anything without an extractable host (relative paths,
//! fragments, empty hrefs) counts as internal, and so does everything when
//! the home host is unknown.

use crate::site::{HomeHost, Scheme};
use crate::url_utils::{host_of, normalize_host};

/// Decide whether `url` points outside the site identified by `home`.
///
/// `scheme` is the active request scheme, used to promote protocol-relative
/// URLs before the host is read.
///
/// ```
/// use rs_linkrel::classifier::is_external;
/// use rs_linkrel::site::{HomeHost, Scheme};
///
/// let home = HomeHost::new("example.com");
/// assert!(!is_external("https://www.example.com/x", &home, Scheme::Https));
/// assert!(is_external("//other.com/x", &home, Scheme::Https));
/// assert!(!is_external("/about", &home, Scheme::Https));
/// ```
#[must_use]
pub fn is_external(url: &str, home: &HomeHost, scheme: Scheme) -> bool {
    if home.is_empty() {
        return false;
    }

    let Some(host) = host_of(url, scheme) else {
        return false;
    };

    let host = normalize_host(&host);
    !host.is_empty() && host != home.as_str()
}

/// Classification of a single href.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Same site as the home host (or no host at all).
    Internal,
    /// A different host.
    External,
}

impl LinkKind {
    /// Classify `url` against `home`.
    #[must_use]
    pub fn of(url: &str, home: &HomeHost, scheme: Scheme) -> Self {
        if is_external(url, home, scheme) {
            Self::External
        } else {
            Self::Internal
        }
    }

    /// Whether this is [`LinkKind::External`].
    #[must_use]
    pub fn is_external(self) -> bool {
        matches!(self, Self::External)
    }
}
