//! Site context: the home host, the active request scheme and root-relative
//! URL resolution.
//!
//! These are the pieces of host-site state the rewriter and extractor need.
//! They are modelled as the [`Site`] trait so a CMS integration can answer
//! from its own settings; [`SiteConfig`] is the ready-made implementation
//! built from a home URL.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::url_utils::normalize_host;
use crate::{Error, Result};

/// Scheme of the request currently being served.
///
/// Used to promote protocol-relative hrefs (`//host/path`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Plain HTTP.
    Http,
    /// HTTPS (the default).
    #[default]
    Https,
}

impl Scheme {
    /// The scheme name without the trailing colon.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Pick the scheme from a "is the request secure" flag.
    #[must_use]
    pub fn from_secure(secure: bool) -> Self {
        if secure {
            Self::Https
        } else {
            Self::Http
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized home host used as the internal/external reference.
///
/// Stored lower-cased, without port, trailing dot or leading `www.`. An empty
/// `HomeHost` is valid and makes every link internal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HomeHost(String);

impl HomeHost {
    /// Build a home host from a bare host string such as `www.Example.com`
    /// or `example.com:8080`.
    ///
    /// Strings containing `://` are treated as URLs. Input that cannot be
    /// parsed falls back to plain normalization rather than failing.
    #[must_use]
    pub fn new(host: &str) -> Self {
        let host = host.trim();
        if host.is_empty() {
            return Self::default();
        }

        let candidate = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{host}")
        };

        match Url::parse(&candidate).ok().and_then(|u| u.host_str().map(str::to_string)) {
            Some(parsed) => Self(normalize_host(&parsed)),
            None => Self(normalize_host(host)),
        }
    }

    /// Build a home host from a full site URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL does not parse or has no host.
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = parse_site_url(url)?;
        let host = parsed.host_str().unwrap_or_default();
        Ok(Self(normalize_host(host)))
    }

    /// The normalized host.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no home host is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HomeHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host-site collaborator consumed by the rewriter and extractor.
pub trait Site {
    /// Normalized home host links are compared against.
    fn home_host(&self) -> &HomeHost;

    /// Scheme of the request currently being served.
    fn current_scheme(&self) -> Scheme;

    /// Resolve a root-relative path (`/about`) to an absolute URL.
    fn resolve_root_relative(&self, path: &str) -> String;
}

/// [`Site`] implementation derived from the site's home URL.
///
/// # Example
///
/// ```rust
/// use rs_linkrel::site::{Scheme, Site, SiteConfig};
///
/// let site = SiteConfig::new("https://www.example.com/blog/")?;
/// assert_eq!(site.home_host().as_str(), "example.com");
/// assert_eq!(site.current_scheme(), Scheme::Https);
/// assert_eq!(site.resolve_root_relative("/about"), "https://www.example.com/about");
/// # Ok::<(), rs_linkrel::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SiteConfig {
    base: Url,
    home: HomeHost,
    scheme: Scheme,
}

impl SiteConfig {
    /// Build a site context from the home URL.
    ///
    /// The request scheme defaults to the home URL's scheme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL does not parse, has no host,
    /// or is not `http`/`https`.
    pub fn new(home_url: &str) -> Result<Self> {
        let base = parse_site_url(home_url)?;
        let scheme = match base.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => {
                return Err(Error::InvalidUrl {
                    url: home_url.to_string(),
                    reason: format!("unsupported scheme {other:?}"),
                })
            }
        };
        let home = HomeHost(normalize_host(base.host_str().unwrap_or_default()));
        Ok(Self { base, home, scheme })
    }

    /// Override the active request scheme (e.g. an HTTPS page on a site
    /// whose stored home URL still says `http`).
    #[must_use]
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// The parsed home URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }
}

impl Site for SiteConfig {
    fn home_host(&self) -> &HomeHost {
        &self.home
    }

    fn current_scheme(&self) -> Scheme {
        self.scheme
    }

    fn resolve_root_relative(&self, path: &str) -> String {
        match self.base.join(path) {
            Ok(resolved) => resolved.to_string(),
            Err(_) => format!("{}{path}", self.base.origin().ascii_serialization()),
        }
    }
}

fn parse_site_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(Error::InvalidUrl {
            url: url.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(parsed)
}
