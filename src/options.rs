//! Configuration options for link rewriting.
//!
//! The `Options` struct holds the eight flags that drive the `rel`/`target`
//! policy. It is a plain value passed into every call; nothing in the crate
//! keeps a process-wide copy.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Flags controlling how anchors are rewritten.
///
/// All fields are public for easy configuration. Every flag defaults to
/// `false`, so `Options::default()` only enforces the `noopener` floor on
/// links that already open in a new tab.
///
/// # Example
///
/// ```rust
/// use rs_linkrel::Options;
///
/// let options = Options {
///     external_nofollow: true,
///     external_target_blank: true,
///     ..Options::default()
/// };
/// assert!(!options.internal_nofollow);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Add `nofollow` to external links.
    pub external_nofollow: bool,

    /// Open external links in a new tab (`target="_blank"`) unless the
    /// anchor already declares a target.
    pub external_target_blank: bool,

    /// Add `sponsored` to external links.
    pub external_sponsored: bool,

    /// Add `ugc` to external links.
    pub external_ugc: bool,

    /// Add `noreferrer` to external links.
    pub external_noreferrer: bool,

    /// Add `noopener` to external links.
    pub external_noopener: bool,

    /// Add `nofollow` to internal links.
    pub internal_nofollow: bool,

    /// Open internal links in a new tab unless the anchor already declares
    /// a target. Implies `noopener`.
    pub internal_target_blank: bool,
}

impl Options {
    /// Load options from a JSON settings object.
    ///
    /// Missing keys fall back to their defaults and unknown keys are ignored,
    /// so settings saved by older or newer versions still load.
    ///
    /// ```rust
    /// use rs_linkrel::Options;
    ///
    /// let options = Options::from_json(r#"{"external_nofollow": true}"#)?;
    /// assert!(options.external_nofollow);
    /// assert!(!options.external_ugc);
    /// # Ok::<(), rs_linkrel::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`](crate::Error::InvalidOptions) if the
    /// input is not a JSON object of booleans.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize options to the JSON form accepted by [`Options::from_json`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`](crate::Error::InvalidOptions) if
    /// serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
