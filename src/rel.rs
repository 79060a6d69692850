//! `rel` attribute token sets.
//!
//! Tokens are kept in a `BTreeSet`, so the written value is always
//! deduplicated and sorted. That ordering is what makes re-running the
//! rewriter a no-op.

use std::collections::BTreeSet;
use std::fmt;

/// `nofollow` token.
pub const NOFOLLOW: &str = "nofollow";
/// `noopener` token.
pub const NOOPENER: &str = "noopener";
/// `noreferrer` token.
pub const NOREFERRER: &str = "noreferrer";
/// `sponsored` token.
pub const SPONSORED: &str = "sponsored";
/// `ugc` token.
pub const UGC: &str = "ugc";

/// Deduplicated, sorted set of `rel` tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelTokens(BTreeSet<String>);

impl RelTokens {
    /// Split a `rel` attribute value on ASCII whitespace, dropping empties.
    ///
    /// Tokens keep their original case; `rel` values are case-insensitive in
    /// HTML but rewriting an author's casing would churn their markup. Of
    /// tokens differing only in case, the first one written is kept.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let mut tokens = Self::default();
        for token in value.split_ascii_whitespace() {
            tokens.insert(token);
        }
        tokens
    }

    /// Add a token.
    pub fn insert(&mut self, token: &str) {
        if !self.contains(token) {
            self.0.insert(token.to_string());
        }
    }

    /// Add `token` when `enabled` is set.
    pub fn insert_if(&mut self, enabled: bool, token: &str) {
        if enabled {
            self.insert(token);
        }
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t.eq_ignore_ascii_case(token))
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the tokens in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The space-joined attribute value, or `None` for an empty set.
    #[must_use]
    pub fn to_attr_value(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for RelTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
            first = false;
        }
        Ok(())
    }
}
