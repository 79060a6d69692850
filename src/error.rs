//! Error types for rs-linkrel.
//!
//! The rewriting and extraction entry points never fail: malformed markup
//! degrades to "leave the content alone". Errors come from the surfaces
//! around them (site setup, option loading, charset labels and stores).

/// Error type for link processing operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A home or site URL could not be parsed or carries no host.
    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl {
        /// The offending input.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Stored options could not be deserialized.
    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    /// A declared charset label is not known to the encoding tables.
    #[error("Unknown character encoding: {0}")]
    EncodingError(String),

    /// A link store rejected an operation.
    #[error("Link store error: {0}")]
    Store(String),
}

/// Result type alias for link processing operations.
pub type Result<T> = std::result::Result<T, Error>;
