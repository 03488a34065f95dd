//! Error types and result aliases.
//!
//! Derivation preconditions surface as [`Error::InvalidInput`] with a message
//! naming the violated expectation; construction-time failures carry their
//! underlying cause.

use crate::canonical_json::CanonicalJsonError;

/// The result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building events or deriving keys.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A precondition on an argument was violated (empty or missing input).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Event JSON could not be parsed.
    #[error("malformed event JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value could not be canonicalized for hashing.
    #[error("canonicalization failed: {0}")]
    Canonical(#[from] CanonicalJsonError),
}

impl Error {
    /// Creates an invalid-input error with the given message.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
