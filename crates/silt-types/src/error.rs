use thiserror::Error;

/// Errors from foundation type construction and validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The supplied string is not valid lowercase hex.
    #[error("invalid hex digest: {0}")]
    InvalidHex(String),

    /// The digest length does not match the declared algorithm.
    #[error("invalid digest length: expected {expected} hex chars, got {actual}")]
    InvalidDigestLength { expected: usize, actual: usize },

    /// A marker could not be canonically encoded.
    #[error("marker encoding failed: {0}")]
    MarkerEncoding(String),
}
