use thiserror::Error;

use silt_types::TypeError;

/// Errors from hashing and digest validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashError {
    /// No algorithm is registered under the requested name.
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),

    /// An externally supplied digest failed validation for the algorithm.
    #[error(transparent)]
    InvalidDigest(#[from] TypeError),
}

/// Result alias for hashing operations.
pub type HashResult<T> = Result<T, HashError>;
