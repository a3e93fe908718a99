use thiserror::Error;

use silt_hash::HashError;
use silt_pack::PackError;
use silt_types::TypeError;

/// Errors from store, keeper, and link operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested key is not present in the backend.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// I/O failure in a filesystem-backed keeper.
    #[error("backend I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Non-I/O backend failure (poisoned lock, backend-specific fault).
    #[error("backend error: {0}")]
    Backend(String),

    /// A transform in the active pipeline failed.
    #[error(transparent)]
    Pack(#[from] PackError),

    /// Hashing misuse: unknown algorithm or invalid digest.
    #[error(transparent)]
    Hash(#[from] HashError),

    /// Foundation type validation or encoding failure.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// A link's indirection record does not decode to a valid content key.
    #[error("corrupt link record at marker {marker}: {reason}")]
    CorruptLink { marker: String, reason: String },

    /// Invalid collaborator or configuration at construction time.
    #[error("construction failed: {0}")]
    Construction(String),
}

impl StoreError {
    /// Returns `true` if the error means "the thing is not there", as
    /// opposed to "something broke while looking".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
