use thiserror::Error;

/// Errors from transform construction and application.
#[derive(Debug, Error)]
pub enum PackError {
    /// A backward transform received input it cannot invert (malformed
    /// compressed data, invalid base64, non-JSON text).
    #[error("corrupt payload in {transform}: {reason}")]
    CorruptPayload { transform: String, reason: String },

    /// Decryption failed: wrong key, truncated input, or tampered ciphertext.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// Encryption could not be performed.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Compression could not be performed.
    #[error("compression failed: {0}")]
    CompressionFailed(String),

    /// Invalid transform configuration: bad key material, password without
    /// a seed, malformed key text.
    #[error("transform construction failed: {0}")]
    Construction(String),

    /// Structured-value (de)serialization failure in the JSON transform.
    #[error("json serialization failed: {0}")]
    Json(String),
}

impl PackError {
    pub(crate) fn corrupt(transform: &str, reason: impl ToString) -> Self {
        Self::CorruptPayload {
            transform: transform.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias for transform operations.
pub type PackResult<T> = Result<T, PackError>;
