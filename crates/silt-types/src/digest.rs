use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Content-addressed key for stored bytes.
///
/// A `Digest` is the lowercase hex encoding of a hash over the physically
/// stored bytes. Identical content always produces the same `Digest`, making
/// entries deduplicatable and verifiable. Different algorithms produce
/// different digest lengths (128 hex chars for BLAKE2b-512, 64 for BLAKE3,
/// and so on), so the length is part of the value, not a global constant.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Wrap an already-computed lowercase hex digest.
    ///
    /// Intended for hash implementations; external input should go through
    /// [`Digest::parse`] so length and charset are validated.
    pub fn from_hex_unchecked(hex: String) -> Self {
        Self(hex)
    }

    /// Parse an externally supplied digest, validating hex charset and the
    /// exact length required by the producing algorithm.
    pub fn parse(s: &str, expected_hex_len: usize) -> Result<Self, TypeError> {
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidHex(s.to_string()));
        }
        if s.len() != expected_hex_len {
            return Err(TypeError::InvalidDigestLength {
                expected: expected_hex_len,
                actual: s.len(),
            });
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// The hex string form, as used for keeper keys.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of hex characters in this digest.
    pub fn hex_len(&self) -> usize {
        self.0.len()
    }

    /// Short form (first 8 hex characters) for log output.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(8)]
    }

    /// The raw digest bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypeError> {
        hex::decode(&self.0).map_err(|e| TypeError::InvalidHex(e.to_string()))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
