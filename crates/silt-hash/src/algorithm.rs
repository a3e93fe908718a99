use std::fmt;

use blake2::Digest as _;
use silt_types::Digest;

use crate::error::{HashError, HashResult};

/// Input is fed to the hasher state in blocks of this size, so a large
/// buffer never has to be copied or reallocated to be hashed.
const BLOCK_SIZE: usize = 1 << 20;

/// A named content-hash algorithm.
///
/// The algorithm determines both how content keys are computed and how long
/// a valid digest is, so externally supplied keys can be validated before
/// they ever reach a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// BLAKE2b-512. The default: 512-bit digest, 128 hex chars.
    Blake2b,
    /// BLAKE3, 256-bit digest, 64 hex chars.
    Blake3,
    /// SHA-512, 512-bit digest, 128 hex chars.
    Sha512,
    /// XXH3-64, 64-bit digest, 16 hex chars. Fast but not collision
    /// resistant against adversarial input; for trusted-content use only.
    Xxh3,
}

impl Algorithm {
    /// Look up an algorithm by its registered name.
    pub fn by_name(name: &str) -> HashResult<Self> {
        match name {
            "blake2b" => Ok(Self::Blake2b),
            "blake3" => Ok(Self::Blake3),
            "sha512" => Ok(Self::Sha512),
            "xxh3" => Ok(Self::Xxh3),
            other => Err(HashError::UnknownAlgorithm(other.to_string())),
        }
    }

    /// The registered name of this algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blake2b => "blake2b",
            Self::Blake3 => "blake3",
            Self::Sha512 => "sha512",
            Self::Xxh3 => "xxh3",
        }
    }

    /// Length of a valid digest in hex characters.
    pub fn digest_hex_len(&self) -> usize {
        match self {
            Self::Blake2b | Self::Sha512 => 128,
            Self::Blake3 => 64,
            Self::Xxh3 => 16,
        }
    }

    /// Hash a byte buffer into a content key.
    pub fn hash(&self, data: &[u8]) -> Digest {
        let hex = match self {
            Self::Blake2b => {
                let mut hasher = blake2::Blake2b512::new();
                for block in data.chunks(BLOCK_SIZE) {
                    hasher.update(block);
                }
                hex::encode(hasher.finalize())
            }
            Self::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                for block in data.chunks(BLOCK_SIZE) {
                    hasher.update(block);
                }
                hasher.finalize().to_hex().to_string()
            }
            Self::Sha512 => {
                let mut hasher = sha2::Sha512::new();
                for block in data.chunks(BLOCK_SIZE) {
                    hasher.update(block);
                }
                hex::encode(hasher.finalize())
            }
            Self::Xxh3 => {
                let mut hasher = xxhash_rust::xxh3::Xxh3::new();
                for block in data.chunks(BLOCK_SIZE) {
                    hasher.update(block);
                }
                format!("{:016x}", hasher.digest())
            }
        };
        Digest::from_hex_unchecked(hex)
    }

    /// Parse and validate an externally supplied digest string.
    pub fn parse_digest(&self, s: &str) -> HashResult<Digest> {
        Ok(Digest::parse(s, self.digest_hex_len())?)
    }

    /// Verify that `data` hashes to `expected`.
    pub fn verify(&self, data: &[u8], expected: &Digest) -> bool {
        self.hash(data) == *expected
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Blake2b
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
