//! Content hashing for silt.
//!
//! Every stored entry is keyed by the hex digest of its physical bytes. This
//! crate provides the [`Algorithm`] registry: named hash algorithms selected
//! at store construction time, all feeding input through fixed-size blocks so
//! arbitrarily large buffers hash in bounded working memory.
//!
//! - `blake2b` — BLAKE2b-512, 128 hex chars (default)
//! - `blake3` — BLAKE3, 64 hex chars
//! - `sha512` — SHA-512, 128 hex chars
//! - `xxh3` — XXH3-64, 16 hex chars (fast, non-cryptographic)

pub mod algorithm;
pub mod error;

pub use algorithm::Algorithm;
pub use error::{HashError, HashResult};
