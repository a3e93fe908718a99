//! Invertible byte transforms for silt.
//!
//! A [`Transform`] is a named pair of operations, `forward` and `backward`,
//! that are exact inverses over the transform's declared input domain.
//! Transforms compose into a [`Conveyor`]: an ordered pipeline applied
//! left-to-right on write and right-to-left on read.
//!
//! # Transforms
//!
//! - [`Compression`] — zstd at a configurable level
//! - [`Encryption`] — AES-256-GCM with a fresh random nonce per encryption
//! - [`Base64`] — URL-safe base64, round-trips every byte value
//! - [`Json`] — constrained structured-value convenience (serde only; no
//!   closures or arbitrary object graphs)

pub mod compression;
pub mod encoding;
pub mod encryption;
pub mod error;
pub mod json;
pub mod transform;

pub use compression::Compression;
pub use encoding::Base64;
pub use encryption::Encryption;
pub use error::{PackError, PackResult};
pub use json::Json;
pub use transform::{Conveyor, Transform};
