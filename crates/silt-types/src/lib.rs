//! Foundation types for silt.
//!
//! This crate provides the value types shared by every other silt crate.
//!
//! # Key Types
//!
//! - [`Digest`] — hex-encoded content key produced by a hash algorithm
//! - [`Marker`] — ordered caller-chosen values used to name content indirectly
//! - [`MarkerPart`] — a single marker component (string, integer, bytes, bool)
//! - [`TypeError`] — validation and encoding failures

pub mod digest;
pub mod error;
pub mod marker;

pub use digest::Digest;
pub use error::TypeError;
pub use marker::{Marker, MarkerPart};
