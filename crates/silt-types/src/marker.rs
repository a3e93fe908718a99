//! Markers: caller-chosen values that name content indirectly.
//!
//! A marker is an ordered sequence of [`MarkerPart`] values. It is
//! canonically serialized with bincode and hashed to produce a marker key in
//! the same digest space as content keys. The part model is deliberately
//! closed (strings, integers, bytes, booleans) so marker keys are
//! deterministic across processes and releases — arbitrary object graphs are
//! not part of the public content model.

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// One component of a [`Marker`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerPart {
    /// UTF-8 text.
    Str(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Boolean flag.
    Bool(bool),
}

impl From<&str> for MarkerPart {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for MarkerPart {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for MarkerPart {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for MarkerPart {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<u64> for MarkerPart {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<&[u8]> for MarkerPart {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for MarkerPart {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<bool> for MarkerPart {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// An ordered sequence of caller-chosen values addressing content by meaning
/// rather than by digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Marker(Vec<MarkerPart>);

impl Marker {
    /// Create an empty marker.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append one part, builder style.
    pub fn with(mut self, part: impl Into<MarkerPart>) -> Self {
        self.0.push(part.into());
        self
    }

    /// The parts in order.
    pub fn parts(&self) -> &[MarkerPart] {
        &self.0
    }

    /// Returns `true` if the marker has no parts.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical byte serialization, hashed by the store to produce the
    /// marker key. Deterministic: equal markers always encode identically.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypeError> {
        bincode::serialize(&self.0).map_err(|e| TypeError::MarkerEncoding(e.to_string()))
    }
}

impl From<MarkerPart> for Marker {
    fn from(part: MarkerPart) -> Self {
        Self(vec![part])
    }
}

impl From<&str> for Marker {
    fn from(value: &str) -> Self {
        Self(vec![MarkerPart::from(value)])
    }
}

impl From<String> for Marker {
    fn from(value: String) -> Self {
        Self(vec![MarkerPart::from(value)])
    }
}

impl From<Vec<MarkerPart>> for Marker {
    fn from(parts: Vec<MarkerPart>) -> Self {
        Self(parts)
    }
}

impl<A> From<(A,)> for Marker
where
    A: Into<MarkerPart>,
{
    fn from(value: (A,)) -> Self {
        Self(vec![value.0.into()])
    }
}

impl<A, B> From<(A, B)> for Marker
where
    A: Into<MarkerPart>,
    B: Into<MarkerPart>,
{
    fn from(value: (A, B)) -> Self {
        Self(vec![value.0.into(), value.1.into()])
    }
}

impl<A, B, C> From<(A, B, C)> for Marker
where
    A: Into<MarkerPart>,
    B: Into<MarkerPart>,
    C: Into<MarkerPart>,
{
    fn from(value: (A, B, C)) -> Self {
        Self(vec![value.0.into(), value.1.into(), value.2.into()])
    }
}

impl<A, B, C, D> From<(A, B, C, D)> for Marker
where
    A: Into<MarkerPart>,
    B: Into<MarkerPart>,
    C: Into<MarkerPart>,
    D: Into<MarkerPart>,
{
    fn from(value: (A, B, C, D)) -> Self {
        Self(vec![
            value.0.into(),
            value.1.into(),
            value.2.into(),
            value.3.into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_is_deterministic() {
        let a = Marker::from(("users", 42i64));
        let b = Marker::from(("users", 42i64));
        assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
    }

    #[test]
    fn different_markers_encode_differently() {
        let a = Marker::from(("users", 42i64)).to_bytes().unwrap();
        let b = Marker::from(("users", 43i64)).to_bytes().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn part_order_matters() {
        let a = Marker::from(("a", "b")).to_bytes().unwrap();
        let b = Marker::from(("b", "a")).to_bytes().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn tuple_conversions() {
        let marker = Marker::from(("users", 42i64, true));
        assert_eq!(
            marker.parts(),
            &[
                MarkerPart::Str("users".into()),
                MarkerPart::Int(42),
                MarkerPart::Bool(true),
            ]
        );
    }

    #[test]
    fn builder_matches_tuple() {
        let built = Marker::new().with("users").with(42i64);
        let tupled = Marker::from(("users", 42i64));
        assert_eq!(built, tupled);
        assert_eq!(built.to_bytes().unwrap(), tupled.to_bytes().unwrap());
    }

    #[test]
    fn single_string_marker() {
        let marker = Marker::from("settings");
        assert_eq!(marker.parts().len(), 1);
        assert!(!marker.is_empty());
    }

    #[test]
    fn int_and_uint_are_distinct() {
        let signed = Marker::new().with(42i64).to_bytes().unwrap();
        let unsigned = Marker::new().with(42u64).to_bytes().unwrap();
        assert_ne!(signed, unsigned);
    }

    #[test]
    fn bytes_part_roundtrips_every_value() {
        let all: Vec<u8> = (0..=255).collect();
        let marker = Marker::new().with(all.clone());
        assert_eq!(marker.parts(), &[MarkerPart::Bytes(all)]);
        marker.to_bytes().unwrap();
    }
}
