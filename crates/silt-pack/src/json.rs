//! Constrained structured-value serialization.
//!
//! The public content model of silt is byte buffers; callers serialize
//! structured values before pushing. `Json` is the convenience for that:
//! any `serde`-serializable value maps to compact JSON bytes and back.
//!
//! This is deliberately narrower than a general object-graph serializer:
//! closures, trait objects, and non-serde types are not representable. That
//! gap is by contract — marker keys and stored payloads must stay
//! deterministic and portable across processes.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{PackError, PackResult};
use crate::transform::Transform;

/// JSON structured-value transform.
#[derive(Clone, Copy, Debug, Default)]
pub struct Json;

impl Json {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a structured value to compact JSON bytes.
    pub fn to_payload<T: Serialize>(value: &T) -> PackResult<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| PackError::Json(e.to_string()))
    }

    /// Restore a structured value from JSON bytes.
    pub fn from_payload<T: DeserializeOwned>(bytes: &[u8]) -> PackResult<T> {
        serde_json::from_slice(bytes).map_err(|e| PackError::Json(e.to_string()))
    }
}

/// At the byte-pipeline level the transform normalizes JSON text to its
/// compact form on `forward` and validates it on `backward`. Inputs that are
/// not valid JSON are rejected in both directions, so the round-trip law
/// holds over the declared domain (valid JSON text).
impl Transform for Json {
    fn name(&self) -> &str {
        "json"
    }

    fn forward(&self, input: &[u8]) -> PackResult<Vec<u8>> {
        let value: serde_json::Value =
            serde_json::from_slice(input).map_err(|e| PackError::Json(e.to_string()))?;
        Json::to_payload(&value)
    }

    fn backward(&self, output: &[u8]) -> PackResult<Vec<u8>> {
        let value: serde_json::Value =
            serde_json::from_slice(output).map_err(|e| PackError::corrupt("json", e))?;
        Json::to_payload(&value)
    }
}
