use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;

use crate::error::{PackError, PackResult};
use crate::transform::Transform;

/// URL-safe base64 encoding transform.
///
/// Chosen over text encodings because it round-trips every byte value, which
/// compressed and encrypted payloads require. The output alphabet is safe in
/// URLs and filenames.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base64;

impl Base64 {
    pub fn new() -> Self {
        Self
    }
}

impl Transform for Base64 {
    fn name(&self) -> &str {
        "base64"
    }

    fn forward(&self, input: &[u8]) -> PackResult<Vec<u8>> {
        Ok(URL_SAFE.encode(input).into_bytes())
    }

    fn backward(&self, output: &[u8]) -> PackResult<Vec<u8>> {
        URL_SAFE
            .decode(output)
            .map_err(|e| PackError::corrupt("base64", e))
    }
}
