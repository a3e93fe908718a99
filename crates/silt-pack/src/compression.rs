use crate::error::{PackError, PackResult};
use crate::transform::Transform;

/// Default zstd compression level. Matches zstd's own default and keeps the
/// speed/ratio balance sensible for mixed content.
pub const DEFAULT_LEVEL: i32 = 3;

/// zstd compression transform.
///
/// `forward` compresses at the configured level; `backward` decompresses and
/// fails with [`PackError::CorruptPayload`] on malformed input rather than
/// returning garbage.
#[derive(Clone, Copy, Debug)]
pub struct Compression {
    level: i32,
}

impl Compression {
    /// Compression at an explicit zstd level (1–22; 0 means the default).
    pub fn new(level: i32) -> Self {
        Self { level }
    }

    /// The configured level.
    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for Compression {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL)
    }
}

impl Transform for Compression {
    fn name(&self) -> &str {
        "compression"
    }

    fn forward(&self, input: &[u8]) -> PackResult<Vec<u8>> {
        zstd::encode_all(input, self.level).map_err(|e| PackError::CompressionFailed(e.to_string()))
    }

    fn backward(&self, output: &[u8]) -> PackResult<Vec<u8>> {
        zstd::decode_all(output).map_err(|e| PackError::corrupt("compression", e))
    }
}
