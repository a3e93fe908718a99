use std::sync::Arc;

use crate::error::PackResult;

/// An invertible byte-to-byte operation.
///
/// `backward(forward(x))` must equal `x` for every input the transform
/// declares itself capable of handling. Implementations are stateless after
/// configuration, object-safe, and `Send + Sync` so they can be shared
/// across tapped store views in a `Vec<Arc<dyn Transform>>`.
pub trait Transform: Send + Sync {
    /// Human-readable name, used in error messages and logs.
    fn name(&self) -> &str;

    /// Apply the transform in the write direction.
    fn forward(&self, input: &[u8]) -> PackResult<Vec<u8>>;

    /// Invert the transform in the read direction.
    ///
    /// Must fail (never silently return garbage) when `output` is not a
    /// value `forward` could have produced.
    fn backward(&self, output: &[u8]) -> PackResult<Vec<u8>>;
}

/// An ordered pipeline of transforms.
///
/// `forward` runs the transforms left to right, feeding each one's output
/// into the next; `backward` runs them right to left. Cloning a conveyor is
/// cheap: the transforms themselves are shared.
#[derive(Clone, Default)]
pub struct Conveyor {
    transforms: Vec<Arc<dyn Transform>>,
}

impl Conveyor {
    /// Create an empty conveyor (identity pipeline).
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Return a new conveyor with `transform` appended at the end.
    ///
    /// The receiver is unchanged, so views layered over a shared conveyor
    /// never observe each other's configuration.
    pub fn with(&self, transform: impl Transform + 'static) -> Self {
        let mut transforms = self.transforms.clone();
        transforms.push(Arc::new(transform));
        Self { transforms }
    }

    /// Number of transforms in the pipeline.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Returns `true` if the pipeline is the identity.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Names of the transforms in application order.
    pub fn names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }

    /// Apply all transforms left to right.
    pub fn forward(&self, input: &[u8]) -> PackResult<Vec<u8>> {
        let mut data = input.to_vec();
        for transform in &self.transforms {
            data = transform.forward(&data)?;
        }
        Ok(data)
    }

    /// Invert all transforms right to left.
    pub fn backward(&self, output: &[u8]) -> PackResult<Vec<u8>> {
        let mut data = output.to_vec();
        for transform in self.transforms.iter().rev() {
            data = transform.backward(&data)?;
        }
        Ok(data)
    }
}

impl std::fmt::Debug for Conveyor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conveyor").field("transforms", &self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::Compression;
    use crate::encoding::Base64;
    use crate::encryption::Encryption;

    #[test]
    fn empty_conveyor_is_identity() {
        let conveyor = Conveyor::new();
        assert!(conveyor.is_empty());
        assert_eq!(conveyor.forward(b"abc").unwrap(), b"abc");
        assert_eq!(conveyor.backward(b"abc").unwrap(), b"abc");
    }

    #[test]
    fn with_does_not_mutate_receiver() {
        let base = Conveyor::new();
        let extended = base.with(Base64::new());
        assert!(base.is_empty());
        assert_eq!(extended.len(), 1);
    }

    #[test]
    fn forward_applies_left_to_right() {
        // compress-then-encode: the output must be valid base64 text.
        let conveyor = Conveyor::new()
            .with(Compression::default())
            .with(Base64::new());
        let out = conveyor.forward(b"hello hello hello").unwrap();
        assert!(out.iter().all(|b| b.is_ascii()));
    }

    #[test]
    fn backward_inverts_in_reverse_order() {
        let conveyor = Conveyor::new()
            .with(Compression::default())
            .with(Base64::new());
        let data = b"round trip through two transforms".to_vec();
        let wrapped = conveyor.forward(&data).unwrap();
        assert_eq!(conveyor.backward(&wrapped).unwrap(), data);
    }

    #[test]
    fn three_stage_roundtrip() {
        let conveyor = Conveyor::new()
            .with(Compression::new(9))
            .with(Encryption::generate())
            .with(Base64::new());
        let data: Vec<u8> = (0..=255).cycle().take(4096).collect();
        let wrapped = conveyor.forward(&data).unwrap();
        assert_ne!(wrapped, data);
        assert_eq!(conveyor.backward(&wrapped).unwrap(), data);
    }

    #[test]
    fn names_reflect_order() {
        let conveyor = Conveyor::new()
            .with(Compression::default())
            .with(Base64::new());
        assert_eq!(conveyor.names(), vec!["compression", "base64"]);
    }

    #[test]
    fn clones_share_transforms() {
        let conveyor = Conveyor::new().with(Encryption::generate());
        let clone = conveyor.clone();
        let wrapped = conveyor.forward(b"secret").unwrap();
        // The clone holds the same key, so it can invert the original's output.
        assert_eq!(clone.backward(&wrapped).unwrap(), b"secret");
    }
}
