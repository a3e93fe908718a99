use std::sync::Arc;

use tracing::{debug, trace};

use silt_hash::Algorithm;
use silt_pack::{Base64, Compression, Conveyor, Encryption, Json, Transform};
use silt_types::{Digest, Marker};

use crate::error::{StoreError, StoreResult};
use crate::keeper::Keeper;
use crate::link::Link;

/// The central store: content-addressed operations over a [`Keeper`],
/// optionally through an ordered transform pipeline.
///
/// A `Store` is a cheap handle: the keeper is shared behind an `Arc` and the
/// pipeline is a clone-on-extend [`Conveyor`]. Tapped views obtained with
/// [`Store::with_transform`] (or the convenience taps) are independent
/// handles over the same backing keeper — configuring one never mutates
/// another.
///
/// Content keys are computed over the *transformed* bytes, so the same
/// logical value pushed through different pipelines yields different keys:
/// the key identifies what is physically stored.
#[derive(Clone)]
pub struct Store {
    keeper: Arc<dyn Keeper>,
    algorithm: Algorithm,
    conveyor: Conveyor,
}

impl Store {
    /// Store over a keeper with the default algorithm (BLAKE2b-512) and an
    /// empty pipeline.
    pub fn new(keeper: impl Keeper + 'static) -> Self {
        Self::with_algorithm(keeper, Algorithm::default())
    }

    /// Store over a keeper with an explicit hash algorithm.
    pub fn with_algorithm(keeper: impl Keeper + 'static, algorithm: Algorithm) -> Self {
        Self {
            keeper: Arc::new(keeper),
            algorithm,
            conveyor: Conveyor::new(),
        }
    }

    /// Store over an already-shared keeper.
    pub fn from_shared(keeper: Arc<dyn Keeper>, algorithm: Algorithm) -> Self {
        Self {
            keeper,
            algorithm,
            conveyor: Conveyor::new(),
        }
    }

    /// The active hash algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The active transform pipeline.
    pub fn conveyor(&self) -> &Conveyor {
        &self.conveyor
    }

    // -----------------------------------------------------------------------
    // Tapped views
    // -----------------------------------------------------------------------

    /// A view of this store with one more transform appended to the
    /// pipeline. The receiver is unchanged.
    pub fn with_transform(&self, transform: impl Transform + 'static) -> Store {
        Store {
            keeper: Arc::clone(&self.keeper),
            algorithm: self.algorithm,
            conveyor: self.conveyor.with(transform),
        }
    }

    /// View with zstd compression at the default level.
    pub fn compression(&self) -> Store {
        self.with_transform(Compression::default())
    }

    /// View with zstd compression at an explicit level.
    pub fn compression_level(&self, level: i32) -> Store {
        self.with_transform(Compression::new(level))
    }

    /// View with the given encryption transform.
    ///
    /// Encryption is nonce-randomized, so this view's pipeline is not
    /// deterministic: see [`Store::push`] for what that means for content
    /// keys.
    pub fn encryption(&self, encryption: Encryption) -> Store {
        self.with_transform(encryption)
    }

    /// View with URL-safe base64 encoding.
    pub fn base64(&self) -> Store {
        self.with_transform(Base64::new())
    }

    /// View with JSON text normalization.
    pub fn json(&self) -> Store {
        self.with_transform(Json::new())
    }

    // -----------------------------------------------------------------------
    // Keeper-level operations (pipeline applies to values, never to keys)
    // -----------------------------------------------------------------------

    /// Check whether `key` is present. No hashing side effects.
    pub fn exists(&self, key: &str) -> StoreResult<bool> {
        self.keeper.exists(key)
    }

    /// Write `data` under an explicit key, through the pipeline.
    pub fn save(&self, key: &str, data: &[u8]) -> StoreResult<()> {
        let wrapped = self.conveyor.forward(data)?;
        self.keeper.save(key, &wrapped)?;
        trace!(key, bytes = wrapped.len(), "saved entry");
        Ok(())
    }

    /// Read the value under `key`, inverting the pipeline.
    pub fn load(&self, key: &str) -> StoreResult<Vec<u8>> {
        let wrapped = self.keeper.load(key)?;
        Ok(self.conveyor.backward(&wrapped)?)
    }

    /// Remove `key`. Untransformed pass-through.
    pub fn delete(&self, key: &str) -> StoreResult<bool> {
        self.keeper.delete(key)
    }

    // -----------------------------------------------------------------------
    // Content-addressed operations
    // -----------------------------------------------------------------------

    /// Compute the content key `data` would be stored under.
    ///
    /// Hashing happens on the transformed bytes; with an empty pipeline this
    /// is simply the hash of `data`. With a randomized transform in the
    /// pipeline (encryption) every call transforms to different bytes, so
    /// the result is a valid key only for the write that stores those exact
    /// bytes — it cannot predict or re-derive another push's key.
    pub fn hash(&self, data: &[u8]) -> StoreResult<Digest> {
        let wrapped = self.conveyor.forward(data)?;
        Ok(self.algorithm.hash(&wrapped))
    }

    /// Validate an externally supplied key against the active algorithm.
    pub fn parse_key(&self, s: &str) -> StoreResult<Digest> {
        Ok(self.algorithm.parse_digest(s)?)
    }

    /// Store `data` under its content key and return the key.
    ///
    /// Idempotent: pushing identical bytes twice is a single logical write.
    /// Safe under concurrent pushers of the same content — a racing double
    /// write stores identical bytes at the same key, a no-op duplication.
    ///
    /// Both properties hold only for deterministic pipelines. Through an
    /// [`Store::encryption`] view each push produces a fresh ciphertext, so
    /// identical plaintext pushed twice gets two distinct keys and two
    /// stored entries; the earlier ciphertext is orphaned exactly like
    /// content replaced through a [`Link`]. Callers who need dedup under
    /// encryption should address the data through a `Link` keyed by a
    /// marker of their choosing.
    pub fn push(&self, data: &[u8]) -> StoreResult<Digest> {
        let wrapped = self.conveyor.forward(data)?;
        let key = self.algorithm.hash(&wrapped);
        if !self.keeper.exists(key.as_str())? {
            self.keeper.save(key.as_str(), &wrapped)?;
            debug!(key = key.short(), bytes = wrapped.len(), "pushed entry");
        }
        Ok(key)
    }

    /// Load the content stored under `key`, failing with `KeyNotFound` if it
    /// is absent.
    pub fn pull(&self, key: &Digest) -> StoreResult<Vec<u8>> {
        if !self.keeper.exists(key.as_str())? {
            return Err(StoreError::KeyNotFound(key.to_string()));
        }
        self.load(key.as_str())
    }

    /// Pull then delete. Not atomic: a concurrent reader may observe the
    /// entry between the two steps.
    pub fn pop(&self, key: &Digest) -> StoreResult<Vec<u8>> {
        let data = self.pull(key)?;
        self.keeper.delete(key.as_str())?;
        debug!(key = key.short(), "popped entry");
        Ok(data)
    }

    /// Bind a [`Link`] view addressing content through `marker`.
    pub fn link(&self, marker: impl Into<Marker>) -> StoreResult<Link> {
        Link::new(marker.into(), self.clone())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("algorithm", &self.algorithm.name())
            .field("pipeline", &self.conveyor.names())
            .finish()
    }
}
