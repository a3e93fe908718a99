use tracing::debug;

use silt_types::{Digest, Marker};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// Marker indirection: address content by caller-chosen values instead of
/// its digest.
///
/// A `Link` hashes the canonical serialization of its marker once, at
/// construction, to get a stable *marker key*. The store holds, at that key,
/// an indirection record: the content key of the payload, as hex text. All
/// operations go through that one extra hop.
///
/// Re-pushing through the same link overwrites the indirection record; the
/// previously referenced content entry stays in place, orphaned. Nothing
/// here counts references or reclaims orphans, and deleting one link never
/// touches another link's record even when both point at the same content.
pub struct Link {
    marker_key: Digest,
    store: Store,
}

impl Link {
    /// Bind a link for `marker` over `store`.
    ///
    /// The marker key is the store algorithm's hash of the marker's
    /// canonical bytes, computed outside the transform pipeline so it stays
    /// deterministic even when the pipeline is randomized (encryption).
    pub(crate) fn new(marker: Marker, store: Store) -> StoreResult<Self> {
        let bytes = marker.to_bytes()?;
        let marker_key = store.algorithm().hash(&bytes);
        Ok(Self { marker_key, store })
    }

    /// The stable key the indirection record lives under.
    pub fn marker_key(&self) -> &Digest {
        &self.marker_key
    }

    /// Resolve the indirection record to the content key it points at.
    fn resolve(&self) -> StoreResult<Digest> {
        let record = self.store.load(self.marker_key.as_str())?;
        let text = String::from_utf8(record).map_err(|_| StoreError::CorruptLink {
            marker: self.marker_key.to_string(),
            reason: "indirection record is not UTF-8".to_string(),
        })?;
        self.store
            .parse_key(&text)
            .map_err(|e| StoreError::CorruptLink {
                marker: self.marker_key.to_string(),
                reason: e.to_string(),
            })
    }

    /// The content key this link currently points at.
    pub fn key(&self) -> StoreResult<Digest> {
        self.resolve()
    }

    /// Two-hop existence check: true only if the marker key is present AND
    /// the content it points at is present. A dangling or corrupt
    /// indirection reports `false`, never an error.
    pub fn exists(&self) -> StoreResult<bool> {
        if !self.store.exists(self.marker_key.as_str())? {
            return Ok(false);
        }
        match self.resolve() {
            Ok(content_key) => self.store.exists(content_key.as_str()),
            Err(StoreError::KeyNotFound(_)) | Err(StoreError::CorruptLink { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Push `data` as content and point this link at it.
    ///
    /// Overwriting is intentional: distinct data pushed under the same
    /// marker replaces what the marker resolves to. The old content entry is
    /// left in place.
    pub fn push(&self, data: &[u8]) -> StoreResult<Digest> {
        let content_key = self.store.push(data)?;
        self.store
            .save(self.marker_key.as_str(), content_key.as_str().as_bytes())?;
        debug!(
            marker = self.marker_key.short(),
            content = content_key.short(),
            "link updated"
        );
        Ok(content_key)
    }

    /// Resolve and load the linked content. Fails with `KeyNotFound` if
    /// either hop is missing.
    pub fn pull(&self) -> StoreResult<Vec<u8>> {
        let content_key = self.resolve()?;
        self.store.pull(&content_key)
    }

    /// Resolve, then remove both the indirection record and the content
    /// entry, returning the content.
    pub fn pop(&self) -> StoreResult<Vec<u8>> {
        let content_key = self.resolve()?;
        self.store.delete(self.marker_key.as_str())?;
        self.store.pop(&content_key)
    }

    /// Remove the indirection record and the content entry it points at.
    ///
    /// Returns the content deletion result. Content shared with other
    /// markers is deleted regardless — links are not reference counted.
    pub fn delete(&self) -> StoreResult<bool> {
        let content_key = self.resolve()?;
        self.store.delete(self.marker_key.as_str())?;
        let deleted = self.store.delete(content_key.as_str())?;
        debug!(marker = self.marker_key.short(), "link deleted");
        Ok(deleted)
    }
}

impl std::fmt::Debug for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Link")
            .field("marker_key", &self.marker_key)
            .finish()
    }
}
