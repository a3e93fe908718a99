use crate::error::StoreResult;

/// Minimal backend contract: a keyed byte store.
///
/// All implementations must satisfy these invariants:
/// - Keys are opaque strings; values are opaque byte buffers. The keeper
///   never interprets either.
/// - `save` over an existing key overwrites it. Content-addressed callers
///   only ever overwrite with identical bytes, so this is harmless there;
///   indirection records rely on it for updates.
/// - `load` of an absent key fails with `KeyNotFound`, never returns empty
///   bytes.
/// - Correctness under concurrent access is the keeper's responsibility
///   (a mutex-guarded map, the filesystem's atomic operations, a remote
///   store's own semantics). The layers above add no locking.
/// - All backend failures are propagated, never silently ignored.
pub trait Keeper: Send + Sync {
    /// Check whether `key` is present.
    fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Write `data` under `key`, overwriting any previous value.
    fn save(&self, key: &str, data: &[u8]) -> StoreResult<()>;

    /// Read the value stored under `key`.
    fn load(&self, key: &str) -> StoreResult<Vec<u8>>;

    /// Remove `key`. Returns `true` if it existed.
    fn delete(&self, key: &str) -> StoreResult<bool>;
}
