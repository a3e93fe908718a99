use tracing::{debug, warn};

use silt_store::{DriveKeeper, Keeper, MemoryKeeper, Store, StoreError, StoreResult};

/// Two-tier cache: a slow authoritative `src` store fronted by a fast `dst`
/// store.
///
/// The bridge speaks the same four keeper-level operations as any backend,
/// and implements [`Keeper`] itself, so a [`Store`] can be layered directly
/// on top of a bridge.
///
/// Values land in `dst` behind a [`silt_store::Link`] keyed by the caller's
/// key: the fast tier stays content-addressed internally while the bridge
/// accepts arbitrary opaque keys.
///
/// Key lifecycle: `absent → present-in-src-only → present-in-both` on the
/// first successful write or read-through. Only external eviction of the
/// `dst` entry moves a key back.
pub struct Bridge {
    src: Store,
    dst: Store,
}

/// Only these failures from the fast tier mean "not cached"; anything else
/// (backend I/O, pipeline failures) is a real fault and propagates.
fn is_cache_miss(err: &StoreError) -> bool {
    matches!(
        err,
        StoreError::KeyNotFound(_) | StoreError::CorruptLink { .. }
    )
}

impl Bridge {
    /// Compose a bridge from an authoritative store and a cache store.
    pub fn new(src: Store, dst: Store) -> Self {
        Self { src, dst }
    }

    /// Bridge with a fresh in-memory cache tier.
    pub fn with_memory_cache(src: Store) -> Self {
        Self::new(src, Store::new(MemoryKeeper::new()))
    }

    /// Bridge with a directory-backed cache tier. With `create` the
    /// directory is made if absent.
    pub fn with_drive_cache(
        src: Store,
        root: impl Into<std::path::PathBuf>,
        create: bool,
    ) -> StoreResult<Self> {
        let keeper = if create {
            DriveKeeper::create(root)?
        } else {
            DriveKeeper::open(root)?
        };
        Ok(Self::new(src, Store::new(keeper)))
    }

    /// The authoritative store.
    pub fn src(&self) -> &Store {
        &self.src
    }

    /// The cache store.
    pub fn dst(&self) -> &Store {
        &self.dst
    }

    /// True if the cache has a valid (non-dangling) entry for `key`, or the
    /// authoritative store has it.
    pub fn exists(&self, key: &str) -> StoreResult<bool> {
        if self.dst.link(key)?.exists()? {
            return Ok(true);
        }
        self.src.exists(key)
    }

    /// Write-through: `src` first (the durability-determining write), then
    /// the cache. A `src` failure aborts before any cache population.
    pub fn save(&self, key: &str, data: &[u8]) -> StoreResult<()> {
        self.src.save(key, data)?;
        self.dst.link(key)?.push(data)?;
        Ok(())
    }

    /// Read-through: try the cache, fall back to `src` on a miss, and
    /// opportunistically backfill the cache with what `src` returned.
    ///
    /// A backfill failure is logged and swallowed — the caller already has
    /// the data, and the next read will simply miss again.
    pub fn load(&self, key: &str) -> StoreResult<Vec<u8>> {
        match self.dst.link(key)?.pull() {
            Ok(data) => Ok(data),
            Err(e) if is_cache_miss(&e) => {
                let data = self.src.load(key)?;
                debug!(key, "cache miss, backfilling");
                if let Err(e) = self.dst.link(key)?.push(&data) {
                    warn!(key, error = %e, "cache backfill failed");
                }
                Ok(data)
            }
            Err(e) => Err(e),
        }
    }

    /// Remove from the cache, then from `src`. The `src` deletion result is
    /// authoritative.
    pub fn delete(&self, key: &str) -> StoreResult<bool> {
        match self.dst.link(key)?.delete() {
            Ok(_) => {}
            Err(e) if is_cache_miss(&e) => {}
            Err(e) => return Err(e),
        }
        self.src.delete(key)
    }
}

impl Keeper for Bridge {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Bridge::exists(self, key)
    }

    fn save(&self, key: &str, data: &[u8]) -> StoreResult<()> {
        Bridge::save(self, key, data)
    }

    fn load(&self, key: &str) -> StoreResult<Vec<u8>> {
        Bridge::load(self, key)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        Bridge::delete(self, key)
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("src", &self.src)
            .field("dst", &self.dst)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use silt_hash::Algorithm;

    fn shared_memory_store() -> (Arc<MemoryKeeper>, Store) {
        let keeper = Arc::new(MemoryKeeper::new());
        let store = Store::from_shared(keeper.clone(), Algorithm::default());
        (keeper, store)
    }

    // -----------------------------------------------------------------------
    // Read-through population
    // -----------------------------------------------------------------------

    #[test]
    fn load_backfills_cold_cache() {
        let (_, src) = shared_memory_store();
        src.save("k1", b"from src").unwrap();

        let bridge = Bridge::with_memory_cache(src);
        assert_eq!(bridge.load("k1").unwrap(), b"from src");

        // The cache now holds the value behind its own link.
        assert!(bridge.dst().link("k1").unwrap().exists().unwrap());
        assert_eq!(bridge.dst().link("k1").unwrap().pull().unwrap(), b"from src");
    }

    #[test]
    fn second_load_is_served_by_cache() {
        let (src_keeper, src) = shared_memory_store();
        src.save("k1", b"value").unwrap();

        let bridge = Bridge::with_memory_cache(src);
        bridge.load("k1").unwrap();

        // Remove from src: the cached copy still answers.
        src_keeper.delete("k1").unwrap();
        assert_eq!(bridge.load("k1").unwrap(), b"value");
    }

    #[test]
    fn load_missing_everywhere_is_key_not_found() {
        let (_, src) = shared_memory_store();
        let bridge = Bridge::with_memory_cache(src);
        assert!(bridge.load("ghost").unwrap_err().is_not_found());
    }

    #[test]
    fn corrupt_cache_record_falls_back_and_repairs() {
        let (_, src) = shared_memory_store();
        src.save("k", b"truth").unwrap();
        let bridge = Bridge::with_memory_cache(src);
        bridge.load("k").unwrap();

        // Scribble over the cache's indirection record.
        let marker_key = bridge.dst().link("k").unwrap().marker_key().clone();
        bridge.dst().save(marker_key.as_str(), b"garbage").unwrap();

        assert_eq!(bridge.load("k").unwrap(), b"truth");
        // Backfill repaired the record.
        assert_eq!(bridge.dst().link("k").unwrap().pull().unwrap(), b"truth");
    }

    // -----------------------------------------------------------------------
    // Write-through
    // -----------------------------------------------------------------------

    #[test]
    fn save_reaches_src_independent_of_cache() {
        let (src_keeper, src) = shared_memory_store();
        let bridge = Bridge::with_memory_cache(src);
        bridge.save("k", b"durable").unwrap();

        // Retrievable from src directly, bypassing the bridge entirely.
        assert_eq!(src_keeper.load("k").unwrap(), b"durable");
        // And the cache was populated.
        assert!(bridge.dst().link("k").unwrap().exists().unwrap());
    }

    #[test]
    fn failed_src_write_skips_cache_population() {
        // A drive-backed src rejects keys with path separators, so the
        // durable write fails before the cache is ever touched.
        let dir = tempfile::TempDir::new().unwrap();
        let src = Store::new(DriveKeeper::open(dir.path()).unwrap());
        let bridge = Bridge::with_memory_cache(src);
        assert!(bridge.save("bad/key", b"x").is_err());
        assert!(!bridge.dst().link("bad/key").unwrap().exists().unwrap());
    }

    // -----------------------------------------------------------------------
    // Exists / delete
    // -----------------------------------------------------------------------

    #[test]
    fn exists_prefers_cache_then_src() {
        let (_, src) = shared_memory_store();
        src.save("only-src", b"v").unwrap();
        let bridge = Bridge::with_memory_cache(src);

        assert!(bridge.exists("only-src").unwrap());
        assert!(!bridge.exists("nowhere").unwrap());

        bridge.load("only-src").unwrap();
        assert!(bridge.exists("only-src").unwrap());
    }

    #[test]
    fn delete_removes_both_tiers_and_reports_src_result() {
        let (src_keeper, src) = shared_memory_store();
        let bridge = Bridge::with_memory_cache(src);
        bridge.save("k", b"v").unwrap();

        assert!(bridge.delete("k").unwrap());
        assert!(!src_keeper.exists("k").unwrap());
        assert!(!bridge.dst().link("k").unwrap().exists().unwrap());

        // Second delete: src reports false, and that result is authoritative.
        assert!(!bridge.delete("k").unwrap());
    }

    // -----------------------------------------------------------------------
    // Bridge as a keeper
    // -----------------------------------------------------------------------

    #[test]
    fn store_layers_over_bridge() {
        let (src_keeper, src) = shared_memory_store();
        let bridge = Bridge::with_memory_cache(src);
        let store = Store::new(bridge);

        let key = store.push(b"tiered content").unwrap();
        assert_eq!(store.pull(&key).unwrap(), b"tiered content");
        // The durable tier holds the entry under the content key.
        assert!(src_keeper.exists(key.as_str()).unwrap());
    }

    #[test]
    fn drive_cache_constructor_works() {
        let dir = tempfile::TempDir::new().unwrap();
        let (_, src) = shared_memory_store();
        src.save("k", b"cached to disk").unwrap();

        let bridge = Bridge::with_drive_cache(src, dir.path().join("cache"), true).unwrap();
        assert_eq!(bridge.load("k").unwrap(), b"cached to disk");
        assert!(bridge.dst().link("k").unwrap().exists().unwrap());
    }
}
