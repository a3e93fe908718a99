use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::keeper::Keeper;

/// In-memory, HashMap-based keeper.
///
/// Intended for tests, caches, and embedding. All entries live behind a
/// `RwLock`; values are cloned on read. Data is lost when the keeper is
/// dropped.
pub struct MemoryKeeper {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryKeeper {
    /// Create a new empty keeper.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Returns `true` if the keeper holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total bytes across all stored values.
    pub fn total_bytes(&self) -> u64 {
        self.entries
            .read()
            .map(|m| m.values().map(|v| v.len() as u64).sum())
            .unwrap_or(0)
    }

    /// Remove all entries.
    pub fn clear(&self) {
        if let Ok(mut map) = self.entries.write() {
            map.clear();
        }
    }

    /// Sorted list of all keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

impl Default for MemoryKeeper {
    fn default() -> Self {
        Self::new()
    }
}

impl Keeper for MemoryKeeper {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        let map = self
            .entries
            .read()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        Ok(map.contains_key(key))
    }

    fn save(&self, key: &str, data: &[u8]) -> StoreResult<()> {
        let mut map = self
            .entries
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        map.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn load(&self, key: &str) -> StoreResult<Vec<u8>> {
        let map = self
            .entries
            .read()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        map.get(key)
            .cloned()
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut map = self
            .entries
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        Ok(map.remove(key).is_some())
    }
}

impl std::fmt::Debug for MemoryKeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryKeeper")
            .field("entry_count", &self.len())
            .finish()
    }
}
