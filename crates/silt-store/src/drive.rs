//! Filesystem-directory keeper.
//!
//! One file per key, directly under a root directory, filename equal to the
//! key. No subdirectory sharding — acceptable for the content-key volumes
//! this layout is specified for, and kept flat so entries stay greppable.
// TODO: shard keys into prefix subdirectories once stores regularly exceed
// what one directory handles comfortably.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::keeper::Keeper;

/// Keeper backed by a single filesystem directory.
#[derive(Debug)]
pub struct DriveKeeper {
    root: PathBuf,
}

impl DriveKeeper {
    /// Open an existing directory as a keeper root.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::Construction(format!(
                "keeper root is not a directory: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// Create the directory (if absent) and open it as a keeper root.
    pub fn create(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        if !root.exists() {
            let mut builder = fs::DirBuilder::new();
            #[cfg(unix)]
            {
                use std::os::unix::fs::DirBuilderExt;
                builder.mode(0o750);
            }
            builder.create(&root)?;
            debug!(root = %root.display(), "created keeper root");
        }
        Self::open(root)
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

/// Keys become filenames, so anything that could traverse out of the root
/// is rejected outright.
fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty()
        || key == "."
        || key == ".."
        || key.contains('/')
        || key.contains('\\')
        || key.contains('\0')
    {
        return Err(StoreError::Backend(format!("invalid keeper key: {key:?}")));
    }
    Ok(())
}

impl Keeper for DriveKeeper {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.path_for(key)?.is_file())
    }

    fn save(&self, key: &str, data: &[u8]) -> StoreResult<()> {
        let path = self.path_for(key)?;
        // Write into a temp file in the same directory and rename it into
        // place, so a concurrent load never sees a partially written entry.
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(data)?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    fn load(&self, key: &str) -> StoreResult<Vec<u8>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::KeyNotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
