//! # Filesystem-backed key/value store
//!
//! [`FileStore`] keeps each key in its own file under a base directory. It is the
//! native counterpart of the browser's `localStorage`, used when the client runs as a
//! desktop build or in tests that need persistence across store instances.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── auth-storage        # value of key "auth-storage"
//! └── auth-storage.tmp    # only present while a write is in flight
//! ```
//!
//! Writes go to a sibling `.tmp` file which is then renamed over the target, so a
//! crash mid-write leaves either the old value or the new one, never a torn record.
//!
//! ## Platform data directories
//!
//! [`FileStore::default_location`] resolves `<data_dir>/climate-portal` via
//! [`dirs::data_dir()`], falling back to the working directory.

use std::path::{Path, PathBuf};

use crate::{KeyValueStore, StoreError};

const APP_DIR: &str = "climate-portal";

/// Filesystem-backed store for native targets.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Store rooted at the platform data directory.
    pub fn default_location() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::new(base)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key)?;
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        std::fs::create_dir_all(&self.base)?;
        let tmp = self.base.join(format!("{key}.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
