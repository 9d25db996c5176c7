//! Durable record store backed by one JSON file per key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{StorageBackend, StorageError};

/// A record store that survives restarts.
///
/// Each key maps to `<dir>/<key>.json`. Writes go through a temporary file
/// and an atomic rename, so a crash mid-write leaves the previous snapshot
/// intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `dir`. The directory is created on first
    /// write, not here.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this store writes under.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        // Keys are fixed application constants; reject anything that would
        // escape the storage directory.
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StorageBackend for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}
