//! # Key-Value Stores
//!
//! Backends for [`super::KvLedger`].

use crate::domain::errors::LedgerError;
use crate::ports::outbound::KeyValueStore;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// In-memory key-value store for unit tests.
#[derive(Debug, Default)]
pub struct InMemoryKVStore {
    data: HashMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), LedgerError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, LedgerError> {
        Ok(self.data.contains_key(key))
    }
}

/// File-backed key-value store.
///
/// Keeps the whole map in memory and rewrites a bincode snapshot on every
/// `put`: written to `<path>.tmp`, synced, then renamed over `<path>`, so a
/// crash leaves either the old or the new snapshot.
#[derive(Debug)]
pub struct FileBackedKVStore {
    data: HashMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading an existing snapshot if present.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let bytes = fs::read(&path).map_err(|e| LedgerError::Storage(e.to_string()))?;
            let data: HashMap<Vec<u8>, Vec<u8>> = bincode::deserialize(&bytes)
                .map_err(|e| LedgerError::Serialization(e.to_string()))?;
            tracing::info!(
                "[stack] 💾 Loaded {} keys from {}",
                data.len(),
                path.display()
            );
            data
        } else {
            tracing::info!("[stack] 📁 No existing storage file at {}", path.display());
            HashMap::new()
        };

        Ok(Self { data, path })
    }

    /// Location of the snapshot.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_to_file(&self) -> Result<(), LedgerError> {
        let io_err = |e: std::io::Error| LedgerError::Storage(e.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let bytes =
            bincode::serialize(&self.data).map_err(|e| LedgerError::Serialization(e.to_string()))?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        fs::rename(&temp_path, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), LedgerError> {
        let previous = self.data.insert(key.to_vec(), value.to_vec());
        if let Err(e) = self.save_to_file() {
            // Keep memory in step with disk.
            match previous {
                Some(old) => self.data.insert(key.to_vec(), old),
                None => self.data.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, LedgerError> {
        Ok(self.data.contains_key(key))
    }
}
