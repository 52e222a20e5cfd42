//! In-memory implementation of the ManifestStore trait.
//!
//! Primarily for testing. Same semantics as SQLite, no persistence.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use veritext_core::{ManifestId, Sha256Hash};

use crate::error::{Result, StoreError};
use crate::traits::{InsertResult, ManifestStore, StoredManifest};

/// In-memory store. Thread-safe via RwLock; all data is lost on drop.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Records indexed by manifest id.
    records: HashMap<ManifestId, StoredManifest>,

    /// Hash index: content hash -> ids of records carrying it, in
    /// insertion order (earliest first).
    by_hash: HashMap<Sha256Hash, Vec<ManifestId>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner::default()),
        }
    }

    // Poisoning maps to a StoreError, same contract as the SQLite backend.
    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::InvalidData(format!("lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::InvalidData(format!("lock poisoned: {}", e)))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ManifestStore for MemoryStore {
    async fn put(&self, record: &StoredManifest) -> Result<InsertResult> {
        let mut inner = self.write()?;

        if inner.records.contains_key(&record.manifest_id) {
            return Ok(InsertResult::AlreadyExists);
        }

        inner
            .by_hash
            .entry(*record.hash())
            .or_default()
            .push(record.manifest_id);
        inner.records.insert(record.manifest_id, record.clone());

        Ok(InsertResult::Inserted)
    }

    async fn get(&self, id: &ManifestId) -> Result<Option<StoredManifest>> {
        let inner = self.read()?;
        Ok(inner.records.get(id).cloned())
    }

    async fn get_by_hash(&self, hash: &Sha256Hash) -> Result<Option<StoredManifest>> {
        let inner = self.read()?;
        Ok(inner
            .by_hash
            .get(hash)
            .and_then(|ids| ids.first())
            .and_then(|id| inner.records.get(id))
            .cloned())
    }

    async fn delete(&self, id: &ManifestId) -> Result<bool> {
        let mut inner = self.write()?;

        let Some(record) = inner.records.remove(id) else {
            return Ok(false);
        };

        let hash = *record.hash();
        if let Some(ids) = inner.by_hash.get_mut(&hash) {
            ids.retain(|existing| existing != id);
            if ids.is_empty() {
                inner.by_hash.remove(&hash);
            }
        }

        Ok(true)
    }

    async fn count(&self) -> Result<u64> {
        let inner = self.read()?;
        Ok(inner.records.len() as u64)
    }
}
