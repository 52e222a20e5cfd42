//! SQLite implementation of the ManifestStore trait.
//!
//! Primary storage backend: rusqlite with bundled SQLite behind a Mutex.
//! Manifests are stored as their wire JSON so records survive schema
//! additions; signature and keys as raw blobs.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use veritext_core::{
    Ed25519PublicKey, Ed25519Signature, Manifest, ManifestId, Sha256Hash, SignedManifest,
};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{InsertResult, ManifestStore, StoredManifest};

/// SQLite-based store implementation.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path, creating it and running
    /// migrations as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database. Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| {
            StoreError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
                Some(format!("mutex poisoned: {}", e)),
            ))
        })?;
        f(&conn)
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<(StoredManifest, String)> {
    let manifest_id_bytes: Vec<u8> = row.get("manifest_id")?;
    let manifest_json: String = row.get("manifest_json")?;
    let signature_bytes: Vec<u8> = row.get("signature")?;
    let public_key_bytes: Vec<u8> = row.get("public_key")?;
    let created_at: i64 = row.get("created_at")?;

    let manifest_id = ManifestId::from_bytes(manifest_id_bytes.try_into().map_err(|_| {
        rusqlite::Error::InvalidColumnType(0, "manifest_id".into(), rusqlite::types::Type::Blob)
    })?);
    let signature = Ed25519Signature::from_bytes(signature_bytes.try_into().map_err(|_| {
        rusqlite::Error::InvalidColumnType(3, "signature".into(), rusqlite::types::Type::Blob)
    })?);
    let public_key = Ed25519PublicKey::from_bytes(public_key_bytes.try_into().map_err(|_| {
        rusqlite::Error::InvalidColumnType(4, "public_key".into(), rusqlite::types::Type::Blob)
    })?);

    // Manifest JSON is parsed by the caller so serde errors map to
    // StoreError::Serialization rather than a database error.
    let record = StoredManifest {
        manifest_id,
        signed: SignedManifest {
            manifest: placeholder_manifest(),
            signature,
            public_key,
        },
        created_at,
    };

    Ok((record, manifest_json))
}

// Replaced by the parsed manifest before any record leaves this module.
fn placeholder_manifest() -> Manifest {
    Manifest {
        hash: Sha256Hash::from_bytes([0u8; 32]),
        timestamp: String::new(),
        metadata: None,
        version: String::new(),
    }
}

fn finish_record((mut record, manifest_json): (StoredManifest, String)) -> Result<StoredManifest> {
    record.signed.manifest = serde_json::from_str(&manifest_json)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(record)
}

#[async_trait]
impl ManifestStore for SqliteStore {
    async fn put(&self, record: &StoredManifest) -> Result<InsertResult> {
        let manifest_json = serde_json::to_string(&record.signed.manifest)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let result = self.with_conn(|conn| {
            let exists: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM manifests WHERE manifest_id = ?1",
                    params![record.manifest_id.as_bytes()],
                    |row| row.get(0),
                )
                .optional()?;

            if exists.is_some() {
                return Ok(InsertResult::AlreadyExists);
            }

            conn.execute(
                "INSERT INTO manifests
                    (manifest_id, hash, manifest_json, signature, public_key, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.manifest_id.as_bytes(),
                    record.hash().as_bytes(),
                    manifest_json,
                    record.signed.signature.as_bytes().as_slice(),
                    record.signed.public_key.as_bytes(),
                    record.created_at,
                ],
            )?;

            Ok(InsertResult::Inserted)
        })?;

        debug!(manifest_id = %record.manifest_id, ?result, "put manifest");
        Ok(result)
    }

    async fn get(&self, id: &ManifestId) -> Result<Option<StoredManifest>> {
        let row = self.with_conn(|conn| {
            conn.query_row(
                "SELECT manifest_id, hash, manifest_json, signature, public_key, created_at
                 FROM manifests WHERE manifest_id = ?1",
                params![id.as_bytes()],
                row_to_record,
            )
            .optional()
            .map_err(StoreError::from)
        })?;

        row.map(finish_record).transpose()
    }

    async fn get_by_hash(&self, hash: &Sha256Hash) -> Result<Option<StoredManifest>> {
        let row = self.with_conn(|conn| {
            conn.query_row(
                "SELECT manifest_id, hash, manifest_json, signature, public_key, created_at
                 FROM manifests WHERE hash = ?1
                 ORDER BY created_at ASC, manifest_id ASC
                 LIMIT 1",
                params![hash.as_bytes()],
                row_to_record,
            )
            .optional()
            .map_err(StoreError::from)
        })?;

        row.map(finish_record).transpose()
    }

    async fn delete(&self, id: &ManifestId) -> Result<bool> {
        let deleted = self.with_conn(|conn| {
            let affected = conn.execute(
                "DELETE FROM manifests WHERE manifest_id = ?1",
                params![id.as_bytes()],
            )?;
            Ok(affected > 0)
        })?;

        debug!(manifest_id = %id, deleted, "delete manifest");
        Ok(deleted)
    }

    async fn count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM manifests", [], |row| row.get(0))?;
            Ok(count as u64)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use veritext_core::{Keypair, ManifestBuilder, Metadata};

    fn make_record(keypair: &Keypair, text: &str, timestamp: &str) -> StoredManifest {
        let metadata: Option<Metadata> = match json!({"author": "alice"}) {
            serde_json::Value::Object(map) => Some(map),
            _ => unreachable!(),
        };
        let manifest = ManifestBuilder::new()
            .timestamp(timestamp)
            .build(text, metadata)
            .unwrap();
        let signature = keypair.sign(&manifest.canonical_bytes());
        let signed = SignedManifest {
            manifest,
            signature,
            public_key: keypair.public_key(),
        };
        StoredManifest {
            manifest_id: signed.compute_id(),
            signed,
            created_at: 1_750_000_000_000,
        }
    }

    #[tokio::test]
    async fn test_sqlite_roundtrip() {
        let store = SqliteStore::open_memory().unwrap();
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let record = make_record(&keypair, "hello", "2026-01-14T12:00:00.000Z");

        assert_eq!(store.put(&record).await.unwrap(), InsertResult::Inserted);
        let fetched = store.get(&record.manifest_id).await.unwrap().unwrap();
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn test_sqlite_put_idempotent() {
        let store = SqliteStore::open_memory().unwrap();
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let record = make_record(&keypair, "hello", "2026-01-14T12:00:00.000Z");

        assert_eq!(store.put(&record).await.unwrap(), InsertResult::Inserted);
        assert_eq!(store.put(&record).await.unwrap(), InsertResult::AlreadyExists);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sqlite_get_by_hash_earliest_wins() {
        let store = SqliteStore::open_memory().unwrap();
        let keypair = Keypair::from_seed(&[0x42; 32]);

        let mut first = make_record(&keypair, "hello", "2026-01-14T12:00:00.000Z");
        first.created_at = 1_000;
        let mut second = make_record(&keypair, "hello", "2026-02-01T09:30:00.000Z");
        second.created_at = 2_000;

        store.put(&second).await.unwrap();
        store.put(&first).await.unwrap();

        let fetched = store.get_by_hash(first.hash()).await.unwrap().unwrap();
        assert_eq!(fetched.manifest_id, first.manifest_id);
    }

    #[tokio::test]
    async fn test_sqlite_delete() {
        let store = SqliteStore::open_memory().unwrap();
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let record = make_record(&keypair, "hello", "2026-01-14T12:00:00.000Z");

        store.put(&record).await.unwrap();
        assert!(store.delete(&record.manifest_id).await.unwrap());
        assert!(!store.delete(&record.manifest_id).await.unwrap());
        assert!(store.get(&record.manifest_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sqlite_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifests.db");
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let record = make_record(&keypair, "persisted", "2026-01-14T12:00:00.000Z");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.put(&record).await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let fetched = store.get(&record.manifest_id).await.unwrap().unwrap();
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn test_sqlite_missing_lookups_return_none() {
        let store = SqliteStore::open_memory().unwrap();
        let id = ManifestId::from_bytes([0xaa; 32]);
        let hash = Sha256Hash::from_bytes([0xbb; 32]);

        assert!(store.get(&id).await.unwrap().is_none());
        assert!(store.get_by_hash(&hash).await.unwrap().is_none());
    }
}
