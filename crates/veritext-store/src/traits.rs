//! Store trait: the abstract interface for manifest persistence.
//!
//! Persistence is a convenience, never a requirement for verification: a
//! manifest+signature pair stays verifiable forever without store access.
//! Deleting a record removes it from lookup but cannot invalidate copies
//! already held by third parties.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use veritext_core::{ManifestId, Sha256Hash, SignedManifest};

use crate::error::Result;

/// Result of persisting a signed manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// Record was inserted.
    Inserted,
    /// A record with this id already exists (idempotent, not an error).
    AlreadyExists,
}

/// A signed manifest as persisted: the signed unit plus store-local fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredManifest {
    /// Content address of the signed manifest.
    pub manifest_id: ManifestId,

    /// The immutable signed unit.
    pub signed: SignedManifest,

    /// When this record was persisted (Unix milliseconds). Store-local;
    /// not part of the signed bytes.
    pub created_at: i64,
}

impl StoredManifest {
    /// The content hash this record proves provenance for.
    pub fn hash(&self) -> &Sha256Hash {
        &self.signed.manifest.hash
    }
}

/// The ManifestStore trait: async interface for manifest persistence.
///
/// # Design Notes
///
/// - **Idempotent puts**: manifest ids are content addresses, so inserting
///   the same record twice returns `AlreadyExists`.
/// - **Hash lookup**: several records may share a content hash (same text
///   signed at different times); `get_by_hash` returns the earliest, the
///   one that establishes precedence.
/// - **No updates**: records are immutable; the only mutation is `delete`.
#[async_trait]
pub trait ManifestStore: Send + Sync {
    /// Persist a signed manifest record.
    async fn put(&self, record: &StoredManifest) -> Result<InsertResult>;

    /// Fetch a record by its manifest id.
    async fn get(&self, id: &ManifestId) -> Result<Option<StoredManifest>>;

    /// Fetch the earliest record for a content hash.
    async fn get_by_hash(&self, hash: &Sha256Hash) -> Result<Option<StoredManifest>>;

    /// Delete a record. Returns `true` if a record was removed.
    async fn delete(&self, id: &ManifestId) -> Result<bool>;

    /// Number of records in the store.
    async fn count(&self) -> Result<u64>;
}
