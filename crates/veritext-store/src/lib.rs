//! # Veritext Store
//!
//! Storage abstraction for Veritext manifests. Provides a trait-based
//! interface for manifest persistence with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The store module abstracts manifest storage behind the [`ManifestStore`]
//! trait, keeping the signing service storage-agnostic. The primary
//! implementation is [`SqliteStore`], with [`MemoryStore`] for testing.
//!
//! Persistence is a convenience layer only: a signed manifest remains
//! verifiable offline whether or not any store ever held it.
//!
//! ## Key Types
//!
//! - [`ManifestStore`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`StoredManifest`] - A signed manifest plus store-local fields
//! - [`InsertResult`] - Result of persisting a manifest
//!
//! ## Usage
//!
//! ```rust,no_run
//! use veritext_store::{ManifestStore, SqliteStore};
//!
//! async fn example() {
//!     // Open a SQLite database
//!     let store = SqliteStore::open("manifests.db").unwrap();
//!
//!     // Or use an in-memory database for testing
//!     let store = SqliteStore::open_memory().unwrap();
//!
//!     // Persist a record
//!     // let record: StoredManifest = ...;
//!     // let result = store.put(&record).await.unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Idempotent puts**: inserting the same record twice returns `AlreadyExists`
//! - **Earliest wins**: hash lookups return the first record persisted for a hash
//! - **Immutable records**: no updates; the only mutation is `delete`

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{InsertResult, ManifestStore, StoredManifest};
