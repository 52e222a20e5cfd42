//! # Veritext
//!
//! Provenance manifests for text: tamper-evident, offline-verifiable
//! records binding a SHA-256 digest, a timestamp, and optional metadata
//! under an Ed25519 signature.
//!
//! ## Overview
//!
//! Veritext provides a portable library for:
//!
//! - **Manifests**: Immutable, signed records proving a text existed in a
//!   given form at a given time
//! - **Verification**: Pure offline checking of any text against any
//!   manifest+signature pair, with no service or database required
//! - **Storage**: Optional persistence and lookup of signed manifests
//!
//! ## Key Concepts
//!
//! - **Manifest**: Hash-only. The text is never embedded or stored.
//! - **Canonical bytes**: The signature covers a frozen deterministic
//!   JSON encoding, so manifests verify across implementations.
//! - **Independent checks**: Hash and signature are always both checked,
//!   distinguishing a tampered text from a forged manifest.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use veritext::{ProvenanceService, ServiceConfig};
//! use veritext::core::{Keypair, Signer};
//! use veritext::store::SqliteStore;
//!
//! async fn example() {
//!     let signer = Signer::from_keypair(Keypair::generate());
//!     let store = SqliteStore::open("manifests.db").unwrap();
//!     let service = ProvenanceService::new(signer, store, ServiceConfig::default());
//!
//!     let record = service.sign("the text", None).await.unwrap();
//!     let result = service
//!         .verify(
//!             "the text",
//!             &record.signed.manifest,
//!             &record.signed.signature.to_hex(),
//!         )
//!         .unwrap();
//!     assert!(result.valid);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `veritext::core` - Pure primitives (Manifest, Signer, verify, ...)
//! - `veritext::store` - Storage abstraction and SQLite

pub mod error;
pub mod resolver;
pub mod service;
pub mod wire;

// Re-export component crates
pub use veritext_core as core;
pub use veritext_store as store;

// Re-export main types for convenience
pub use error::{ErrorCode, Result, ServiceError};
pub use resolver::{KeyResolver, NoKeyResolver, StaticKeyResolver};
pub use service::{ProvenanceService, ServiceConfig, SignedRecord};

// Re-export commonly used core types
pub use veritext_core::{
    Ed25519PublicKey, Ed25519Signature, Keypair, Manifest, ManifestBuilder, ManifestId, Metadata,
    Sha256Hash, SignedManifest, Signer, VerificationResult, MANIFEST_VERSION,
};
