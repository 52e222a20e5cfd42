//! # Veritext Core
//!
//! Pure primitives for provenance manifests: digests, canonical
//! serialization, Ed25519 signing, and verification.
//!
//! This crate contains no I/O, no storage, no networking. Every operation
//! is a synchronous, side-effect-free computation over its inputs, safe to
//! call concurrently from any number of threads.
//!
//! ## Key Types
//!
//! - [`Manifest`] - The signable record of a text's digest, timestamp,
//!   metadata, and schema version
//! - [`SignedManifest`] - A manifest plus signature and public key;
//!   verifiable offline by any third party
//! - [`ManifestId`] - Content-addressed identifier of a signed manifest
//! - [`Signer`] - Holds the private key; fails at construction, never at
//!   signing time
//! - [`VerificationResult`] - Structured outcome distinguishing tampered
//!   text from a forged manifest
//!
//! ## Canonicalization
//!
//! Signatures cover a deterministic JSON encoding with a fixed field order.
//! See the [`canonical`] module; the encoding is frozen for version "1.0".

pub mod canonical;
pub mod crypto;
pub mod digest;
pub mod error;
pub mod manifest;
pub mod types;
pub mod verify;

pub use canonical::{canonical_bytes, canonical_metadata_size};
pub use crypto::{Ed25519PublicKey, Ed25519Signature, Keypair, Signer};
pub use digest::{digest_text, normalize_text, Sha256Hash};
pub use error::{CoreError, KeyError};
pub use manifest::{
    Manifest, ManifestBuilder, Metadata, SignedManifest, MANIFEST_VERSION, MAX_METADATA_BYTES,
    MAX_TEXT_BYTES,
};
pub use types::ManifestId;
pub use verify::{
    verify, verify_at, verify_hex, VerificationResult, STALE_AFTER_DAYS, STALE_WARNING,
};
