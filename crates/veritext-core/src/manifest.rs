//! Manifest: the canonical, signable record of a text's provenance.
//!
//! A manifest is immutable once signed. Any field change, down to a single
//! byte of the timestamp string, invalidates the signature.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::canonical::{canonical_bytes, canonical_metadata_size};
use crate::crypto::{Ed25519PublicKey, Ed25519Signature};
use crate::digest::{digest_text, Sha256Hash};
use crate::error::CoreError;
use crate::types::ManifestId;

/// The current manifest schema version.
pub const MANIFEST_VERSION: &str = "1.0";

/// Maximum text size in bytes (1 MiB-class bound; exactly 1,000,000).
pub const MAX_TEXT_BYTES: usize = 1_000_000;

/// Maximum canonical-serialized metadata size in bytes (10 KiB).
pub const MAX_METADATA_BYTES: usize = 10_240;

/// Caller-supplied metadata: an open string-keyed JSON document.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// The signable unit: digest, creation time, metadata, and schema version.
///
/// The raw text is NOT embedded; manifests are hash-only, and the verifier
/// supplies the original text out-of-band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// SHA-256 digest of the original text.
    pub hash: Sha256Hash,

    /// Creation time, ISO-8601 UTC with millisecond precision.
    ///
    /// Kept as the exact string that was signed; reformatting it would
    /// change the canonical bytes and break the signature.
    pub timestamp: String,

    /// Optional caller-supplied metadata (model name, author id, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Schema version; selects the canonicalization rules.
    pub version: String,
}

impl Manifest {
    /// The canonical byte sequence that gets signed and verified.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonical_bytes(self)
    }
}

/// Builder for manifests. The schema version is fixed per builder instance.
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    version: String,
    timestamp: Option<String>,
}

impl ManifestBuilder {
    /// Create a builder for the current schema version.
    pub fn new() -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            timestamp: None,
        }
    }

    /// Pin the timestamp instead of reading the clock. For deterministic
    /// tests and golden vectors.
    pub fn timestamp(mut self, ts: impl Into<String>) -> Self {
        self.timestamp = Some(ts.into());
        self
    }

    /// Build a manifest for the given text.
    ///
    /// Enforces the size bounds before anything is signed:
    /// text ≤ [`MAX_TEXT_BYTES`], canonical metadata ≤ [`MAX_METADATA_BYTES`].
    pub fn build(&self, text: &str, metadata: Option<Metadata>) -> Result<Manifest, CoreError> {
        let text_size = text.len();
        if text_size > MAX_TEXT_BYTES {
            return Err(CoreError::TextTooLarge {
                size: text_size,
                max: MAX_TEXT_BYTES,
            });
        }

        if let Some(metadata) = &metadata {
            let size = canonical_metadata_size(metadata);
            if size > MAX_METADATA_BYTES {
                return Err(CoreError::MetadataTooLarge {
                    size,
                    max: MAX_METADATA_BYTES,
                });
            }
        }

        let timestamp = self
            .timestamp
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

        Ok(Manifest {
            hash: digest_text(text),
            timestamp,
            metadata,
            version: self.version.clone(),
        })
    }
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A manifest together with its signature and the signing public key.
///
/// Self-contained for verification: given the original text, any third
/// party can verify a `SignedManifest` offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedManifest {
    pub manifest: Manifest,

    /// Ed25519 signature over the manifest's canonical bytes.
    pub signature: Ed25519Signature,

    /// The public key the signature verifies against.
    pub public_key: Ed25519PublicKey,
}

impl SignedManifest {
    /// Compute the content-addressed id:
    /// SHA-256(canonical_bytes || signature).
    pub fn compute_id(&self) -> ManifestId {
        let mut input = self.manifest.canonical_bytes();
        input.extend_from_slice(&self.signature.0);
        ManifestId(Sha256Hash::hash(&input).0)
    }
}
