//! The provenance service: unified API for signing, verifying, and
//! looking up manifests.
//!
//! Brings the core primitives and the store together behind one struct.
//! Signing persists; verification never touches the store, so any
//! manifest+signature pair a third party holds stays verifiable even if
//! this service and its database are gone.

use std::sync::Arc;

use tracing::{debug, info};
use veritext_core::{
    verify as core_verify, verify_hex, Ed25519PublicKey, Manifest, ManifestBuilder, ManifestId,
    Metadata, Sha256Hash, Signer, SignedManifest, VerificationResult,
};
use veritext_store::{InsertResult, ManifestStore, StoredManifest};

use crate::error::{Result, ServiceError};
use crate::resolver::{KeyResolver, StaticKeyResolver};

/// Configuration for the provenance service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL for human-facing verification links; the manifest id hex
    /// is appended.
    pub verification_url_base: String,
    /// Whether `sign` persists the record. Off for stateless deployments.
    pub persist_on_sign: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            verification_url_base: "https://veritext.io/verify/".to_string(),
            persist_on_sign: true,
        }
    }
}

/// The outcome of signing: everything a caller needs to hand out.
#[derive(Debug, Clone)]
pub struct SignedRecord {
    pub manifest_id: ManifestId,
    pub signed: SignedManifest,
    pub verification_url: String,
}

/// The main service struct.
///
/// Storage-agnostic over any [`ManifestStore`]. The signer is fixed for
/// the lifetime of the service; verification against other keys goes
/// through the resolver or an explicit caller-supplied key.
pub struct ProvenanceService<S: ManifestStore> {
    signer: Signer,
    resolver: Arc<dyn KeyResolver>,
    store: Arc<S>,
    builder: ManifestBuilder,
    config: ServiceConfig,
}

impl<S: ManifestStore> ProvenanceService<S> {
    /// Create a service that verifies against its own signing key.
    pub fn new(signer: Signer, store: S, config: ServiceConfig) -> Self {
        let resolver = Arc::new(StaticKeyResolver::new(signer.public_key()));
        Self {
            signer,
            resolver,
            store: Arc::new(store),
            builder: ManifestBuilder::new(),
            config,
        }
    }

    /// Replace the key resolver (multi-key deployments).
    pub fn with_resolver(mut self, resolver: Arc<dyn KeyResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// The service's signing public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.signer.public_key()
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Signing
    // ─────────────────────────────────────────────────────────────────────────

    /// Build, sign, and (by default) persist a manifest for `text`.
    ///
    /// Size bounds are enforced before any hashing or signing. The text
    /// itself is never stored and never logged; only its digest survives.
    pub async fn sign(&self, text: &str, metadata: Option<Metadata>) -> Result<SignedRecord> {
        let manifest = self.builder.build(text, metadata)?;
        let signature = self.signer.sign(&manifest.canonical_bytes());

        let signed = SignedManifest {
            manifest,
            signature,
            public_key: self.signer.public_key(),
        };
        let manifest_id = signed.compute_id();

        if self.config.persist_on_sign {
            let record = StoredManifest {
                manifest_id,
                signed: signed.clone(),
                created_at: now_millis(),
            };
            match self.store.put(&record).await? {
                InsertResult::Inserted => {}
                // Same text, same timestamp, same key. Nothing to do.
                InsertResult::AlreadyExists => {
                    debug!(manifest_id = %manifest_id, "manifest already persisted");
                }
            }
        }

        info!(
            manifest_id = %manifest_id,
            hash = %signed.manifest.hash,
            text_bytes = text.len(),
            "signed manifest"
        );

        Ok(SignedRecord {
            manifest_id,
            verification_url: self.verification_url(&manifest_id),
            signed,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify a text against a manifest and signature, resolving the
    /// public key through the configured resolver.
    ///
    /// Pure apart from key resolution: no store access, no clock pinning.
    pub fn verify(
        &self,
        text: &str,
        manifest: &Manifest,
        signature_hex: &str,
    ) -> Result<VerificationResult> {
        let public_key = self.resolver.public_key_for(manifest)?;
        Ok(core_verify(text, manifest, signature_hex, &public_key))
    }

    /// Verify against a caller-supplied hex public key.
    ///
    /// Total over adversarial input: malformed signature or key hex yields
    /// `signature_valid = false`, never an error.
    pub fn verify_with_key(
        &self,
        text: &str,
        manifest: &Manifest,
        signature_hex: &str,
        public_key_hex: &str,
    ) -> VerificationResult {
        verify_hex(text, manifest, signature_hex, public_key_hex)
    }

    /// Verify a self-contained signed manifest against a text.
    pub fn verify_signed(&self, text: &str, signed: &SignedManifest) -> VerificationResult {
        core_verify(
            text,
            &signed.manifest,
            &signed.signature.to_hex(),
            &signed.public_key,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookup
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch a stored record by manifest id.
    pub async fn lookup(&self, id: &ManifestId) -> Result<StoredManifest> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_hex()))
    }

    /// Fetch the earliest stored record for a content hash, if any.
    pub async fn lookup_by_hash(&self, hash: &Sha256Hash) -> Result<Option<StoredManifest>> {
        Ok(self.store.get_by_hash(hash).await?)
    }

    /// Remove a stored record. The manifest itself stays verifiable; only
    /// this service's copy goes away.
    pub async fn delete(&self, id: &ManifestId) -> Result<bool> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            info!(manifest_id = %id, "deleted manifest record");
        }
        Ok(deleted)
    }

    fn verification_url(&self, id: &ManifestId) -> String {
        format!("{}{}", self.config.verification_url_base, id.to_hex())
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
