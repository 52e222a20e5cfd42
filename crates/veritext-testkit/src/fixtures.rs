//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use serde_json::json;
use veritext::{ProvenanceService, ServiceConfig};
use veritext_core::{Keypair, Manifest, ManifestBuilder, Metadata, SignedManifest, Signer};
use veritext_store::MemoryStore;

/// A fixed timestamp used by deterministic fixtures.
pub const FIXED_TIMESTAMP: &str = "2026-01-14T12:00:00.000Z";

/// A test fixture with a keypair and memory store.
pub struct TestFixture {
    pub keypair: Keypair,
    pub store: MemoryStore,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
            store: MemoryStore::new(),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
            store: MemoryStore::new(),
        }
    }

    /// Get the keypair's public key.
    pub fn public_key(&self) -> veritext_core::Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// Build a service over this fixture's keypair and store.
    pub fn service(self) -> ProvenanceService<MemoryStore> {
        ProvenanceService::new(
            Signer::from_keypair(self.keypair),
            self.store,
            ServiceConfig::default(),
        )
    }

    /// Build a manifest with the fixed timestamp.
    pub fn make_manifest(&self, text: &str, metadata: Option<Metadata>) -> Manifest {
        ManifestBuilder::new()
            .timestamp(FIXED_TIMESTAMP)
            .build(text, metadata)
            .expect("fixture inputs within bounds")
    }

    /// Build and sign a manifest with the fixed timestamp.
    pub fn make_signed(&self, text: &str, metadata: Option<Metadata>) -> SignedManifest {
        let manifest = self.make_manifest(text, metadata);
        let signature = self.keypair.sign(&manifest.canonical_bytes());
        SignedManifest {
            manifest,
            signature,
            public_key: self.keypair.public_key(),
        }
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-signer tests.
pub fn multi_signer_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// A small representative metadata document.
pub fn sample_metadata() -> Metadata {
    match json!({"model": "example-1", "author": "alice"}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}
