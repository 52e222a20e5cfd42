//! Golden test vectors for deterministic verification.
//!
//! These vectors ensure that hashing, canonical encoding, and signing
//! produce identical results across all implementations.

use veritext_core::{verify_hex, Keypair, Manifest, ManifestBuilder, Metadata, SignedManifest};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed for deterministic key generation.
    pub seed: [u8; 32],
    /// The text being attested.
    pub text: &'static str,
    /// Manifest timestamp.
    pub timestamp: &'static str,
    /// Metadata as a JSON document, empty string for none.
    pub metadata_json: &'static str,
    /// Expected content hash (hex).
    pub expected_hash: &'static str,
    /// Expected canonical bytes (UTF-8).
    pub expected_canonical: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "hello without metadata",
            seed: [0x42; 32],
            text: "hello",
            timestamp: "2026-01-14T12:00:00.000Z",
            metadata_json: "",
            expected_hash: "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
            expected_canonical: "{\"hash\":\"2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824\",\"timestamp\":\"2026-01-14T12:00:00.000Z\",\"version\":\"1.0\"}",
        },
        GoldenVector {
            name: "empty text",
            seed: [0x00; 32],
            text: "",
            timestamp: "2026-01-14T12:00:00.000Z",
            metadata_json: "",
            expected_hash: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            expected_canonical: "{\"hash\":\"e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855\",\"timestamp\":\"2026-01-14T12:00:00.000Z\",\"version\":\"1.0\"}",
        },
        GoldenVector {
            name: "quick brown fox",
            seed: [0x01; 32],
            text: "The quick brown fox jumps over the lazy dog",
            timestamp: "2026-01-14T12:00:00.000Z",
            metadata_json: "",
            expected_hash: "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592",
            expected_canonical: "{\"hash\":\"d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592\",\"timestamp\":\"2026-01-14T12:00:00.000Z\",\"version\":\"1.0\"}",
        },
        GoldenVector {
            name: "hello with sorted metadata",
            seed: [0x42; 32],
            text: "hello",
            timestamp: "2026-01-14T12:00:00.000Z",
            metadata_json: r#"{"model":"example-1","author":"alice"}"#,
            expected_hash: "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
            expected_canonical: "{\"hash\":\"2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824\",\"timestamp\":\"2026-01-14T12:00:00.000Z\",\"metadata\":{\"author\":\"alice\",\"model\":\"example-1\"},\"version\":\"1.0\"}",
        },
    ]
}

fn parse_metadata(json: &str) -> Option<Metadata> {
    if json.is_empty() {
        return None;
    }
    match serde_json::from_str(json).expect("vector metadata parses") {
        serde_json::Value::Object(map) => Some(map),
        _ => panic!("vector metadata must be an object"),
    }
}

/// Build the manifest a vector describes.
pub fn manifest_from_vector(vector: &GoldenVector) -> Manifest {
    ManifestBuilder::new()
        .timestamp(vector.timestamp)
        .build(vector.text, parse_metadata(vector.metadata_json))
        .expect("vector inputs within bounds")
}

/// Build and sign the manifest a vector describes.
pub fn signed_manifest_from_vector(vector: &GoldenVector) -> SignedManifest {
    let keypair = Keypair::from_seed(&vector.seed);
    let manifest = manifest_from_vector(vector);
    let signature = keypair.sign(&manifest.canonical_bytes());
    SignedManifest {
        manifest,
        signature,
        public_key: keypair.public_key(),
    }
}

/// Check every golden vector against its expected outputs.
///
/// Returns `(name, passed, actual_canonical)` per vector; useful for
/// diffing a foreign implementation against this one.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let manifest = manifest_from_vector(v);
            let canonical = String::from_utf8(manifest.canonical_bytes()).unwrap();
            let passed =
                manifest.hash.to_hex() == v.expected_hash && canonical == v.expected_canonical;
            (v.name.to_string(), passed, canonical)
        })
        .collect()
}
