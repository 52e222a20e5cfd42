//! Manifest verification.
//!
//! Verification is a pure function of {text, manifest, signature, public
//! key} with no external state, so offline third-party verification is
//! always possible. It is total over adversarial input: malformed
//! signatures or keys yield `signature_valid = false`, never an error.

use chrono::{DateTime, Duration, Utc};

use crate::canonical::canonical_bytes;
use crate::crypto::{Ed25519PublicKey, Ed25519Signature};
use crate::digest::digest_text;
use crate::manifest::{Manifest, Metadata, MANIFEST_VERSION};

/// Manifests older than this many days draw an advisory warning.
pub const STALE_AFTER_DAYS: i64 = 30;

/// The exact warning string for stale manifests.
pub const STALE_WARNING: &str = "Manifest is older than 30 days";

/// The outcome of verifying a text against a signed manifest.
///
/// `hash_match` and `signature_valid` are independent checks and both are
/// always computed: `hash_match` answers "does this text match the
/// manifest", `signature_valid` answers "was this exact manifest signed by
/// this key". Reporting both lets callers distinguish a tampered text from
/// a forged manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    /// `hash_match && signature_valid`. Never partially true.
    pub valid: bool,
    pub hash_match: bool,
    pub signature_valid: bool,
    /// The manifest's timestamp, echoed back.
    pub timestamp: String,
    /// The manifest's metadata, echoed back.
    pub metadata: Option<Metadata>,
    /// Advisory only; warnings never affect `valid`.
    pub warnings: Vec<String>,
}

/// Verify `text` against a manifest and signature, using the wall clock
/// for staleness.
pub fn verify(
    text: &str,
    manifest: &Manifest,
    signature_hex: &str,
    public_key: &Ed25519PublicKey,
) -> VerificationResult {
    verify_at(text, manifest, signature_hex, public_key, Utc::now())
}

/// Verify with an explicit `now`, for deterministic staleness checks.
pub fn verify_at(
    text: &str,
    manifest: &Manifest,
    signature_hex: &str,
    public_key: &Ed25519PublicKey,
    now: DateTime<Utc>,
) -> VerificationResult {
    // Independent of the hash check: the canonical bytes are reconstructed
    // from the manifest as received, not from the probe text.
    let canonical = canonical_bytes(manifest);
    let signature_valid = check_signature(&canonical, signature_hex, public_key);

    build_result(text, manifest, signature_valid, now)
}

/// Verify with a hex-encoded public key. A malformed key yields
/// `signature_valid = false`, same as a malformed signature; the hash
/// check and warnings are still computed.
pub fn verify_hex(
    text: &str,
    manifest: &Manifest,
    signature_hex: &str,
    public_key_hex: &str,
) -> VerificationResult {
    match Ed25519PublicKey::from_hex(public_key_hex) {
        Ok(public_key) => verify(text, manifest, signature_hex, &public_key),
        // No key to verify against: nothing cryptographic runs.
        Err(_) => build_result(text, manifest, false, Utc::now()),
    }
}

/// Assemble the result from an already-decided signature check.
fn build_result(
    text: &str,
    manifest: &Manifest,
    signature_valid: bool,
    now: DateTime<Utc>,
) -> VerificationResult {
    let hash_match = digest_text(text) == manifest.hash;

    let mut warnings = Vec::new();
    if manifest.version != MANIFEST_VERSION {
        warnings.push(format!("Unknown manifest version: {}", manifest.version));
    }
    match DateTime::parse_from_rfc3339(&manifest.timestamp) {
        Ok(ts) => {
            if now.signed_duration_since(ts.with_timezone(&Utc)) > Duration::days(STALE_AFTER_DAYS)
            {
                warnings.push(STALE_WARNING.to_string());
            }
        }
        Err(_) => {
            warnings.push("Manifest timestamp is not valid ISO-8601".to_string());
        }
    }

    VerificationResult {
        valid: hash_match && signature_valid,
        hash_match,
        signature_valid,
        timestamp: manifest.timestamp.clone(),
        metadata: manifest.metadata.clone(),
        warnings,
    }
}

fn check_signature(canonical: &[u8], signature_hex: &str, public_key: &Ed25519PublicKey) -> bool {
    match Ed25519Signature::from_hex(signature_hex) {
        Ok(signature) => public_key.verify(canonical, &signature).is_ok(),
        Err(_) => false,
    }
}
