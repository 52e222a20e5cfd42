//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::Value;

use veritext_core::{
    Ed25519PublicKey, Keypair, Manifest, ManifestBuilder, ManifestId, Metadata, Sha256Hash,
    SignedManifest,
};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random ManifestId.
pub fn manifest_id() -> impl Strategy<Value = ManifestId> {
    any::<[u8; 32]>().prop_map(ManifestId::from_bytes)
}

/// Generate a random Sha256Hash.
pub fn sha256_hash() -> impl Strategy<Value = Sha256Hash> {
    any::<[u8; 32]>().prop_map(Sha256Hash::from_bytes)
}

/// Generate a random Ed25519PublicKey.
pub fn public_key() -> impl Strategy<Value = Ed25519PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate text up to `max_len` bytes, including multi-byte UTF-8.
pub fn text(max_len: usize) -> impl Strategy<Value = String> {
    // A char encodes to at most 4 bytes, so the byte bound holds.
    prop::collection::vec(any::<char>(), 0..=max_len / 4)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generate an ISO-8601 UTC timestamp with millisecond precision.
pub fn timestamp() -> impl Strategy<Value = String> {
    (2020u32..=2035, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60, 0u32..1000).prop_map(
        |(y, mo, d, h, mi, s, ms)| {
            format!("{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}.{ms:03}Z")
        },
    )
}

/// Generate a metadata key.
fn metadata_key() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_-]{0,15}"
}

/// Generate a flat JSON value for metadata.
fn metadata_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[ -~]{0,32}".prop_map(Value::String),
        prop::collection::vec("[ -~]{0,16}".prop_map(Value::String), 0..4)
            .prop_map(Value::Array),
    ]
}

/// Generate a small metadata document, possibly nested one level.
pub fn metadata() -> impl Strategy<Value = Metadata> {
    prop::collection::btree_map(metadata_key(), metadata_value(), 0..6).prop_map(|map| {
        map.into_iter().collect::<Metadata>()
    })
}

/// Parameters for generating a signed manifest.
#[derive(Debug, Clone)]
pub struct ManifestParams {
    pub keypair: Keypair,
    pub text: String,
    pub timestamp: String,
    pub metadata: Option<Metadata>,
}

impl Arbitrary for ManifestParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<[u8; 32]>(), // seed
            text(1024),
            timestamp(),
            prop::option::of(metadata()),
        )
            .prop_map(|(seed, text, timestamp, metadata)| ManifestParams {
                keypair: Keypair::from_seed(&seed),
                text,
                timestamp,
                metadata,
            })
            .boxed()
    }
}

/// Build a manifest from parameters (unsigned).
pub fn manifest_from_params(params: &ManifestParams) -> Manifest {
    ManifestBuilder::new()
        .timestamp(params.timestamp.clone())
        .build(&params.text, params.metadata.clone())
        .expect("generated inputs within bounds")
}

/// Build and sign a manifest from parameters.
pub fn signed_manifest_from_params(params: &ManifestParams) -> SignedManifest {
    let manifest = manifest_from_params(params);
    let signature = params.keypair.sign(&manifest.canonical_bytes());
    SignedManifest {
        manifest,
        signature,
        public_key: params.keypair.public_key(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritext_core::{canonical_bytes, verify};

    proptest! {
        #[test]
        fn test_signed_manifest_always_verifies(params: ManifestParams) {
            let signed = signed_manifest_from_params(&params);
            let result = verify(
                &params.text,
                &signed.manifest,
                &signed.signature.to_hex(),
                &signed.public_key,
            );

            prop_assert!(result.hash_match);
            prop_assert!(result.signature_valid);
            prop_assert!(result.valid);
        }

        #[test]
        fn test_canonical_bytes_deterministic(params: ManifestParams) {
            let m1 = manifest_from_params(&params);
            let m2 = manifest_from_params(&params);

            prop_assert_eq!(canonical_bytes(&m1), canonical_bytes(&m2));
        }

        #[test]
        fn test_manifest_id_deterministic(params: ManifestParams) {
            let s1 = signed_manifest_from_params(&params);
            let s2 = signed_manifest_from_params(&params);

            prop_assert_eq!(s1.compute_id(), s2.compute_id());
        }

        #[test]
        fn test_canonical_bytes_survive_wire_round_trip(params: ManifestParams) {
            // A third party reconstructs the exact signed bytes from JSON.
            let manifest = manifest_from_params(&params);
            let json = serde_json::to_string(&manifest).unwrap();
            let parsed: Manifest = serde_json::from_str(&json).unwrap();

            prop_assert_eq!(canonical_bytes(&parsed), canonical_bytes(&manifest));
        }

        #[test]
        fn test_different_texts_different_hashes(
            t1 in text(256),
            t2 in text(256),
        ) {
            prop_assume!(t1 != t2);

            let m1 = ManifestBuilder::new().timestamp("2026-01-14T12:00:00.000Z").build(&t1, None).unwrap();
            let m2 = ManifestBuilder::new().timestamp("2026-01-14T12:00:00.000Z").build(&t2, None).unwrap();

            prop_assert_ne!(m1.hash, m2.hash);
        }

        #[test]
        fn test_wrong_key_never_verifies(params: ManifestParams, other_seed in any::<[u8; 32]>()) {
            prop_assume!(other_seed != params.keypair.seed());

            let signed = signed_manifest_from_params(&params);
            let other = Keypair::from_seed(&other_seed);
            let result = verify(
                &params.text,
                &signed.manifest,
                &signed.signature.to_hex(),
                &other.public_key(),
            );

            prop_assert!(!result.signature_valid);
            prop_assert!(!result.valid);
        }
    }
}
