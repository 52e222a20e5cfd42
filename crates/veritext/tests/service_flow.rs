//! End-to-end service flows over real SQLite storage.

use serde_json::json;
use veritext::store::{ManifestStore, SqliteStore};
use veritext::wire::{SignResponse, VerifyResponse};
use veritext::{
    ErrorCode, Keypair, Metadata, ProvenanceService, ServiceConfig, SignedManifest, Signer,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn make_service(store: SqliteStore) -> ProvenanceService<SqliteStore> {
    let signer = Signer::from_keypair(Keypair::from_seed(&[0x42; 32]));
    ProvenanceService::new(signer, store, ServiceConfig::default())
}

fn as_metadata(value: serde_json::Value) -> Metadata {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[tokio::test]
async fn test_sign_persist_lookup_verify() {
    init_tracing();
    let service = make_service(SqliteStore::open_memory().unwrap());
    let metadata = as_metadata(json!({"model": "example-1", "author": "alice"}));

    let record = service.sign("the text", Some(metadata.clone())).await.unwrap();

    // Lookup by id returns the exact signed unit.
    let stored = service.lookup(&record.manifest_id).await.unwrap();
    assert_eq!(stored.signed, record.signed);

    // Lookup by content hash finds the same record.
    let by_hash = service
        .lookup_by_hash(&record.signed.manifest.hash)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_hash.manifest_id, record.manifest_id);

    // And the stored manifest verifies against the original text.
    let result = service.verify_signed("the text", &stored.signed);
    assert!(result.valid);
    assert_eq!(result.metadata, Some(metadata));
}

#[tokio::test]
async fn test_flow_survives_service_restart() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifests.db");

    let record = {
        let service = make_service(SqliteStore::open(&path).unwrap());
        service.sign("durable text", None).await.unwrap()
    };

    // A fresh service over the same database still has the record.
    let service = make_service(SqliteStore::open(&path).unwrap());
    let stored = service.lookup(&record.manifest_id).await.unwrap();
    assert_eq!(stored.signed, record.signed);

    let result = service.verify_signed("durable text", &stored.signed);
    assert!(result.valid);
}

#[tokio::test]
async fn test_wire_shapes_round_trip_through_json() {
    init_tracing();
    let service = make_service(SqliteStore::open_memory().unwrap());
    let record = service.sign("hello", None).await.unwrap();

    // The sign response serializes with camelCase keys.
    let response = SignResponse::from(record.clone());
    let value = serde_json::to_value(&response).unwrap();
    assert!(value.get("manifestId").is_some());
    assert!(value.get("verificationUrl").is_some());
    assert_eq!(value["publicKey"], json!(service.public_key().to_hex()));

    // A third party reconstructs the signed unit from the wire fields
    // alone and verifies offline.
    let parsed: SignResponse = serde_json::from_value(value).unwrap();
    let signed = SignedManifest {
        manifest: parsed.manifest,
        signature: veritext::Ed25519Signature::from_hex(&parsed.signature).unwrap(),
        public_key: veritext::Ed25519PublicKey::from_hex(&parsed.public_key).unwrap(),
    };
    let result = service.verify_signed("hello", &signed);
    assert!(result.valid);

    let verify_response = VerifyResponse::from(result);
    assert!(verify_response.valid);
    assert!(verify_response.warnings.is_none());
}

#[tokio::test]
async fn test_oversized_requests_rejected_before_signing() {
    init_tracing();
    let service = make_service(SqliteStore::open_memory().unwrap());

    let big_text = "a".repeat(veritext::core::MAX_TEXT_BYTES + 1);
    let err = service.sign(&big_text, None).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::TextTooLarge);

    let mut big_metadata = Metadata::new();
    big_metadata.insert(
        "blob".into(),
        serde_json::Value::String("x".repeat(veritext::core::MAX_METADATA_BYTES)),
    );
    let err = service.sign("small", Some(big_metadata)).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::MetadataTooLarge);

    assert_eq!(service.store().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_does_not_revoke_verifiability() {
    init_tracing();
    let service = make_service(SqliteStore::open_memory().unwrap());
    let record = service.sign("ephemeral", None).await.unwrap();

    assert!(service.delete(&record.manifest_id).await.unwrap());
    let err = service.lookup(&record.manifest_id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ManifestNotFound);

    // Copies held by third parties keep verifying.
    let result = service.verify_signed("ephemeral", &record.signed);
    assert!(result.valid);
}
