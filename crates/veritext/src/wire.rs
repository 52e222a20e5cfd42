//! Wire DTOs for API consumers.
//!
//! camelCase JSON shapes, decoupled from the internal types so the
//! service structs can evolve without breaking the wire contract.

use serde::{Deserialize, Serialize};
use veritext_core::{Manifest, Metadata, VerificationResult};
use veritext_store::StoredManifest;

use crate::error::{ErrorCode, ServiceError};
use crate::service::SignedRecord;

/// Request to sign a text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Response to a successful sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResponse {
    pub manifest_id: String,
    pub manifest: Manifest,
    /// Hex-encoded Ed25519 signature (128 characters).
    pub signature: String,
    /// Hex-encoded Ed25519 public key (64 characters).
    pub public_key: String,
    pub verification_url: String,
}

impl From<SignedRecord> for SignResponse {
    fn from(record: SignedRecord) -> Self {
        Self {
            manifest_id: record.manifest_id.to_hex(),
            signature: record.signed.signature.to_hex(),
            public_key: record.signed.public_key.to_hex(),
            manifest: record.signed.manifest,
            verification_url: record.verification_url,
        }
    }
}

/// Request to verify a text against a manifest and signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub text: String,
    pub manifest: Manifest,
    pub signature: String,
    /// Optional explicit key; absent means "resolve server-side".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

/// Response to a verify call. Always 2xx-shaped; a failed check is a
/// result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub valid: bool,
    pub hash_match: bool,
    pub signature_valid: bool,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Omitted entirely when empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

impl From<VerificationResult> for VerifyResponse {
    fn from(result: VerificationResult) -> Self {
        Self {
            valid: result.valid,
            hash_match: result.hash_match,
            signature_valid: result.signature_valid,
            timestamp: result.timestamp,
            metadata: result.metadata,
            warnings: if result.warnings.is_empty() {
                None
            } else {
                Some(result.warnings)
            },
        }
    }
}

/// A stored manifest record as returned by lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestRecordResponse {
    pub manifest_id: String,
    pub manifest: Manifest,
    pub signature: String,
    pub public_key: String,
    /// When this service persisted the record, ISO-8601 UTC.
    pub created_at: String,
}

impl From<StoredManifest> for ManifestRecordResponse {
    fn from(record: StoredManifest) -> Self {
        Self {
            manifest_id: record.manifest_id.to_hex(),
            signature: record.signed.signature.to_hex(),
            public_key: record.signed.public_key.to_hex(),
            manifest: record.signed.manifest,
            created_at: millis_to_iso(record.created_at),
        }
    }
}

/// Error body: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.as_str().to_string(),
                message: message.into(),
            },
        }
    }
}

impl From<&ServiceError> for ErrorBody {
    fn from(err: &ServiceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

fn millis_to_iso(millis: i64) -> String {
    use chrono::{DateTime, SecondsFormat, Utc};
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_else(|| DateTime::<Utc>::from_timestamp_millis(0).unwrap())
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use veritext_core::ManifestBuilder;

    #[test]
    fn test_verify_response_omits_empty_warnings() {
        let result = VerificationResult {
            valid: true,
            hash_match: true,
            signature_valid: true,
            timestamp: "2026-01-14T12:00:00.000Z".to_string(),
            metadata: None,
            warnings: vec![],
        };

        let json = serde_json::to_value(VerifyResponse::from(result)).unwrap();
        assert_eq!(
            json,
            json!({
                "valid": true,
                "hashMatch": true,
                "signatureValid": true,
                "timestamp": "2026-01-14T12:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_verify_response_carries_warnings() {
        let result = VerificationResult {
            valid: true,
            hash_match: true,
            signature_valid: true,
            timestamp: "2026-01-14T12:00:00.000Z".to_string(),
            metadata: None,
            warnings: vec!["Manifest is older than 30 days".to_string()],
        };

        let response = VerifyResponse::from(result);
        assert_eq!(
            response.warnings,
            Some(vec!["Manifest is older than 30 days".to_string()])
        );
    }

    #[test]
    fn test_sign_request_round_trip() {
        let request: SignRequest = serde_json::from_value(json!({
            "text": "hello",
            "metadata": {"model": "example-1"}
        }))
        .unwrap();
        assert_eq!(request.text, "hello");
        assert!(request.metadata.is_some());

        let bare: SignRequest = serde_json::from_value(json!({"text": "hello"})).unwrap();
        assert!(bare.metadata.is_none());
    }

    #[test]
    fn test_verify_request_camel_case_keys() {
        let manifest = ManifestBuilder::new()
            .timestamp("2026-01-14T12:00:00.000Z")
            .build("hello", None)
            .unwrap();
        let request = VerifyRequest {
            text: "hello".to_string(),
            manifest,
            signature: "ab".repeat(64),
            public_key: Some("cd".repeat(32)),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("publicKey").is_some());
        assert!(json.get("public_key").is_none());
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody::new(ErrorCode::TextTooLarge, "text exceeds limit");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            json!({
                "error": {
                    "code": "TEXT_TOO_LARGE",
                    "message": "text exceeds limit"
                }
            })
        );
    }

    #[test]
    fn test_millis_to_iso() {
        assert_eq!(millis_to_iso(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(millis_to_iso(1_750_000_000_000), "2025-06-15T15:06:40.000Z");
    }
}
