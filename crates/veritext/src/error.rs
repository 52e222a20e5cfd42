//! Error types for the service layer, with stable wire codes.

use thiserror::Error;
use veritext_core::{CoreError, KeyError};
use veritext_store::StoreError;

/// Stable machine-readable error codes for API consumers.
///
/// The string forms are part of the wire contract and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    TextTooLarge,
    MetadataTooLarge,
    InvalidRequest,
    ManifestInvalid,
    ManifestNotFound,
    SigningFailed,
    VerificationFailed,
    InternalError,
}

impl ErrorCode {
    /// The stable wire string for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::TextTooLarge => "TEXT_TOO_LARGE",
            ErrorCode::MetadataTooLarge => "METADATA_TOO_LARGE",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::ManifestInvalid => "MANIFEST_INVALID",
            ErrorCode::ManifestNotFound => "MANIFEST_NOT_FOUND",
            ErrorCode::SigningFailed => "SIGNING_FAILED",
            ErrorCode::VerificationFailed => "VERIFICATION_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Size-bound or crypto error from the core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Signing key configuration error.
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// No public key could be resolved for a manifest.
    #[error("no public key for manifest: {0}")]
    KeyResolution(String),

    /// Request failed structural validation before any crypto ran.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Manifest not found in the store.
    #[error("manifest not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    /// Map to the stable wire code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::Core(CoreError::TextTooLarge { .. }) => ErrorCode::TextTooLarge,
            ServiceError::Core(CoreError::MetadataTooLarge { .. }) => ErrorCode::MetadataTooLarge,
            ServiceError::Core(_) => ErrorCode::ManifestInvalid,
            ServiceError::Key(_) => ErrorCode::SigningFailed,
            ServiceError::Store(_) => ErrorCode::InternalError,
            ServiceError::KeyResolution(_) => ErrorCode::VerificationFailed,
            ServiceError::InvalidRequest(_) => ErrorCode::InvalidRequest,
            ServiceError::NotFound(_) => ErrorCode::ManifestNotFound,
        }
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
