//! Error types for the Veritext core.

use thiserror::Error;

/// Core errors that can occur while building or handling manifests.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("text exceeds maximum size: {size} bytes (max {max})")]
    TextTooLarge { size: usize, max: usize },

    #[error("metadata exceeds maximum serialized size: {size} bytes (max {max})")]
    MetadataTooLarge { size: usize, max: usize },

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("malformed hex: {0}")]
    MalformedHex(String),
}

/// Errors raised while constructing a [`Signer`](crate::crypto::Signer).
///
/// Key material problems are construction-time failures: a signer either
/// exists with a working key or does not exist at all.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("missing key material: {0}")]
    MissingKey(&'static str),

    #[error("malformed key material: {0}")]
    MalformedKey(String),

    #[error("supplied public key does not match the private key")]
    KeyMismatch,
}
