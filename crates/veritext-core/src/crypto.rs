//! Ed25519 signing and verification, wrapped in strong types.

use ed25519_dalek::{Signature as DalekSignature, Signer as _, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{CoreError, KeyError};

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(pub [u8; 32]);

impl Ed25519PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s).map_err(|e| CoreError::MalformedHex(e.to_string()))?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| CoreError::InvalidPublicKey)?;
        Ok(Self(arr))
    }

    /// Verify a signature over a message.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<(), CoreError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CoreError::InvalidPublicKey)?;
        let sig = DalekSignature::from_bytes(&signature.0);
        verifying_key
            .verify(message, &sig)
            .map_err(|_| CoreError::InvalidSignature)
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Pub({}...)", &self.to_hex()[..8])
    }
}

impl AsRef<[u8]> for Ed25519PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Ed25519PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature(pub [u8; 64]);

impl Ed25519Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to lowercase hex (128 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 128-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s).map_err(|e| CoreError::MalformedHex(e.to_string()))?;
        let arr: [u8; 64] = bytes.try_into().map_err(|_| CoreError::InvalidSignature)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Sig({}...)", &self.to_hex()[..8])
    }
}

impl AsRef<[u8]> for Ed25519Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for Ed25519Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Ed25519Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// An Ed25519 keypair.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            signing_key: SigningKey::generate(&mut rng),
        }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Get the public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message. Deterministic: the same bytes always yield the
    /// same signature under the same key.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        Ed25519Signature(self.signing_key.sign(message).to_bytes())
    }

    /// Get the raw seed bytes (secret key material).
    pub fn seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}

/// The manifest signer: holds the process-wide private key.
///
/// A `Signer` cannot exist with broken key material. All key parsing and
/// consistency checks happen at construction; [`Signer::sign`] itself is
/// infallible.
pub struct Signer {
    keypair: Keypair,
}

impl Signer {
    /// Construct from hex-encoded key material.
    ///
    /// The supplied public key must match the one derived from the private
    /// key; a mismatch means the deployment is misconfigured and is
    /// rejected up front.
    pub fn from_hex(private_hex: &str, public_hex: &str) -> Result<Self, KeyError> {
        let seed_bytes =
            hex::decode(private_hex).map_err(|e| KeyError::MalformedKey(e.to_string()))?;
        let seed: [u8; 32] = seed_bytes
            .try_into()
            .map_err(|_| KeyError::MalformedKey("private key must be 32 bytes".into()))?;
        let keypair = Keypair::from_seed(&seed);

        let supplied = Ed25519PublicKey::from_hex(public_hex)
            .map_err(|e| KeyError::MalformedKey(e.to_string()))?;
        if supplied != keypair.public_key() {
            return Err(KeyError::KeyMismatch);
        }

        Ok(Self { keypair })
    }

    /// Construct from an existing keypair (tests, ephemeral deployments).
    pub fn from_keypair(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// Construct from environment variables holding hex key material.
    ///
    /// Absence of either variable is a startup-fatal error: the process
    /// must never become ready without a working signer.
    pub fn from_env(private_var: &'static str, public_var: &'static str) -> Result<Self, KeyError> {
        let private_hex =
            std::env::var(private_var).map_err(|_| KeyError::MissingKey(private_var))?;
        let public_hex = std::env::var(public_var).map_err(|_| KeyError::MissingKey(public_var))?;
        Self::from_hex(&private_hex, &public_hex)
    }

    /// Sign canonical manifest bytes.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        self.keypair.sign(message)
    }

    /// The signer's public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signer({:?})", self.public_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let keypair = Keypair::generate();
        let message = b"canonical bytes";
        let signature = keypair.sign(message);

        keypair
            .public_key()
            .verify(message, &signature)
            .expect("valid signature should verify");

        assert!(keypair.public_key().verify(b"other bytes", &signature).is_err());
    }

    #[test]
    fn test_signing_deterministic() {
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let s1 = keypair.sign(b"same message");
        let s2 = keypair.sign(b"same message");
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_signer_from_hex() {
        let keypair = Keypair::from_seed(&[0x07; 32]);
        let private_hex = hex::encode(keypair.seed());
        let public_hex = keypair.public_key().to_hex();

        let signer = Signer::from_hex(&private_hex, &public_hex).unwrap();
        assert_eq!(signer.public_key(), keypair.public_key());
    }

    #[test]
    fn test_signer_rejects_mismatched_public_key() {
        let keypair = Keypair::from_seed(&[0x07; 32]);
        let other = Keypair::from_seed(&[0x08; 32]);

        let result = Signer::from_hex(&hex::encode(keypair.seed()), &other.public_key().to_hex());
        assert!(matches!(result, Err(KeyError::KeyMismatch)));
    }

    #[test]
    fn test_signer_rejects_malformed_key() {
        assert!(matches!(
            Signer::from_hex("not hex", "also not hex"),
            Err(KeyError::MalformedKey(_))
        ));
        // Right charset, wrong length.
        assert!(matches!(
            Signer::from_hex("abcd", "abcd"),
            Err(KeyError::MalformedKey(_))
        ));
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let pk = Keypair::generate().public_key();
        assert_eq!(Ed25519PublicKey::from_hex(&pk.to_hex()).unwrap(), pk);
    }

    #[test]
    fn test_signature_hex_roundtrip() {
        let sig = Keypair::generate().sign(b"msg");
        assert_eq!(Ed25519Signature::from_hex(&sig.to_hex()).unwrap(), sig);
    }
}
