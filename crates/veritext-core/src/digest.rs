//! Content digests: SHA-256 over UTF-8 text bytes.
//!
//! The signing path hashes the literal bytes submitted. [`normalize_text`]
//! is a separate, optional helper; if used, it must be applied identically
//! before both signing and verification or the digests diverge.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::CoreError;

/// A 32-byte SHA-256 hash, rendered as 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Compute the SHA-256 hash of the given data.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

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
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CoreError::MalformedHex("expected 32 bytes".into()))?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256({}...)", &self.to_hex()[..8])
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Sha256Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Sha256Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// On the wire a hash is always its hex form.
impl Serialize for Sha256Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Sha256Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Compute the content digest of a text: SHA-256 over its UTF-8 bytes.
pub fn digest_text(text: &str) -> Sha256Hash {
    Sha256Hash::hash(text.as_bytes())
}

/// Normalize text before hashing: CRLF and lone CR become LF, leading and
/// trailing whitespace is trimmed.
///
/// Not applied by the signing path. Callers that opt in must normalize on
/// both sides of the protocol.
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let a = digest_text("some text");
        let b = digest_text("some text");
        assert_eq!(a, b);

        let c = digest_text("some texT");
        assert_ne!(a, c);
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(
            digest_text("hello").to_hex(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(
            digest_text("").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hex_roundtrip() {
        let h = digest_text("roundtrip");
        let recovered = Sha256Hash::from_hex(&h.to_hex()).unwrap();
        assert_eq!(h, recovered);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(Sha256Hash::from_hex("zz").is_err());
        assert!(Sha256Hash::from_hex("abcd").is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let h = digest_text("hello");
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(
            json,
            "\"2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824\""
        );
        let back: Sha256Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("a\r\nb"), "a\nb");
        assert_eq!(normalize_text("a\rb"), "a\nb");
        assert_eq!(normalize_text("  padded  "), "padded");
    }

    #[test]
    fn test_normalization_changes_digest() {
        let raw = "line one\r\nline two";
        assert_ne!(digest_text(raw), digest_text(&normalize_text(raw)));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn digest_deterministic(text in ".*") {
                prop_assert_eq!(digest_text(&text), digest_text(&text));
            }

            #[test]
            fn hex_roundtrip(bytes in any::<[u8; 32]>()) {
                let h = Sha256Hash::from_bytes(bytes);
                prop_assert_eq!(Sha256Hash::from_hex(&h.to_hex()).unwrap(), h);
            }

            #[test]
            fn normalize_idempotent(text in ".*") {
                let once = normalize_text(&text);
                prop_assert_eq!(normalize_text(&once), once);
            }
        }
    }
}
