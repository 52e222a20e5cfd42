//! Strong identifier types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::CoreError;

/// A 32-byte manifest identifier, computed as
/// SHA-256(canonical_bytes || signature).
///
/// This is the content address of a signed manifest: the same manifest and
/// signature always produce the same id, and any change to either produces
/// a different one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ManifestId(pub [u8; 32]);

impl ManifestId {
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

impl fmt::Debug for ManifestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ManifestId({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for ManifestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for ManifestId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for ManifestId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for ManifestId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ManifestId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_id_hex_roundtrip() {
        let id = ManifestId::from_bytes([0x42; 32]);
        assert_eq!(ManifestId::from_hex(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn test_manifest_id_display_is_full_hex() {
        let id = ManifestId::from_bytes([0xab; 32]);
        assert_eq!(format!("{}", id).len(), 64);
    }

    #[test]
    fn test_manifest_id_rejects_bad_hex() {
        assert!(ManifestId::from_hex("nope").is_err());
        assert!(ManifestId::from_hex("abcd").is_err());
    }
}
