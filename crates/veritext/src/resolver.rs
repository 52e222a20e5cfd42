//! Public key resolution for verification.
//!
//! Verification needs to know which public key a manifest should verify
//! against. When the caller supplies a `SignedManifest` the key travels
//! with it; when only a bare manifest and signature arrive, a resolver
//! answers the question.

use veritext_core::{Ed25519PublicKey, Manifest};

use crate::error::{Result, ServiceError};

/// Maps a manifest to the public key its signature should verify against.
///
/// Resolution is a lookup, not a trust decision: a resolved key only says
/// "this is the key the service signs with", never "this manifest is valid".
pub trait KeyResolver: Send + Sync {
    fn public_key_for(&self, manifest: &Manifest) -> Result<Ed25519PublicKey>;
}

/// Resolver for single-key deployments: every manifest verifies against
/// the one service key.
#[derive(Debug, Clone)]
pub struct StaticKeyResolver {
    key: Ed25519PublicKey,
}

impl StaticKeyResolver {
    pub fn new(key: Ed25519PublicKey) -> Self {
        Self { key }
    }
}

impl KeyResolver for StaticKeyResolver {
    fn public_key_for(&self, _manifest: &Manifest) -> Result<Ed25519PublicKey> {
        Ok(self.key)
    }
}

/// Resolver that knows no keys. For deployments that only ever verify
/// with caller-supplied keys.
#[derive(Debug, Clone, Default)]
pub struct NoKeyResolver;

impl KeyResolver for NoKeyResolver {
    fn public_key_for(&self, manifest: &Manifest) -> Result<Ed25519PublicKey> {
        Err(ServiceError::KeyResolution(format!(
            "no resolver configured for manifest with hash {}",
            manifest.hash
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritext_core::{Keypair, ManifestBuilder};

    #[test]
    fn test_static_resolver_returns_configured_key() {
        let keypair = Keypair::from_seed(&[0x01; 32]);
        let resolver = StaticKeyResolver::new(keypair.public_key());
        let manifest = ManifestBuilder::new().build("text", None).unwrap();

        let resolved = resolver.public_key_for(&manifest).unwrap();
        assert_eq!(resolved, keypair.public_key());
    }

    #[test]
    fn test_no_key_resolver_errors() {
        let manifest = ManifestBuilder::new().build("text", None).unwrap();
        let err = NoKeyResolver.public_key_for(&manifest).unwrap_err();
        assert!(matches!(err, ServiceError::KeyResolution(_)));
    }
}
