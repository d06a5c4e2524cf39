//! Ed25519 DID key resolver.

use super::verifier::Ed25519Verifier;
use crate::{did::Did, verification::VerificationFunction};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};

/// Verifies base64 Ed25519 signatures by decoding the signer's `did:key`.
///
/// Signers identified by any other DID method are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519KeyResolver;

impl Ed25519KeyResolver {
    /// Resolve `did` to the public key it embeds.
    ///
    /// # Errors
    ///
    /// Fails if `did` is not an Ed25519 `did:key`.
    pub fn resolve(&self, did: &Did) -> Result<Ed25519Verifier, signature::Error> {
        did.as_str()
            .parse::<Ed25519Verifier>()
            .map_err(signature::Error::from_source)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl VerificationFunction for Ed25519KeyResolver {
    async fn verify(
        &self,
        signature: &str,
        signer: &Did,
        payload: &[u8],
    ) -> Result<(), signature::Error> {
        let verifier = self.resolve(signer)?;
        let bytes = STANDARD
            .decode(signature)
            .map_err(signature::Error::from_source)?;
        let signature = ed25519_dalek::Signature::from_slice(&bytes)?;
        verifier.verify_signature(payload, &signature)
    }
}
