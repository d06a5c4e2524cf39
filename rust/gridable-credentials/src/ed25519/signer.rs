//! Ed25519 signer implementation.

use super::{error::Ed25519KeyError, verifier::Ed25519Verifier};
use crate::{
    did::{Did, Principal},
    error::SignError,
    identity::Identity,
    signer::SigningFunction,
};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fmt;

/// An Ed25519 `did:key` signer.
#[derive(Clone)]
pub struct Ed25519Signer {
    did: Did,
    verifier: Ed25519Verifier,
    signer: ed25519_dalek::SigningKey,
}

impl From<ed25519_dalek::SigningKey> for Ed25519Signer {
    fn from(signer: ed25519_dalek::SigningKey) -> Self {
        let verifier = Ed25519Verifier::from(signer.verifying_key());
        Self {
            did: verifier.did(),
            verifier,
            signer,
        }
    }
}

impl Ed25519Signer {
    /// Generate a new Ed25519 keypair with random bytes from `getrandom`.
    ///
    /// # Errors
    ///
    /// Returns an error if the RNG fails.
    pub fn generate() -> Result<Self, Ed25519KeyError> {
        let mut seed = [0u8; 32];
        getrandom::getrandom(&mut seed)?;
        Ok(ed25519_dalek::SigningKey::from_bytes(&seed).into())
    }

    /// Import a keypair from its 32 byte seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed has the wrong length.
    pub fn import(seed: &[u8]) -> Result<Self, Ed25519KeyError> {
        let seed: [u8; 32] = seed
            .try_into()
            .map_err(|_| Ed25519KeyError::InvalidSeedLength(seed.len()))?;
        Ok(ed25519_dalek::SigningKey::from_bytes(&seed).into())
    }

    /// Export the 32 byte seed.
    #[must_use]
    pub fn export(&self) -> [u8; 32] {
        self.signer.to_bytes()
    }

    /// Get the associated Ed25519 DID (verifier).
    #[must_use]
    pub const fn ed25519_did(&self) -> &Ed25519Verifier {
        &self.verifier
    }

    /// Turn this signer into an [`Identity`] named by its `did:key`.
    #[must_use]
    pub fn into_identity(self) -> Identity {
        let did = self.did.clone();
        Identity::new(did, self)
    }
}

impl fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519Signer")
            .field("did", &self.did)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Ed25519Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.did)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl SigningFunction for Ed25519Signer {
    async fn sign(&self, payload: &[u8]) -> Result<String, SignError> {
        use signature::Signer;
        let signature: ed25519_dalek::Signature = self
            .signer
            .try_sign(payload)
            .map_err(|error| SignError::SigningFailed(error.to_string()))?;
        Ok(STANDARD.encode(signature.to_bytes()))
    }
}

impl Principal for Ed25519Signer {
    fn did(&self) -> &Did {
        &self.did
    }
}
