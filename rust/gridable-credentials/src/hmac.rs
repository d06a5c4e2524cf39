//! Keyed HMAC-SHA256 signatures.
//!
//! A shared-secret scheme: each identifier has a secret key known to the
//! signer and to every verifier. Useful for closed deployments and tests
//! where public key infrastructure is not available. Signatures travel as
//! standard base64 of the 32 byte tag.

use crate::{did::Did, error::SignError, signer::SigningFunction, verification::VerificationFunction};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::{collections::HashMap, fmt};

type HmacSha256 = Hmac<Sha256>;

/// Signs payloads with one secret key.
#[derive(Clone)]
pub struct HmacSigner {
    key: Vec<u8>,
}

impl HmacSigner {
    /// Sign with `key`.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner").finish_non_exhaustive()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl SigningFunction for HmacSigner {
    async fn sign(&self, payload: &[u8]) -> Result<String, SignError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|error| SignError::KeyUnavailable(error.to_string()))?;
        mac.update(payload);
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// Verifies HMAC signatures by recomputing them with each signer's key.
///
/// Signers without a registered key are rejected. Tags are compared in
/// constant time.
#[derive(Clone, Default)]
pub struct HmacKeyring {
    keys: HashMap<Did, Vec<u8>>,
}

impl HmacKeyring {
    /// An empty keyring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the secret key of `did`, replacing any previous one.
    #[must_use]
    pub fn with_key(mut self, did: Did, key: impl Into<Vec<u8>>) -> Self {
        self.insert(did, key);
        self
    }

    /// Register the secret key of `did`, replacing any previous one.
    pub fn insert(&mut self, did: Did, key: impl Into<Vec<u8>>) {
        self.keys.insert(did, key.into());
    }

    /// A signer for `did`, if its key is known.
    pub fn signer(&self, did: &Did) -> Option<HmacSigner> {
        self.keys.get(did).map(|key| HmacSigner::new(key.clone()))
    }
}

impl fmt::Debug for HmacKeyring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacKeyring")
            .field("signers", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl VerificationFunction for HmacKeyring {
    async fn verify(
        &self,
        signature: &str,
        signer: &Did,
        payload: &[u8],
    ) -> Result<(), signature::Error> {
        let key = self.keys.get(signer).ok_or_else(signature::Error::new)?;
        let tag = STANDARD
            .decode(signature)
            .map_err(signature::Error::from_source)?;
        let mut mac = HmacSha256::new_from_slice(key).map_err(|_| signature::Error::new())?;
        mac.update(payload);
        mac.verify_slice(&tag).map_err(|_| signature::Error::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn did(raw: &str) -> Did {
        raw.parse().unwrap()
    }

    #[gridable_common::test]
    async fn it_verifies_its_own_signatures() {
        let keyring = HmacKeyring::new().with_key(did("did:ex:A"), b"secret-a".to_vec());
        let signer = keyring.signer(&did("did:ex:A")).unwrap();

        let signature = signer.sign(b"h1").await.unwrap();
        keyring.verify(&signature, &did("did:ex:A"), b"h1").await.unwrap();
        assert!(keyring.verify(&signature, &did("did:ex:A"), b"h2").await.is_err());
    }

    #[gridable_common::test]
    async fn it_rejects_unknown_signers_and_garbage() {
        let keyring = HmacKeyring::new().with_key(did("did:ex:A"), b"secret-a".to_vec());
        let signature = HmacSigner::new(b"secret-a".to_vec()).sign(b"h1").await.unwrap();

        assert!(keyring.verify(&signature, &did("did:ex:B"), b"h1").await.is_err());
        assert!(keyring.verify("%%%", &did("did:ex:A"), b"h1").await.is_err());
        assert!(keyring.verify("", &did("did:ex:A"), b"h1").await.is_err());
    }

    #[gridable_common::test]
    async fn it_binds_signatures_to_keys() {
        let keyring = HmacKeyring::new()
            .with_key(did("did:ex:A"), b"secret-a".to_vec())
            .with_key(did("did:ex:B"), b"secret-b".to_vec());
        let by_b = HmacSigner::new(b"secret-b".to_vec()).sign(b"h1").await.unwrap();

        assert!(keyring.verify(&by_b, &did("did:ex:A"), b"h1").await.is_err());
        keyring.verify(&by_b, &did("did:ex:B"), b"h1").await.unwrap();
    }
}
