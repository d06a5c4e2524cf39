//! Signature verification.
//!
//! Verification is deliberately detached from any particular
//! [`crate::Identity`]: a verifier checks signatures produced by *other*
//! actors, so all it needs is the claimed signer's identifier, the payload and
//! the signature.

use crate::did::Did;
use async_trait::async_trait;
use gridable_common::ConditionalSync;
use std::sync::Arc;

/// Validates a signature against a claimed signer and payload.
///
/// Implementations typically resolve `signer` to public key material (a
/// `did:key` decodes in place; other methods may need network I/O) and check
/// the signature with it. Any failure to resolve, decode or verify is an
/// error; callers treat every error as "not authentic".
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait VerificationFunction: ConditionalSync {
    /// Verify that `signature` is a valid signature by `signer` over `payload`.
    async fn verify(
        &self,
        signature: &str,
        signer: &Did,
        payload: &[u8],
    ) -> Result<(), signature::Error>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<V> VerificationFunction for Arc<V>
where
    V: VerificationFunction + ?Sized,
{
    async fn verify(
        &self,
        signature: &str,
        signer: &Did,
        payload: &[u8],
    ) -> Result<(), signature::Error> {
        (**self).verify(signature, signer, payload).await
    }
}

/// Check `signature` over `data` by `identifier` using `verification`.
///
/// Never fails: every rejection, whatever its cause, comes back as `false`.
pub async fn verify(
    signature: &str,
    identifier: &Did,
    data: &[u8],
    verification: &dyn VerificationFunction,
) -> bool {
    match verification.verify(signature, identifier, data).await {
        Ok(()) => true,
        Err(error) => {
            tracing::debug!(did = %identifier, %error, "signature rejected");
            false
        }
    }
}

/// Adapts a plain predicate into a [`VerificationFunction`].
///
/// Built via [`verify_with`].
#[derive(Clone, Copy)]
pub struct FnVerifier<F>(F);

/// Wrap a synchronous predicate `(signature, signer, payload) -> bool` as a
/// [`VerificationFunction`].
pub fn verify_with<F>(f: F) -> FnVerifier<F>
where
    F: Fn(&str, &Did, &[u8]) -> bool + ConditionalSync,
{
    FnVerifier(f)
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<F> VerificationFunction for FnVerifier<F>
where
    F: Fn(&str, &Did, &[u8]) -> bool + ConditionalSync,
{
    async fn verify(
        &self,
        signature: &str,
        signer: &Did,
        payload: &[u8],
    ) -> Result<(), signature::Error> {
        if (self.0)(signature, signer, payload) {
            Ok(())
        } else {
            Err(signature::Error::new())
        }
    }
}

/// Restricts an inner verifier to signers using one of a set of DID methods.
///
/// The method check runs first and is cheap; signatures from any other
/// method are rejected without consulting the inner verifier. It narrows a
/// verifier, it never replaces one: a well-formed identifier proves nothing
/// about authorship.
#[derive(Debug, Clone)]
pub struct RequireMethod<V> {
    methods: Vec<String>,
    inner: V,
}

impl<V> RequireMethod<V> {
    /// Accept only signers whose DID method is one of `methods`.
    pub fn new<I, M>(methods: I, inner: V) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
            inner,
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<V> VerificationFunction for RequireMethod<V>
where
    V: VerificationFunction,
{
    async fn verify(
        &self,
        signature: &str,
        signer: &Did,
        payload: &[u8],
    ) -> Result<(), signature::Error> {
        if !self.methods.iter().any(|method| method == signer.method()) {
            return Err(signature::Error::new());
        }
        self.inner.verify(signature, signer, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn did(raw: &str) -> Did {
        raw.parse().unwrap()
    }

    #[gridable_common::test]
    async fn it_maps_rejections_to_false() {
        let accept = verify_with(|sig: &str, _: &Did, data: &[u8]| sig.as_bytes() == data);
        assert!(verify("h1", &did("did:ex:A"), b"h1", &accept).await);
        assert!(!verify("h1", &did("did:ex:A"), b"h2", &accept).await);
    }

    #[gridable_common::test]
    async fn it_skips_inner_verifier_for_other_methods() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let inner = verify_with(move |_: &str, _: &Did, _: &[u8]| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });
        let verifier = RequireMethod::new(["key"], inner);

        assert!(!verify("sig", &did("did:web:example.com"), b"x", &verifier).await);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(verify("sig", &did("did:key:z6Mk"), b"x", &verifier).await);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[gridable_common::test]
    async fn it_verifies_through_shared_handles() {
        let shared: Arc<dyn VerificationFunction> =
            Arc::new(verify_with(|_: &str, _: &Did, _: &[u8]| true));
        assert!(verify("sig", &did("did:ex:A"), b"x", &shared).await);
    }
}
