//! The local actor: an identifier plus the ability to sign on its behalf.

use crate::{
    did::{Did, Principal},
    error::{IdentityError, SignError},
    signer::SigningFunction,
};
use gridable_common::{GridableAsyncError, bounded};
use std::{fmt, sync::Arc, time::Duration};

/// Default upper bound on a single [`Identity::sign`] call.
pub const DEFAULT_SIGNING_TIMEOUT: Duration = Duration::from_secs(30);

/// One local actor.
///
/// An `Identity` is immutable: its [`Did`] is fixed at construction and the
/// signing function is shared behind an [`Arc`], so clones are cheap and
/// [`Identity::sign`] may be called concurrently from many tasks.
#[derive(Clone)]
pub struct Identity {
    did: Did,
    signer: Arc<dyn SigningFunction>,
    signing_timeout: Duration,
}

impl Identity {
    /// Type tag of this identity provider.
    pub const TYPE: &'static str = "did";

    /// Bind `signer` to `did`.
    pub fn new(did: Did, signer: impl SigningFunction + 'static) -> Self {
        Self {
            did,
            signer: Arc::new(signer),
            signing_timeout: DEFAULT_SIGNING_TIMEOUT,
        }
    }

    /// Create an identity from a raw identifier and an optional signer.
    ///
    /// # Errors
    ///
    /// Fails if `identifier` is empty or not a DID, or if `signer` is absent.
    pub fn create(
        identifier: &str,
        signer: Option<Arc<dyn SigningFunction>>,
    ) -> Result<Self, IdentityError> {
        let mut builder = IdentityBuilder::new().identifier(identifier);
        if let Some(signer) = signer {
            builder = builder.shared_signer(signer);
        }
        builder.try_build()
    }

    /// Start building an identity.
    pub fn builder() -> IdentityBuilder {
        IdentityBuilder::new()
    }

    /// This identity's identifier.
    pub fn id(&self) -> &Did {
        &self.did
    }

    /// How long [`Identity::sign`] waits for the signing function.
    pub fn signing_timeout(&self) -> Duration {
        self.signing_timeout
    }

    /// Replace the signing timeout.
    #[must_use]
    pub fn with_signing_timeout(mut self, timeout: Duration) -> Self {
        self.signing_timeout = timeout;
        self
    }

    /// Sign `data` with the bound signing function.
    ///
    /// # Errors
    ///
    /// Returns the signing function's own error, or [`SignError::TimedOut`]
    /// when it does not answer within the signing timeout. Retrying is up to
    /// the caller.
    #[tracing::instrument(level = "trace", skip(self, data), fields(did = %self.did, len = data.len()))]
    pub async fn sign(&self, data: &[u8]) -> Result<String, SignError> {
        match bounded(self.signing_timeout, self.signer.sign(data)).await {
            Ok(result) => result,
            Err(GridableAsyncError::Elapsed(limit)) => {
                tracing::warn!(did = %self.did, ?limit, "signing function timed out");
                Err(SignError::TimedOut(limit))
            }
        }
    }
}

impl Principal for Identity {
    fn did(&self) -> &Did {
        &self.did
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("did", &self.did)
            .field("signing_timeout", &self.signing_timeout)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.did)
    }
}

/// Builder for [`Identity`] that validates its inputs on [`try_build`].
///
/// [`try_build`]: IdentityBuilder::try_build
#[derive(Default)]
pub struct IdentityBuilder {
    identifier: Option<String>,
    signer: Option<Arc<dyn SigningFunction>>,
    signing_timeout: Option<Duration>,
}

impl IdentityBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier.
    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Set the signing function.
    #[must_use]
    pub fn signer(self, signer: impl SigningFunction + 'static) -> Self {
        self.shared_signer(Arc::new(signer))
    }

    /// Set an already shared signing function.
    #[must_use]
    pub fn shared_signer(mut self, signer: Arc<dyn SigningFunction>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Override [`DEFAULT_SIGNING_TIMEOUT`].
    #[must_use]
    pub fn signing_timeout(mut self, timeout: Duration) -> Self {
        self.signing_timeout = Some(timeout);
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// See [`IdentityError`].
    pub fn try_build(self) -> Result<Identity, IdentityError> {
        let identifier = self
            .identifier
            .filter(|identifier| !identifier.is_empty())
            .ok_or(IdentityError::MissingIdentifier)?;
        let did: Did = identifier.parse()?;
        let signer = self.signer.ok_or(IdentityError::MissingSigner)?;

        Ok(Identity {
            did,
            signer,
            signing_timeout: self.signing_timeout.unwrap_or(DEFAULT_SIGNING_TIMEOUT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::sign_with;

    fn echo() -> Arc<dyn SigningFunction> {
        Arc::new(sign_with(|payload: &[u8]| {
            Ok(String::from_utf8_lossy(payload).into_owned())
        }))
    }

    #[gridable_common::test]
    fn it_rejects_missing_identifier() {
        let result = Identity::create("", Some(echo()));
        assert_eq!(result.unwrap_err(), IdentityError::MissingIdentifier);

        let result = Identity::builder().signer(sign_with(|_: &[u8]| Ok(String::new()))).try_build();
        assert_eq!(result.unwrap_err(), IdentityError::MissingIdentifier);
    }

    #[gridable_common::test]
    fn it_rejects_missing_signer() {
        let result = Identity::create("did:ex:A", None);
        assert_eq!(result.unwrap_err(), IdentityError::MissingSigner);
    }

    #[gridable_common::test]
    fn it_rejects_non_did_identifiers() {
        let result = Identity::create("alice", Some(echo()));
        assert!(matches!(result, Err(IdentityError::InvalidIdentifier(_))));
    }

    #[gridable_common::test]
    async fn it_delegates_signing_to_the_bound_function() {
        let identity = Identity::create("did:ex:A", Some(echo())).unwrap();
        assert_eq!(identity.id().as_str(), "did:ex:A");
        assert_eq!(identity.sign(b"h1").await.unwrap(), "h1");
    }

    #[gridable_common::test]
    async fn it_surfaces_signer_failures() {
        let identity = Identity::new(
            "did:ex:A".parse().unwrap(),
            sign_with(|_: &[u8]| Err(SignError::KeyUnavailable("locked".into()))),
        );
        assert_eq!(
            identity.sign(b"h1").await,
            Err(SignError::KeyUnavailable("locked".into()))
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[gridable_common::test]
    async fn it_times_out_stalled_signers() {
        struct Stalled;

        #[async_trait::async_trait]
        impl SigningFunction for Stalled {
            async fn sign(&self, _payload: &[u8]) -> Result<String, SignError> {
                std::future::pending().await
            }
        }

        let identity = Identity::new("did:ex:A".parse().unwrap(), Stalled)
            .with_signing_timeout(Duration::from_millis(10));
        assert_eq!(
            identity.sign(b"h1").await,
            Err(SignError::TimedOut(Duration::from_millis(10)))
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn it_signs_outside_of_a_tokio_runtime() {
        let identity = Identity::create("did:ex:A", Some(echo())).unwrap();
        let signature = futures::executor::block_on(identity.sign(b"h1"));
        assert_eq!(signature, Ok("h1".to_string()));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[gridable_common::test]
    async fn it_signs_concurrently_from_clones() {
        let identity = Identity::create("did:ex:A", Some(echo())).unwrap();
        let tasks: Vec<_> = (0..8)
            .map(|n| {
                let identity = identity.clone();
                tokio::spawn(async move { identity.sign(format!("h{n}").as_bytes()).await })
            })
            .collect();
        for (n, task) in tasks.into_iter().enumerate() {
            assert_eq!(task.await.unwrap().unwrap(), format!("h{n}"));
        }
    }
}
