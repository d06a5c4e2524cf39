use crate::{
    capability::Capability,
    controller::AccessController,
    entry::LogEntry,
    error::{AdminError, BuildError},
    options::AccessOptions,
    registry::{Registry, SchemeTag},
};
use gridable_credentials::{Did, Identity, SignError};

/// The local actor's view of the system: who "we" are and which schemes we
/// can load.
///
/// Holding the identity here, rather than in a process global, lets several
/// actors live side by side in one process.
#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
    registry: Registry,
}

impl Session {
    /// A session acting as `identity`.
    pub fn new(identity: Identity, registry: Registry) -> Self {
        Self { identity, registry }
    }

    /// The acting identity.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The scheme registry this session loads controllers through.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the registry, for late binding of verification
    /// functions.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Options naming this session's identity as sole writer and admin.
    pub fn owner_controlled(&self) -> AccessOptions {
        AccessOptions::new([self.identity.id().clone()])
    }

    /// Construct a new controller of scheme `tag` through the registry.
    ///
    /// # Errors
    ///
    /// See [`Registry::create`].
    pub fn open(&self, tag: SchemeTag, options: AccessOptions) -> Result<AccessController, BuildError> {
        self.registry.create(tag, options)
    }

    /// Reconstruct a controller from its JSON manifest.
    ///
    /// # Errors
    ///
    /// See [`Registry::load_json`].
    pub fn load(&self, manifest: &[u8]) -> Result<AccessController, BuildError> {
        self.registry.load_json(manifest)
    }

    /// Author a signed entry for `payload` as this session's identity.
    ///
    /// # Errors
    ///
    /// Fails if the identity cannot sign.
    pub async fn sign_entry(&self, payload: &[u8]) -> Result<LogEntry, SignError> {
        LogEntry::create(&self.identity, payload).await
    }

    /// [`AccessController::grant`] as this session's identity.
    ///
    /// # Errors
    ///
    /// See [`AccessController::grant`].
    pub fn grant(
        &self,
        controller: &AccessController,
        capability: Capability,
        target: Did,
    ) -> Result<(), AdminError> {
        controller.grant(&self.identity, capability, target)
    }

    /// [`AccessController::revoke`] as this session's identity.
    ///
    /// # Errors
    ///
    /// See [`AccessController::revoke`].
    pub fn revoke(
        &self,
        controller: &AccessController,
        capability: Capability,
        target: &Did,
    ) -> Result<(), AdminError> {
        controller.revoke(&self.identity, capability, target)
    }

    /// [`AccessController::lock_permanently`] as this session's identity.
    ///
    /// # Errors
    ///
    /// See [`AccessController::lock_permanently`].
    pub fn lock_permanently(&self, controller: &AccessController) -> Result<(), AdminError> {
        controller.lock_permanently(&self.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridable_credentials::{HmacKeyring, HmacSigner};

    fn session(raw: &str, keyring: &HmacKeyring) -> Session {
        let did: Did = raw.parse().unwrap();
        let signer = keyring.signer(&did).unwrap();
        Session::new(
            Identity::new(did, signer),
            Registry::new().with_verification(SchemeTag::Did, keyring.clone()),
        )
    }

    #[gridable_common::test]
    async fn it_opens_owner_controlled_logs() {
        let keyring = HmacKeyring::new()
            .with_key("did:ex:A".parse().unwrap(), b"alice".to_vec())
            .with_key("did:ex:B".parse().unwrap(), b"bob".to_vec());
        let alice = session("did:ex:A", &keyring);
        let bob = session("did:ex:B", &keyring);

        let controller = alice
            .open(SchemeTag::Did, alice.owner_controlled())
            .unwrap();
        assert_eq!(controller.writers(), vec![alice.identity().id().clone()]);

        let entry = alice.sign_entry(b"hello").await.unwrap();
        assert!(controller.can_append(&entry).await);

        let entry = bob.sign_entry(b"hello").await.unwrap();
        assert!(!controller.can_append(&entry).await);

        alice
            .grant(&controller, Capability::Write, bob.identity().id().clone())
            .unwrap();
        assert!(controller.can_append(&entry).await);

        assert!(matches!(
            bob.revoke(&controller, Capability::Write, alice.identity().id()),
            Err(AdminError::Unauthorized { .. })
        ));
    }

    #[gridable_common::test]
    async fn it_reloads_from_a_manifest() {
        let keyring = HmacKeyring::new().with_key("did:ex:A".parse().unwrap(), b"alice".to_vec());
        let alice = session("did:ex:A", &keyring);

        let controller = alice
            .open(SchemeTag::Did, alice.owner_controlled())
            .unwrap();
        let manifest = controller.manifest().to_json().unwrap();

        let reloaded = alice.load(&manifest).unwrap();
        assert_eq!(reloaded.manifest_params(), controller.manifest_params());

        let entry = alice.sign_entry(b"row").await.unwrap();
        assert!(reloaded.can_append(&entry).await);

        let unbound = Session::new(
            Identity::new("did:ex:A".parse().unwrap(), HmacSigner::new(b"alice".to_vec())),
            Registry::new(),
        );
        assert!(matches!(
            unbound.load(&manifest),
            Err(BuildError::MissingVerificationFunction(SchemeTag::Did))
        ));
    }
}
