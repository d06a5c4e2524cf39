//! The write authorization decision point.

use crate::{
    capability::Capability,
    entry::Appendable,
    error::{AdminError, BuildError},
    manifest::{Manifest, ManifestParams},
    options::AccessOptions,
    registry::SchemeTag,
};
use gridable_common::{GridableAsyncError, SharedCell, bounded};
use gridable_credentials::{Did, Principal, VerificationFunction, verify};
use std::{collections::BTreeSet, fmt, sync::Arc, time::Duration};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CapabilitySets {
    write: BTreeSet<Did>,
    admin: BTreeSet<Did>,
    sealed: bool,
}

/// Decides whether a log entry may be appended, and who may change that.
///
/// A controller is always fully configured: construction either yields a
/// controller whose write set is non-empty (or deliberately sealed) and whose
/// verification function is live, or it fails.
///
/// [`AccessController::can_append`] takes `&self` and may run concurrently
/// with itself and with administrative calls. Each decision reads the
/// capability sets under one read guard; no guard is held while the
/// verification function runs.
pub struct AccessController {
    capabilities: SharedCell<CapabilitySets>,
    verification: Arc<dyn VerificationFunction>,
    verification_timeout: Duration,
}

impl AccessController {
    /// Scheme tag recorded in this controller's manifest.
    pub const TYPE: SchemeTag = SchemeTag::Did;

    /// Construct a controller.
    ///
    /// # Errors
    ///
    /// - [`BuildError::MissingVerificationFunction`] when `options` carry no
    ///   verification function.
    /// - [`BuildError::InvalidArgument`] when the write set is empty (unless
    ///   the options describe a sealed controller) or a sealed controller
    ///   lists writers.
    pub fn create(options: AccessOptions) -> Result<Self, BuildError> {
        let verification = options
            .verification
            .ok_or(BuildError::MissingVerificationFunction(Self::TYPE))?;

        let write: BTreeSet<Did> = options.write.into_iter().collect();
        match (write.is_empty(), options.sealed) {
            (true, false) => {
                return Err(BuildError::InvalidArgument(
                    "write access list must name at least one identifier".into(),
                ));
            }
            (false, true) => {
                return Err(BuildError::InvalidArgument(
                    "a sealed access controller cannot list writers".into(),
                ));
            }
            _ => {}
        }

        let admin = match options.admin {
            Some(admin) => admin.into_iter().collect(),
            None => write.clone(),
        };

        tracing::debug!(
            writers = write.len(),
            admins = admin.len(),
            sealed = options.sealed,
            "access controller configured"
        );

        Ok(Self {
            capabilities: SharedCell::new(CapabilitySets {
                write,
                admin,
                sealed: options.sealed,
            }),
            verification,
            verification_timeout: options.verification_timeout,
        })
    }

    /// The scheme this controller implements.
    pub fn scheme(&self) -> SchemeTag {
        Self::TYPE
    }

    /// Decide whether `entry` may be appended.
    ///
    /// Denies, in order, when the entry names no writer, when the writer
    /// lacks write access, when the signature or content hash is missing,
    /// and when the verification function rejects the signature or does not
    /// answer within the verification timeout. Membership is checked first
    /// so that unknown writers never cost a verification. Admission always
    /// requires both membership and a valid signature: the writer field is
    /// whatever the sender put there.
    ///
    /// Never fails; denial is the ordinary `false`.
    #[tracing::instrument(level = "debug", skip_all, fields(writer = entry.writer().unwrap_or_default()))]
    pub async fn can_append<E>(&self, entry: &E) -> bool
    where
        E: Appendable + ?Sized,
    {
        let Some(writer) = entry.writer().filter(|writer| !writer.is_empty()) else {
            tracing::debug!("denied: entry names no writer");
            return false;
        };

        let Ok(writer) = writer.parse::<Did>() else {
            tracing::debug!("denied: writer is not a DID");
            return false;
        };

        if !self.can_write(&writer) {
            tracing::debug!("denied: writer lacks write access");
            return false;
        }

        let (Some(signature), Some(content_hash)) = (entry.signature(), entry.content_hash())
        else {
            tracing::debug!("denied: entry is missing its signature or content hash");
            return false;
        };

        let check = verify(
            signature,
            &writer,
            content_hash.as_bytes(),
            self.verification.as_ref(),
        );
        match bounded(self.verification_timeout, check).await {
            Ok(true) => {
                tracing::debug!("granted");
                true
            }
            Ok(false) => {
                tracing::debug!("denied: signature does not verify");
                false
            }
            Err(GridableAsyncError::Elapsed(limit)) => {
                tracing::warn!(?limit, "denied: signature verification timed out");
                false
            }
        }
    }

    /// Add `target` to the `capability` set.
    ///
    /// The change is in memory only; persisting it (for example by writing
    /// [`AccessController::manifest`] back to the log) is up to the caller.
    ///
    /// # Errors
    ///
    /// [`AdminError::Unauthorized`] if `caller` is not an admin;
    /// [`AdminError::InvariantViolation`] when granting write access on a
    /// sealed controller.
    #[tracing::instrument(level = "info", skip_all, fields(caller = %caller.did(), %capability, %target))]
    pub fn grant(
        &self,
        caller: &impl Principal,
        capability: Capability,
        target: Did,
    ) -> Result<(), AdminError> {
        let mut sets = self.capabilities.write();
        Self::authorize(&sets, caller, "grant")?;

        let added = match capability {
            Capability::Write if sets.sealed => {
                return Err(AdminError::InvariantViolation(
                    "access controller is permanently locked".into(),
                ));
            }
            Capability::Write => sets.write.insert(target),
            Capability::Admin => sets.admin.insert(target),
        };
        tracing::info!(added, "capability granted");
        Ok(())
    }

    /// Remove `target` from the `capability` set. Removing an identifier
    /// that does not hold the capability is a no-op.
    ///
    /// # Errors
    ///
    /// [`AdminError::Unauthorized`] if `caller` is not an admin;
    /// [`AdminError::InvariantViolation`] when `target` is the last writer
    /// (see [`AccessController::lock_permanently`]).
    #[tracing::instrument(level = "info", skip_all, fields(caller = %caller.did(), %capability, %target))]
    pub fn revoke(
        &self,
        caller: &impl Principal,
        capability: Capability,
        target: &Did,
    ) -> Result<(), AdminError> {
        let mut sets = self.capabilities.write();
        Self::authorize(&sets, caller, "revoke")?;

        let removed = match capability {
            Capability::Write => {
                if sets.write.len() == 1 && sets.write.contains(target) {
                    return Err(AdminError::InvariantViolation(format!(
                        "'{target}' is the last writer; use lock_permanently to seal the log"
                    )));
                }
                sets.write.remove(target)
            }
            Capability::Admin => sets.admin.remove(target),
        };
        tracing::info!(removed, "capability revoked");
        Ok(())
    }

    /// Revoke every write capability and seal the controller, so that no
    /// entry can ever be appended again and write access can never be
    /// granted again. Admin membership is kept. Recorded in the manifest.
    ///
    /// # Errors
    ///
    /// [`AdminError::Unauthorized`] if `caller` is not an admin.
    #[tracing::instrument(level = "warn", skip_all, fields(caller = %caller.did()))]
    pub fn lock_permanently(&self, caller: &impl Principal) -> Result<(), AdminError> {
        let mut sets = self.capabilities.write();
        Self::authorize(&sets, caller, "lock")?;

        sets.write.clear();
        sets.sealed = true;
        tracing::warn!("access controller permanently locked");
        Ok(())
    }

    fn authorize(
        sets: &CapabilitySets,
        caller: &impl Principal,
        action: &'static str,
    ) -> Result<(), AdminError> {
        if sets.admin.contains(caller.did()) {
            Ok(())
        } else {
            tracing::warn!(caller = %caller.did(), action, "unauthorized capability change");
            Err(AdminError::Unauthorized {
                caller: caller.did().clone(),
                action,
            })
        }
    }

    /// Whether `did` currently holds write access.
    pub fn can_write(&self, did: &Did) -> bool {
        self.capabilities.read().write.contains(did)
    }

    /// Whether `did` currently holds admin access.
    pub fn is_admin(&self, did: &Did) -> bool {
        self.capabilities.read().admin.contains(did)
    }

    /// Whether the controller was permanently locked.
    pub fn is_sealed(&self) -> bool {
        self.capabilities.read().sealed
    }

    /// Current writers, sorted.
    pub fn writers(&self) -> Vec<Did> {
        self.capabilities.read().write.iter().cloned().collect()
    }

    /// Current admins, sorted.
    pub fn admins(&self) -> Vec<Did> {
        self.capabilities.read().admin.iter().cloned().collect()
    }

    /// Capability sets for persistence. Never includes the verification
    /// function.
    pub fn manifest_params(&self) -> ManifestParams {
        let sets = self.capabilities.read();
        ManifestParams {
            write: sets.write.iter().cloned().collect(),
            admin: Some(sets.admin.iter().cloned().collect()),
            sealed: sets.sealed,
        }
    }

    /// Full manifest, tagged with [`AccessController::TYPE`].
    pub fn manifest(&self) -> Manifest {
        Manifest {
            scheme: Self::TYPE,
            params: self.manifest_params(),
        }
    }
}

impl fmt::Debug for AccessController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sets = self.capabilities.read();
        f.debug_struct("AccessController")
            .field("write", &sets.write)
            .field("admin", &sets.admin)
            .field("sealed", &sets.sealed)
            .field("verification_timeout", &self.verification_timeout)
            .finish_non_exhaustive()
    }
}
