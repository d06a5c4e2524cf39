use crate::manifest::ManifestParams;
use gridable_credentials::{Did, VerificationFunction};
use std::{fmt, sync::Arc, time::Duration};

/// Default upper bound on one signature verification inside
/// [`crate::AccessController::can_append`].
pub const DEFAULT_VERIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything needed to construct an [`crate::AccessController`].
///
/// ```
/// use gridable_access::AccessOptions;
/// use gridable_credentials::HmacKeyring;
/// use std::time::Duration;
///
/// let owner = "did:ex:A".parse().unwrap();
/// let options = AccessOptions::new([owner])
///     .verification(HmacKeyring::new())
///     .verification_timeout(Duration::from_secs(1));
/// # let _ = options;
/// ```
#[derive(Clone)]
pub struct AccessOptions {
    pub(crate) write: Vec<Did>,
    pub(crate) admin: Option<Vec<Did>>,
    pub(crate) verification: Option<Arc<dyn VerificationFunction>>,
    pub(crate) verification_timeout: Duration,
    pub(crate) sealed: bool,
}

impl AccessOptions {
    /// Options granting write access to `write`. Admins default to the same
    /// identifiers.
    pub fn new(write: impl IntoIterator<Item = Did>) -> Self {
        Self {
            write: write.into_iter().collect(),
            admin: None,
            verification: None,
            verification_timeout: DEFAULT_VERIFICATION_TIMEOUT,
            sealed: false,
        }
    }

    /// Set the admin set explicitly. It may be disjoint from the write set.
    #[must_use]
    pub fn admin(mut self, admin: impl IntoIterator<Item = Did>) -> Self {
        self.admin = Some(admin.into_iter().collect());
        self
    }

    /// Bind the verification function.
    #[must_use]
    pub fn verification(self, verification: impl VerificationFunction + 'static) -> Self {
        self.shared_verification(Arc::new(verification))
    }

    /// Bind an already shared verification function.
    #[must_use]
    pub fn shared_verification(mut self, verification: Arc<dyn VerificationFunction>) -> Self {
        self.verification = Some(verification);
        self
    }

    /// Override [`DEFAULT_VERIFICATION_TIMEOUT`].
    #[must_use]
    pub fn verification_timeout(mut self, timeout: Duration) -> Self {
        self.verification_timeout = timeout;
        self
    }
}

impl From<ManifestParams> for AccessOptions {
    fn from(params: ManifestParams) -> Self {
        Self {
            write: params.write,
            admin: params.admin,
            verification: None,
            verification_timeout: DEFAULT_VERIFICATION_TIMEOUT,
            sealed: params.sealed,
        }
    }
}

impl fmt::Debug for AccessOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessOptions")
            .field("write", &self.write)
            .field("admin", &self.admin)
            .field("verification", &self.verification.is_some())
            .field("verification_timeout", &self.verification_timeout)
            .field("sealed", &self.sealed)
            .finish()
    }
}
