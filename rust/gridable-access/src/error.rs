use crate::registry::SchemeTag;
use gridable_credentials::Did;

/// Errors that abort construction of an [`crate::AccessController`].
///
/// No controller exists after any of these; fix the input before retrying.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Malformed construction input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No live verification function was supplied for the scheme.
    #[error("No verification function supplied for access controller type '{0}'")]
    MissingVerificationFunction(SchemeTag),

    /// The manifest names a scheme this build does not know.
    #[error("Unknown access controller type '{0}'")]
    UnknownScheme(String),

    /// The manifest could not be decoded.
    #[error("Malformed manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Errors from administrative operations on capability sets.
///
/// Capability sets are left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminError {
    /// The caller is not in the admin set.
    #[error("'{caller}' is not authorized to {action} capabilities")]
    Unauthorized {
        /// Identifier of the rejected caller.
        caller: Did,
        /// What the caller attempted.
        action: &'static str,
    },

    /// The change would break a controller invariant.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}
