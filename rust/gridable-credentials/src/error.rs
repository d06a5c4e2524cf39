use crate::did::DidParseError;
use std::time::Duration;

/// Errors from constructing an [`crate::Identity`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// No identifier was supplied, or it was empty.
    #[error("An identifier is required to create an identity")]
    MissingIdentifier,

    /// The identifier is not a well-formed DID.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] DidParseError),

    /// No signing function was supplied.
    #[error("A signing function is required to create an identity")]
    MissingSigner,
}

/// Error that can occur during signing operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignError {
    /// The signing key is not available or cannot be used.
    #[error("Signing key unavailable: {0}")]
    KeyUnavailable(String),

    /// An error occurred during the signing operation.
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// The signing function did not answer in time.
    #[error("Signing did not complete within {0:?}")]
    TimedOut(Duration),
}
