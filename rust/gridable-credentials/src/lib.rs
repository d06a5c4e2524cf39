#![warn(missing_docs)]

//! Identities and signatures for gridable access control.
//!
//! An [`Identity`] names one local actor by [`Did`] and signs data through a
//! caller-supplied [`SigningFunction`]. Verification is the other half and
//! is intentionally stateless: [`verify`] checks a signature by *any* actor
//! through a pluggable [`VerificationFunction`], without holding that actor's
//! identity.
//!
//! Bundled schemes:
//! - **Ed25519 `did:key`** (enabled by the `ed25519` feature, on by default)
//! - **Keyed HMAC-SHA256** (enabled by the `hmac` feature, on by default)

mod did;
mod error;
mod identity;
mod signer;
mod verification;

pub use did::{Did, DidParseError, Principal};
pub use error::{IdentityError, SignError};
pub use identity::{DEFAULT_SIGNING_TIMEOUT, Identity, IdentityBuilder};
pub use signer::{FnSigner, SigningFunction, sign_with};
pub use verification::{FnVerifier, RequireMethod, VerificationFunction, verify, verify_with};

#[cfg(feature = "ed25519")]
pub mod ed25519;
#[cfg(feature = "ed25519")]
pub use ed25519::*;

#[cfg(feature = "hmac")]
pub mod hmac;
#[cfg(feature = "hmac")]
pub use self::hmac::{HmacKeyring, HmacSigner};
