#![warn(missing_docs)]

//! Write authorization for replicated append-only logs.
//!
//! An [`AccessController`] holds two capability sets of [`Did`]s:
//! *write* (may append) and *admin* (may change either set). Before a log
//! engine admits an entry it asks [`AccessController::can_append`], which
//! checks that the claimed writer holds write access and that the entry's
//! signature over its content hash verifies through the controller's
//! [`VerificationFunction`].
//!
//! Controllers persist as a [`Manifest`] naming their [`SchemeTag`]. Since a
//! verification function cannot be persisted, reloading goes through a
//! [`Registry`] that has one bound for the tag; without it loading fails
//! instead of admitting everything.
//!
//! ```
//! # async fn example() -> anyhow::Result<()> {
//! use gridable_access::{Capability, Registry, SchemeTag, Session};
//! use gridable_credentials::{Did, HmacKeyring, Identity};
//!
//! let alice: Did = "did:ex:A".parse()?;
//! let keyring = HmacKeyring::new().with_key(alice.clone(), b"secret".to_vec());
//! let signer = keyring.signer(&alice).unwrap();
//!
//! let session = Session::new(
//!     Identity::new(alice, signer),
//!     Registry::new().with_verification(SchemeTag::Did, keyring),
//! );
//! let log = session.open(SchemeTag::Did, session.owner_controlled())?;
//!
//! let entry = session.sign_entry(b"hello").await?;
//! assert!(log.can_append(&entry).await);
//!
//! session.grant(&log, Capability::Write, "did:ex:B".parse()?)?;
//! # Ok(())
//! # }
//! ```
//!
//! [`Did`]: gridable_credentials::Did
//! [`VerificationFunction`]: gridable_credentials::VerificationFunction

mod capability;
mod controller;
mod entry;
mod error;
mod manifest;
mod options;
mod registry;
mod session;

pub use capability::{Capability, CapabilityParseError};
pub use controller::AccessController;
pub use entry::{Appendable, EntryIdentity, LogEntry};
pub use error::{AdminError, BuildError};
pub use manifest::{Manifest, ManifestParams};
pub use options::{AccessOptions, DEFAULT_VERIFICATION_TIMEOUT};
pub use registry::{Factory, Registry, SchemeTag};
pub use session::Session;
