//! Ed25519 `did:key` identities.
//!
//! Signatures travel as standard base64 of the 64 raw signature bytes. The
//! signer's public key is recovered from its `did:key` identifier, so
//! verification needs no lookup.

mod error;
mod resolver;
mod signer;
mod verifier;

pub use error::{Ed25519DidFromStrError, Ed25519KeyError};
pub use resolver::Ed25519KeyResolver;
pub use signer::Ed25519Signer;
pub use verifier::Ed25519Verifier;

/// Multicodec prefix of an ed25519 public key.
const ED25519_PUB: [u8; 2] = [0xed, 0x01];
