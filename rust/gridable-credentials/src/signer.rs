//! Signature creation.

use crate::error::SignError;
use async_trait::async_trait;
use gridable_common::ConditionalSync;

/// Produces a signature over a payload on behalf of one actor.
///
/// This is the private-key half of an identity. It is bound to an
/// [`crate::Identity`] at construction and never handed to the access
/// controller, which only ever verifies.
///
/// Signatures are returned in their textual wire form (whatever encoding the
/// matching [`crate::VerificationFunction`] expects).
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait SigningFunction: ConditionalSync {
    /// Sign `payload` and return the encoded signature.
    async fn sign(&self, payload: &[u8]) -> Result<String, SignError>;
}

/// Adapts a plain closure into a [`SigningFunction`].
///
/// Built via [`sign_with`].
#[derive(Clone, Copy)]
pub struct FnSigner<F>(F);

/// Wrap a synchronous closure as a [`SigningFunction`].
///
/// ```
/// use gridable_credentials::{sign_with, SignError};
///
/// let signer = sign_with(|payload: &[u8]| -> Result<String, SignError> {
///     Ok(format!("{}", payload.len()))
/// });
/// # let _ = signer;
/// ```
pub fn sign_with<F>(f: F) -> FnSigner<F>
where
    F: Fn(&[u8]) -> Result<String, SignError> + ConditionalSync,
{
    FnSigner(f)
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<F> SigningFunction for FnSigner<F>
where
    F: Fn(&[u8]) -> Result<String, SignError> + ConditionalSync,
{
    async fn sign(&self, payload: &[u8]) -> Result<String, SignError> {
        (self.0)(payload)
    }
}
