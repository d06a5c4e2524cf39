//! Persisted configuration of an access controller.
//!
//! ```json
//! { "type": "custom-did-ac", "write": ["did:ex:A"], "admin": ["did:ex:A"] }
//! ```
//!
//! Key and element order carry no meaning. A permanently locked controller
//! additionally carries `"sealed": true` and an empty `write` list.

use crate::{error::BuildError, registry::SchemeTag};
use gridable_credentials::Did;
use serde::{Deserialize, Serialize};

/// Capability sets of a controller, as stored in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestParams {
    /// Identifiers allowed to append.
    pub write: Vec<Did>,

    /// Identifiers allowed to change capabilities; absent means "same as
    /// `write`".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<Vec<Did>>,

    /// Whether the write set was emptied on purpose.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sealed: bool,
}

/// A full manifest: the scheme tag plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Which scheme (and so which verification function) to re-bind.
    #[serde(rename = "type")]
    pub scheme: SchemeTag,

    /// Capability sets.
    #[serde(flatten)]
    pub params: ManifestParams,
}

impl Manifest {
    /// Decode a JSON manifest.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownScheme`] when the `type` is not a known scheme,
    /// [`BuildError::Manifest`] for any other decoding failure.
    pub fn from_json(bytes: &[u8]) -> Result<Self, BuildError> {
        #[derive(Deserialize)]
        struct Tagged {
            #[serde(rename = "type")]
            scheme: String,
            #[serde(flatten)]
            params: ManifestParams,
        }

        let tagged: Tagged = serde_json::from_slice(bytes)?;
        Ok(Self {
            scheme: tagged.scheme.parse()?,
            params: tagged.params,
        })
    }

    /// Encode as JSON.
    ///
    /// # Errors
    ///
    /// Only fails if serialization itself fails.
    pub fn to_json(&self) -> Result<Vec<u8>, BuildError> {
        Ok(serde_json::to_vec(self)?)
    }
}
