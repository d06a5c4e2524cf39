//! Table of supported authorization schemes.
//!
//! A manifest names its controller by [`SchemeTag`]. Verification functions
//! are live objects that cannot be persisted, so whoever loads a manifest
//! must have bound one to that tag here first.

use crate::{
    controller::AccessController, error::BuildError, manifest::Manifest, options::AccessOptions,
};
use gridable_credentials::VerificationFunction;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::BTreeMap, fmt, str::FromStr, sync::Arc};

/// Identifies an authorization scheme in a manifest's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemeTag {
    /// Write and admin sets of DIDs, entries authenticated by signature.
    Did,
}

impl SchemeTag {
    /// Every scheme this build knows.
    pub const ALL: [SchemeTag; 1] = [SchemeTag::Did];

    /// Wire name of the scheme.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Did => "custom-did-ac",
        }
    }

    /// Constructor used for this scheme unless overridden.
    pub fn default_factory(&self) -> Factory {
        match self {
            Self::Did => AccessController::create,
        }
    }
}

impl fmt::Display for SchemeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemeTag {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| BuildError::UnknownScheme(s.to_string()))
    }
}

impl Serialize for SchemeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchemeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Builds a controller from fully bound options.
pub type Factory = fn(AccessOptions) -> Result<AccessController, BuildError>;

#[derive(Clone)]
struct Registration {
    factory: Factory,
    verification: Option<Arc<dyn VerificationFunction>>,
}

/// Maps scheme tags to their factory and live verification function.
///
/// This is the hook through which an embedding application tells the log
/// engine how to construct the controller a manifest asks for.
#[derive(Clone)]
pub struct Registry {
    schemes: BTreeMap<SchemeTag, Registration>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry listing every known scheme with its default factory and
    /// no verification function bound yet.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for tag in SchemeTag::ALL {
            registry.register(tag, tag.default_factory());
        }
        registry
    }

    /// A registry with no schemes at all.
    pub fn empty() -> Self {
        Self {
            schemes: BTreeMap::new(),
        }
    }

    /// Register (or replace) the factory for `tag`, keeping any bound
    /// verification function.
    pub fn register(&mut self, tag: SchemeTag, factory: Factory) -> &mut Self {
        self.schemes
            .entry(tag)
            .and_modify(|registration| registration.factory = factory)
            .or_insert(Registration {
                factory,
                verification: None,
            });
        self
    }

    /// Bind the live verification function for `tag`, registering the
    /// scheme's default factory if it was not registered yet.
    pub fn bind(&mut self, tag: SchemeTag, verification: Arc<dyn VerificationFunction>) -> &mut Self {
        self.schemes
            .entry(tag)
            .or_insert(Registration {
                factory: tag.default_factory(),
                verification: None,
            })
            .verification = Some(verification);
        self
    }

    /// Builder form of [`Registry::bind`].
    #[must_use]
    pub fn with_verification(
        mut self,
        tag: SchemeTag,
        verification: impl VerificationFunction + 'static,
    ) -> Self {
        self.bind(tag, Arc::new(verification));
        self
    }

    /// The registered schemes, in tag order.
    pub fn schemes(&self) -> impl Iterator<Item = SchemeTag> + '_ {
        self.schemes.keys().copied()
    }

    /// Whether `tag` has a verification function bound.
    pub fn is_bound(&self, tag: SchemeTag) -> bool {
        self.verification(tag).is_some()
    }

    /// The verification function bound to `tag`, if any.
    pub fn verification(&self, tag: SchemeTag) -> Option<Arc<dyn VerificationFunction>> {
        self.schemes
            .get(&tag)
            .and_then(|registration| registration.verification.clone())
    }

    /// Construct a controller of scheme `tag`.
    ///
    /// A verification function already present in `options` wins over the
    /// one bound here.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownScheme`] if `tag` is not registered,
    /// [`BuildError::MissingVerificationFunction`] if neither `options` nor
    /// the registry supply a verification function; otherwise whatever the
    /// factory reports.
    pub fn create(&self, tag: SchemeTag, options: AccessOptions) -> Result<AccessController, BuildError> {
        let registration = self
            .schemes
            .get(&tag)
            .ok_or_else(|| BuildError::UnknownScheme(tag.to_string()))?;

        let options = match (options.verification.is_some(), &registration.verification) {
            (true, _) => options,
            (false, Some(verification)) => options.shared_verification(verification.clone()),
            (false, None) => {
                tracing::warn!(scheme = %tag, "refusing to load access controller without a verification function");
                return Err(BuildError::MissingVerificationFunction(tag));
            }
        };

        (registration.factory)(options)
    }

    /// Reconstruct the controller described by `manifest`.
    ///
    /// # Errors
    ///
    /// See [`Registry::create`].
    pub fn load(&self, manifest: &Manifest) -> Result<AccessController, BuildError> {
        self.create(manifest.scheme, AccessOptions::from(manifest.params.clone()))
    }

    /// Decode a JSON manifest and reconstruct its controller.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownScheme`] or [`BuildError::Manifest`] for
    /// undecodable input, otherwise see [`Registry::create`].
    pub fn load_json(&self, bytes: &[u8]) -> Result<AccessController, BuildError> {
        self.load(&Manifest::from_json(bytes)?)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.schemes
                    .iter()
                    .map(|(tag, registration)| (tag, registration.verification.is_some())),
            )
            .finish()
    }
}
