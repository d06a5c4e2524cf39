use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A capability an identifier can hold on one log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// May author new entries.
    Write,
    /// May change who holds capabilities.
    Admin,
}

impl Capability {
    /// Wire name of the capability.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a [`Capability`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown capability '{0}', expected 'write' or 'admin'")]
pub struct CapabilityParseError(pub String);

impl FromStr for Capability {
    type Err = CapabilityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "write" => Ok(Self::Write),
            "admin" => Ok(Self::Admin),
            other => Err(CapabilityParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[gridable_common::test]
    fn it_parses_wire_names() {
        assert_eq!("write".parse(), Ok(Capability::Write));
        assert_eq!("admin".parse(), Ok(Capability::Admin));
        assert!("Write".parse::<Capability>().is_err());
        assert_eq!(Capability::Admin.to_string(), "admin");
    }
}
