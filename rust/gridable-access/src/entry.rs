//! The view of a log entry that authorization needs.

use gridable_common::Blake3Hash;
use gridable_credentials::{Identity, SignError};
use serde::{Deserialize, Serialize};

/// Anything the log engine may ask to append.
///
/// The engine owns its entry type; implementing this trait is all it takes
/// to run it through [`crate::AccessController::can_append`]. Every accessor
/// may return `None`: a missing field is a denial, never an error.
pub trait Appendable {
    /// Identifier the entry claims as its author.
    fn writer(&self) -> Option<&str>;

    /// Signature over [`Appendable::content_hash`].
    fn signature(&self) -> Option<&str>;

    /// The canonical bytes the signature was computed over.
    fn content_hash(&self) -> Option<&str>;
}

/// Identity block of a [`LogEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryIdentity {
    /// Claimed author.
    #[serde(default)]
    pub id: Option<String>,

    /// Opaque key material or proof, never interpreted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

/// A log entry as it travels between replicas.
///
/// Entries are immutable once admitted; nothing in this crate mutates one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Who claims to have written the entry.
    #[serde(default)]
    pub identity: EntryIdentity,

    /// Signature by `identity.id` over `content_hash`.
    #[serde(default)]
    pub signature: Option<String>,

    /// Hash of the entry content.
    #[serde(default)]
    pub content_hash: Option<String>,
}

impl LogEntry {
    /// Author an entry for `payload`: hash it with BLAKE3 and sign the hex
    /// digest as `identity`.
    ///
    /// # Errors
    ///
    /// Fails if the identity cannot sign.
    pub async fn create(identity: &Identity, payload: &[u8]) -> Result<Self, SignError> {
        Self::signed(identity, Blake3Hash::hash(payload).to_hex()).await
    }

    /// Sign an already computed content hash as `identity`.
    ///
    /// # Errors
    ///
    /// Fails if the identity cannot sign.
    pub async fn signed(
        identity: &Identity,
        content_hash: impl Into<String>,
    ) -> Result<Self, SignError> {
        let content_hash = content_hash.into();
        let signature = identity.sign(content_hash.as_bytes()).await?;
        Ok(Self {
            identity: EntryIdentity {
                id: Some(identity.id().to_string()),
                public_key: None,
            },
            signature: Some(signature),
            content_hash: Some(content_hash),
        })
    }
}

impl Appendable for LogEntry {
    fn writer(&self) -> Option<&str> {
        self.identity.id.as_deref()
    }

    fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    fn content_hash(&self) -> Option<&str> {
        self.content_hash.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridable_credentials::sign_with;

    fn identity() -> Identity {
        Identity::new(
            "did:ex:A".parse().unwrap(),
            sign_with(|payload: &[u8]| Ok(format!("sig:{}", String::from_utf8_lossy(payload)))),
        )
    }

    #[gridable_common::test]
    async fn it_signs_the_hex_content_hash() {
        let entry = LogEntry::create(&identity(), b"row 1").await.unwrap();
        let hash = Blake3Hash::hash(b"row 1").to_hex();

        assert_eq!(entry.writer(), Some("did:ex:A"));
        assert_eq!(entry.content_hash(), Some(hash.as_str()));
        assert_eq!(entry.signature(), Some(format!("sig:{hash}").as_str()));
    }

    #[gridable_common::test]
    fn it_tolerates_missing_fields_on_the_wire() {
        let entry: LogEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(entry.writer(), None);
        assert_eq!(entry.signature(), None);
        assert_eq!(entry.content_hash(), None);

        let entry: LogEntry =
            serde_json::from_str(r#"{"identity":{"id":"did:ex:A","public_key":"pk"}}"#).unwrap();
        assert_eq!(entry.writer(), Some("did:ex:A"));
        assert_eq!(entry.identity.public_key.as_deref(), Some("pk"));
    }
}
