//! Verifier capability shared by every key type.

use std::fmt;
use std::sync::Arc;

use crate::error::KeyResult;
use crate::types::KeyRecord;

/// A public-key verifier built from a [`KeyRecord`].
///
/// Lifecycle: a factory returns an empty verifier, [`unmarshal_key`] fills it
/// exactly once, and from then on it is read-only. `&mut self` on
/// `unmarshal_key` keeps initialization from racing with readers; once it
/// returns `Ok` the verifier can be shared across threads freely.
///
/// [`unmarshal_key`]: KeyVerifier::unmarshal_key
pub trait KeyVerifier: Send + Sync {
    /// Encoding-independent identifier of the public key.
    fn public(&self) -> KeyResult<PublicKeyId>;

    /// Verify `signature` over `message`.
    ///
    /// Any failure is reported as `KeyError::InvalidSignature` without detail.
    fn verify(&self, message: &[u8], signature: &[u8]) -> KeyResult<()>;

    /// The record this verifier was built from; `None` until initialized.
    fn marshal_key(&self) -> Option<Arc<KeyRecord>>;

    /// Populate the verifier from a key record.
    fn unmarshal_key(&mut self, record: Arc<KeyRecord>) -> KeyResult<()>;
}

/// Identifier of a public key, tagged with how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PublicKeyId {
    /// SubjectPublicKeyInfo DER re-encoded from the parsed key.
    Spki(Vec<u8>),

    /// Raw key bytes as received, used only if re-encoding failed.
    /// Not stable across encodings of the same key.
    RawPem(Vec<u8>),
}

impl PublicKeyId {
    /// Identifier bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Spki(bytes) | Self::RawPem(bytes) => bytes,
        }
    }

    /// Consume into the identifier bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Spki(bytes) | Self::RawPem(bytes) => bytes,
        }
    }

    /// Whether the identifier is independent of the key's wire encoding.
    pub fn is_canonical(&self) -> bool {
        matches!(self, Self::Spki(_))
    }
}

impl fmt::Display for PublicKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.as_bytes()))
    }
}
