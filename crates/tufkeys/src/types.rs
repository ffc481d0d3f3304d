//! Key record types shared by every verifier.

use serde::{Deserialize, Serialize};

use crate::digest::sha256_hex;
use crate::error::{KeyError, KeyResult};

/// Key type for RSA keys.
pub const KEY_TYPE_RSA: &str = "rsa";

/// Scheme string carried by RSA key records.
pub const KEY_SCHEME_RSA: &str = "rsassa-pss-sha256";

/// Hash algorithms advertised for key ID computation by default.
pub const DEFAULT_KEYID_HASH_ALGORITHMS: &[&str] = &["sha256", "sha512"];

/// A public key as it appears in signed metadata.
///
/// `value` is kept as the raw JSON bytes it was received with so the record
/// re-serializes exactly. Each verifier interprets it in its own way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    /// Key type, used to select a verifier (e.g. "rsa").
    #[serde(rename = "keytype")]
    pub key_type: String,

    /// Signature scheme (e.g. "rsassa-pss-sha256").
    pub scheme: String,

    /// Hash algorithms used to compute key IDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyid_hash_algorithms: Option<Vec<String>>,

    /// Raw JSON of the key value.
    #[serde(with = "raw_json")]
    pub value: Vec<u8>,
}

impl KeyRecord {
    /// Build a record from its parts. `value` is not validated here.
    pub fn new(
        key_type: impl Into<String>,
        scheme: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            key_type: key_type.into(),
            scheme: scheme.into(),
            keyid_hash_algorithms: None,
            value: value.into(),
        }
    }

    /// Build an RSA record wrapping a PEM public key.
    pub fn rsa_from_pem(pem: &str) -> KeyResult<Self> {
        let value = serde_json::to_vec(&RsaKeyValue {
            public: pem.to_string(),
        })
        .map_err(|e| KeyError::invalid_record(format!("failed to encode key value: {}", e)))?;

        Ok(Self {
            key_type: KEY_TYPE_RSA.to_string(),
            scheme: KEY_SCHEME_RSA.to_string(),
            keyid_hash_algorithms: Some(
                DEFAULT_KEYID_HASH_ALGORITHMS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            value,
        })
    }

    /// Parse a record from JSON text.
    pub fn from_json(bytes: &[u8]) -> KeyResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| KeyError::invalid_record(format!("invalid key record JSON: {}", e)))
    }

    /// Serialize the record to compact JSON.
    pub fn to_json(&self) -> KeyResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| KeyError::invalid_record(format!("failed to encode key record: {}", e)))
    }

    /// Key ID of this record: lowercase hex SHA-256 over its JCS (RFC 8785) form.
    ///
    /// Unlike a verifier's `public()` identifier this covers the whole
    /// record, so the same key under a different scheme gets a different ID.
    pub fn key_id(&self) -> KeyResult<String> {
        let value = serde_json::to_value(self)
            .map_err(|e| KeyError::invalid_record(format!("failed to encode key record: {}", e)))?;
        let canonical = serde_jcs::to_vec(&value).map_err(|e| {
            KeyError::invalid_record(format!("failed to canonicalize key record: {}", e))
        })?;
        Ok(sha256_hex(&canonical))
    }
}

/// Value of an RSA key record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsaKeyValue {
    /// PEM-armored public key (PKCS#1 or SubjectPublicKeyInfo).
    pub public: String,
}

/// (De)serialize raw JSON bytes in place, like an embedded JSON document.
mod raw_json {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::value::RawValue;

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let raw: &RawValue = serde_json::from_slice(bytes)
            .map_err(|e| S::Error::custom(format!("key value is not valid JSON: {}", e)))?;
        raw.serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<u8>, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)
            .map_err(|e| D::Error::custom(format!("key value: {}", e)))?;
        Ok(raw.get().as_bytes().to_vec())
    }
}
