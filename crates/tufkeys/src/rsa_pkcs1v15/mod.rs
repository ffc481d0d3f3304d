//! RSA verifier: RSASSA-PKCS1-v1_5 signatures over SHA-256.
//!
//! Key records carry `{"public": "<PEM>"}` in their value, where the PEM is
//! either PKCS#1 or SubjectPublicKeyInfo. Both encodings of a key produce
//! the same [`PublicKeyId`].

mod blob;

use std::sync::Arc;

use rsa::pkcs8::EncodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha2::Sha256;

use crate::digest::sha256;
use crate::error::{KeyError, KeyResult};
use crate::registry::KeyRegistry;
use crate::types::{KeyRecord, RsaKeyValue, KEY_TYPE_RSA};
use crate::verifier::{KeyVerifier, PublicKeyId};

pub use blob::{KeyEncoding, MAX_MODULUS_BITS};

/// Register the RSA factory under [`KEY_TYPE_RSA`].
pub fn register(registry: &KeyRegistry) {
    registry.register(KEY_TYPE_RSA, new_verifier);
}

/// Factory: an empty RSA verifier.
pub fn new_verifier() -> Box<dyn KeyVerifier> {
    Box::new(RsaVerifier::new())
}

/// Parsed key material of a ready verifier.
#[derive(Debug)]
struct RsaKey {
    /// PEM bytes exactly as found in the record.
    public_pem: Vec<u8>,
    key: RsaPublicKey,
    encoding: KeyEncoding,
    record: Arc<KeyRecord>,
}

#[derive(Debug)]
enum VerifierState {
    Uninitialized,
    Ready(RsaKey),
    Failed,
}

/// RSA PKCS#1 v1.5 / SHA-256 verifier.
#[derive(Debug)]
pub struct RsaVerifier {
    state: VerifierState,
}

impl RsaVerifier {
    /// Create an empty verifier.
    pub fn new() -> Self {
        Self {
            state: VerifierState::Uninitialized,
        }
    }

    /// Build a ready verifier from a record.
    pub fn from_record(record: Arc<KeyRecord>) -> KeyResult<Self> {
        let mut verifier = Self::new();
        verifier.unmarshal_key(record)?;
        Ok(verifier)
    }

    /// Whether `unmarshal_key` has succeeded.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, VerifierState::Ready(_))
    }

    /// Encoding the key was received in.
    pub fn key_encoding(&self) -> KeyResult<KeyEncoding> {
        Ok(self.ready()?.encoding)
    }

    fn ready(&self) -> KeyResult<&RsaKey> {
        match &self.state {
            VerifierState::Ready(key) => Ok(key),
            VerifierState::Uninitialized | VerifierState::Failed => Err(KeyError::NotInitialized),
        }
    }
}

impl Default for RsaVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyVerifier for RsaVerifier {
    fn public(&self) -> KeyResult<PublicKeyId> {
        let ready = self.ready()?;
        match ready.key.to_public_key_der() {
            Ok(doc) => Ok(PublicKeyId::Spki(doc.as_bytes().to_vec())),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "SPKI re-encoding failed, falling back to raw PEM identifier"
                );
                Ok(PublicKeyId::RawPem(ready.public_pem.clone()))
            }
        }
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> KeyResult<()> {
        let ready = self.ready()?;
        let hashed = sha256(message);

        ready
            .key
            .verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, signature)
            .map_err(|_| KeyError::InvalidSignature)
    }

    fn marshal_key(&self) -> Option<Arc<KeyRecord>> {
        match &self.state {
            VerifierState::Ready(key) => Some(Arc::clone(&key.record)),
            VerifierState::Uninitialized | VerifierState::Failed => None,
        }
    }

    fn unmarshal_key(&mut self, record: Arc<KeyRecord>) -> KeyResult<()> {
        if !matches!(self.state, VerifierState::Uninitialized) {
            return Err(KeyError::AlreadyInitialized);
        }

        match load_key(record) {
            Ok(key) => {
                self.state = VerifierState::Ready(key);
                Ok(())
            }
            Err(e) => {
                self.state = VerifierState::Failed;
                Err(e)
            }
        }
    }
}

fn load_key(record: Arc<KeyRecord>) -> KeyResult<RsaKey> {
    let value: RsaKeyValue = serde_json::from_slice(&record.value)
        .map_err(|e| KeyError::invalid_record(format!("unmarshalling key: {}", e)))?;

    let public_pem = value.public.into_bytes();
    let (key, encoding) = blob::parse_public_key_pem(&public_pem)?;
    tracing::debug!(?encoding, "parsed RSA public key");

    Ok(RsaKey {
        public_pem,
        key,
        encoding,
        record,
    })
}
