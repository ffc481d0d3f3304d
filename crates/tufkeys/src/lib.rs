//! Pluggable public-key verifiers for signed metadata.
//!
//! A [`KeyRegistry`] maps a key type to a factory for an empty
//! [`KeyVerifier`]. The registry builds a verifier for a [`KeyRecord`],
//! initializes it with `unmarshal_key`, and the caller checks detached
//! signatures with `verify`.
//!
//! Built-in verifiers:
//!
//! - `rsa`: RSASSA-PKCS1-v1_5 over SHA-256, keys as PKCS#1 or
//!   SubjectPublicKeyInfo PEM
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tufkeys::{KeyRecord, KeyRegistry};
//!
//! # fn example(record_json: &[u8], message: &[u8], signature: &[u8]) -> tufkeys::KeyResult<()> {
//! // Register built-in verifiers once, at startup
//! let registry = KeyRegistry::with_defaults();
//!
//! let record = Arc::new(KeyRecord::from_json(record_json)?);
//! let verifier = registry.verifier_for(record)?;
//!
//! verifier.verify(message, signature)?;
//! println!("key: {}", verifier.public()?);
//! # Ok(())
//! # }
//! ```

mod digest;
pub mod error;
pub mod registry;
pub mod rsa_pkcs1v15;
pub mod types;
pub mod verifier;

// Re-export main types
pub use error::{KeyError, KeyResult};
pub use registry::{KeyRegistry, VerifierFactory};
pub use rsa_pkcs1v15::{KeyEncoding, RsaVerifier};
pub use types::{
    KeyRecord, RsaKeyValue, DEFAULT_KEYID_HASH_ALGORITHMS, KEY_SCHEME_RSA, KEY_TYPE_RSA,
};
pub use verifier::{KeyVerifier, PublicKeyId};
