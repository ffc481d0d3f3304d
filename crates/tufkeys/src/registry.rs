//! Verifier registry keyed by key type.
//!
//! Maps a key type (e.g. "rsa") to a factory producing an empty verifier.
//! Register everything during startup, then share the registry: writes are
//! not ordered against concurrent lookups beyond what the lock provides, and
//! a later `register` under the same key type silently wins.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{KeyError, KeyResult};
use crate::types::KeyRecord;
use crate::verifier::KeyVerifier;

/// Zero-argument constructor for an empty verifier.
pub type VerifierFactory = fn() -> Box<dyn KeyVerifier>;

/// Key type -> verifier factory.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    factories: RwLock<HashMap<String, VerifierFactory>>,
}

impl KeyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in verifier registered.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        crate::rsa_pkcs1v15::register(&registry);
        registry
    }

    /// Register `factory` under `key_type`, returning the factory it replaced.
    ///
    /// Last writer wins.
    pub fn register(
        &self,
        key_type: impl Into<String>,
        factory: VerifierFactory,
    ) -> Option<VerifierFactory> {
        let key_type = key_type.into();
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let previous = factories.insert(key_type.clone(), factory);
        if previous.is_some() {
            tracing::warn!(key_type = %key_type, "verifier factory replaced");
        } else {
            tracing::debug!(key_type = %key_type, "verifier factory registered");
        }
        previous
    }

    /// Factory registered under `key_type`.
    pub fn factory(&self, key_type: &str) -> Option<VerifierFactory> {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key_type)
            .copied()
    }

    /// Registered key types, sorted.
    pub fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        schemes.sort();
        schemes
    }

    /// Build and initialize a verifier for `record`.
    pub fn verifier_for(&self, record: Arc<KeyRecord>) -> KeyResult<Box<dyn KeyVerifier>> {
        let factory =
            self.factory(&record.key_type)
                .ok_or_else(|| KeyError::UnknownKeyType {
                    key_type: record.key_type.clone(),
                })?;

        let mut verifier = factory();
        verifier.unmarshal_key(record)?;
        Ok(verifier)
    }
}
