//! Error types for key verifiers.

/// Key verifier errors.
///
/// Every variant is terminal: nothing here is worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// Key record envelope or value did not decode into the expected shape.
    #[error("invalid key record: {message}")]
    InvalidRecord { message: String },

    /// PEM armor or DER structure could not be decoded.
    #[error("malformed key: {message}")]
    MalformedKey { message: String },

    /// Key decoded fine but is not of a type this verifier handles.
    #[error("unsupported key type: {algorithm}")]
    UnsupportedKeyType { algorithm: String },

    /// Signature did not verify.
    ///
    /// Deliberately carries no reason.
    #[error("signature verification failed")]
    InvalidSignature,

    /// Verifier used before a successful `unmarshal_key`.
    #[error("verifier not initialized")]
    NotInitialized,

    /// `unmarshal_key` called on a verifier that already left the empty state.
    #[error("verifier already initialized")]
    AlreadyInitialized,

    /// No factory registered for the record's key type.
    #[error("no verifier registered for key type: {key_type}")]
    UnknownKeyType { key_type: String },
}

impl KeyError {
    /// Whether the error is retryable.
    pub fn is_retryable(&self) -> bool {
        false
    }

    pub(crate) fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    pub(crate) fn malformed_key(message: impl Into<String>) -> Self {
        Self::MalformedKey {
            message: message.into(),
        }
    }
}

/// Result type for key operations.
pub type KeyResult<T> = Result<T, KeyError>;
