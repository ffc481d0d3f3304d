pub mod key_id;
pub mod verify;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tufkeys::{KeyError, KeyRecord, KeyRegistry, KeyVerifier};

use super::args::{Cli, Command};
use crate::exit_codes;

pub fn dispatch(cli: Cli) -> i32 {
    let registry = KeyRegistry::with_defaults();
    match cli.cmd {
        Command::KeyId(args) => key_id::cmd_key_id(&registry, args),
        Command::Verify(args) => verify::cmd_verify(&registry, args),
        Command::Schemes => {
            for scheme in registry.schemes() {
                println!("{scheme}");
            }
            exit_codes::SUCCESS
        }
    }
}

/// Read a key record file and build an initialized verifier for it.
pub(crate) fn load_verifier(
    registry: &KeyRegistry,
    path: &Path,
) -> Result<(Arc<KeyRecord>, Box<dyn KeyVerifier>)> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read key record: {}", path.display()))?;
    let record = Arc::new(
        KeyRecord::from_json(&bytes)
            .with_context(|| format!("failed to parse key record: {}", path.display()))?,
    );
    let verifier = registry
        .verifier_for(Arc::clone(&record))
        .with_context(|| format!("failed to load key: {}", path.display()))?;
    Ok((record, verifier))
}

/// Exit code for an error. Anything that is not a key error is a usage problem.
pub(crate) fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<KeyError>() {
        Some(KeyError::InvalidSignature) => exit_codes::INVALID_SIGNATURE,
        Some(KeyError::NotInitialized | KeyError::AlreadyInitialized) => {
            exit_codes::INTERNAL_ERROR
        }
        Some(
            KeyError::InvalidRecord { .. }
            | KeyError::MalformedKey { .. }
            | KeyError::UnsupportedKeyType { .. }
            | KeyError::UnknownKeyType { .. },
        ) => exit_codes::KEY_ERROR,
        None => exit_codes::USAGE_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_for_key_errors() {
        let code = |e: KeyError| exit_code_for(&anyhow::Error::new(e));
        assert_eq!(code(KeyError::InvalidSignature), exit_codes::INVALID_SIGNATURE);
        assert_eq!(code(KeyError::NotInitialized), exit_codes::INTERNAL_ERROR);
        assert_eq!(
            code(KeyError::UnknownKeyType {
                key_type: "ed25519".to_string()
            }),
            exit_codes::KEY_ERROR
        );
    }

    #[test]
    fn test_exit_code_through_context() {
        let err = anyhow::Error::new(KeyError::InvalidSignature).context("verifying root.json");
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_SIGNATURE);
        assert_eq!(
            exit_code_for(&anyhow::anyhow!("failed to read message")),
            exit_codes::USAGE_ERROR
        );
    }
}
