//! `tufkeys verify` - Verify a detached signature over a file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{Args, ValueEnum};
use tufkeys::KeyRegistry;

use super::{exit_code_for, load_verifier};
use crate::exit_codes;

/// How the signature file is encoded.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignatureEncoding {
    /// Raw signature bytes
    #[default]
    Raw,
    /// Standard Base64 text
    Base64,
    /// Hex text
    Hex,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Key record file (JSON)
    #[arg(long, env = "TUFKEYS_KEY")]
    pub key: PathBuf,

    /// Message file the signature covers
    pub message: PathBuf,

    /// Detached signature file
    pub signature: PathBuf,

    /// Encoding of the signature file
    #[arg(
        long,
        value_enum,
        default_value_t = SignatureEncoding::Raw,
        env = "TUFKEYS_SIGNATURE_ENCODING"
    )]
    pub encoding: SignatureEncoding,

    /// Quiet mode - only exit code, no output
    #[arg(long, short)]
    pub quiet: bool,
}

pub fn cmd_verify(registry: &KeyRegistry, args: VerifyArgs) -> i32 {
    match run_verify(registry, &args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            if !args.quiet {
                eprintln!("error: {e:#}");
            }
            exit_code_for(&e)
        }
    }
}

fn run_verify(registry: &KeyRegistry, args: &VerifyArgs) -> Result<()> {
    let (record, verifier) = load_verifier(registry, &args.key)?;

    let message = fs::read(&args.message)
        .with_context(|| format!("failed to read message: {}", args.message.display()))?;
    let raw_signature = fs::read(&args.signature)
        .with_context(|| format!("failed to read signature: {}", args.signature.display()))?;
    let signature = decode_signature(&raw_signature, args.encoding)?;

    verifier.verify(&message, &signature)?;

    if !args.quiet {
        println!("Verification successful!");
        println!();
        println!("  keytype: {}", record.key_type);
        println!("  keyid:   {}", record.key_id()?);
    }

    Ok(())
}

fn decode_signature(bytes: &[u8], encoding: SignatureEncoding) -> Result<Vec<u8>> {
    match encoding {
        SignatureEncoding::Raw => Ok(bytes.to_vec()),
        SignatureEncoding::Base64 => BASE64
            .decode(trim_ascii(bytes))
            .context("failed to decode signature base64"),
        SignatureEncoding::Hex => {
            hex::decode(trim_ascii(bytes)).context("failed to decode signature hex")
        }
    }
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}
