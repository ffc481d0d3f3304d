//! `tufkeys key-id` - Print the identifiers of a key record.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tufkeys::KeyRegistry;

use super::{exit_code_for, load_verifier};
use crate::exit_codes;

#[derive(Args, Debug)]
pub struct KeyIdArgs {
    /// Key record file (JSON)
    #[arg(env = "TUFKEYS_KEY")]
    pub key: PathBuf,

    /// Print a JSON object instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn cmd_key_id(registry: &KeyRegistry, args: KeyIdArgs) -> i32 {
    match run_key_id(registry, &args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_code_for(&e)
        }
    }
}

fn run_key_id(registry: &KeyRegistry, args: &KeyIdArgs) -> Result<()> {
    let (record, verifier) = load_verifier(registry, &args.key)?;
    let key_id = record.key_id()?;
    let public = verifier.public()?;

    if !public.is_canonical() {
        tracing::warn!("public key identifier is not canonical (raw PEM fallback)");
    }

    if args.json {
        let out = serde_json::json!({
            "keytype": record.key_type,
            "scheme": record.scheme,
            "keyid": key_id,
            "public": public.to_string(),
            "canonical": public.is_canonical(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("  keytype:   {}", record.key_type);
        println!("  scheme:    {}", record.scheme);
        println!("  keyid:     {}", key_id);
        println!("  public:    {}", public);
        println!("  canonical: {}", public.is_canonical());
    }

    Ok(())
}
