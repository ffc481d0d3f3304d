use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tufkeys",
    version,
    about = "Inspect signed-metadata key records and verify detached signatures"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the identifiers of a key record
    KeyId(super::commands::key_id::KeyIdArgs),
    /// Verify a detached signature with a key record
    Verify(super::commands::verify::VerifyArgs),
    /// List key types with a registered verifier
    Schemes,
}
