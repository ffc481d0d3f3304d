//! Exit codes for the `tufkeys` binary.
//! These codes are part of the public contract; scripts branch on them.

pub const SUCCESS: i32 = 0;
pub const KEY_ERROR: i32 = 1; // Record could not be loaded into a verifier
pub const USAGE_ERROR: i32 = 2; // I/O, argument or encoding problems
pub const INTERNAL_ERROR: i32 = 3; // Verifier misuse (should not happen)
pub const INVALID_SIGNATURE: i32 = 4;
