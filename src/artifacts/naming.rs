//! Run names and entry keys

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// Width of the random value behind generated run names.
pub const RANDOM_NAME_BITS: u32 = 50;

/// Check that `name` is usable as a single path component.
///
/// Rejects empty names, `.`/`..`, path separators and NUL.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] if the name would escape its directory
pub fn validate_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Hex SHA-256 digest of the decimal text of a random 50-bit value.
///
/// No collision check is made; the value space makes repeats negligible.
#[must_use]
pub fn random_run_name() -> String {
    let value: u64 = rand::thread_rng().gen_range(0..1u64 << RANDOM_NAME_BITS);
    name_for(value)
}

fn name_for(value: u64) -> String {
    format!("{:x}", Sha256::digest(value.to_string().as_bytes()))
}
