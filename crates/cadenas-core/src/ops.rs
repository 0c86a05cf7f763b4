//! Public bcrypt operations.
//!
//! This module provides the four entry points:
//! - [`generate_salt`] — draw 16 CSPRNG bytes and format a salt string
//! - [`hash`] / [`hash_with_salt`] — derive a formatted password hash
//! - [`verify`] — constant-time comparison of a candidate password against a
//!   stored hash
//! - [`get_rounds`] — extract the work factor embedded in a hash
//!
//! Each call is a pure function of its inputs (plus the OS random source for
//! salt generation) with no shared mutable state, so concurrent calls need
//! no locking. Hashing is CPU-bound and blocking by design; callers needing
//! non-blocking behavior must offload to a worker thread.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::eksblowfish::{self, check_cost, SALT_LEN};
use crate::error::BcryptError;
use crate::hash_format::{format_salt, HashParts, ParsedSalt, Version};

/// Constant-time byte comparison for digests.
///
/// Returns `true` iff both slices have equal length and identical contents.
/// Uses bitwise OR accumulation over all bytes — no short-circuit on the
/// first mismatch, so timing does not reveal partial matches. The length
/// check may return early because digest lengths are public (always 23).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Generate a salt string: `$<version>$<cost>$<22-char encoded salt>`.
///
/// Draws exactly 16 bytes from the OS CSPRNG. The result is a hash string
/// with an empty digest field and is reusable directly as the `salt`
/// argument to [`hash_with_salt`].
///
/// # Errors
///
/// Returns [`BcryptError::InvalidCost`] if `cost` is outside 4..=31, or
/// [`BcryptError::RandomSource`] if the CSPRNG fails.
pub fn generate_salt(cost: u32, version: Version) -> Result<String, BcryptError> {
    check_cost(cost)?;
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| BcryptError::RandomSource(format!("CSPRNG fill failed: {e}")))?;
    Ok(format_salt(version, cost, &salt))
}

/// Hash a password under a freshly generated salt with the given cost.
///
/// Equivalent to `hash_with_salt(password, &generate_salt(cost, TwoB)?)`.
/// Passwords are arbitrary bytes; input longer than 72 bytes is truncated
/// (the historical bcrypt convention — see [`crate::MAX_PASSWORD_LEN`]).
///
/// # Errors
///
/// Returns [`BcryptError::InvalidCost`] or [`BcryptError::RandomSource`].
pub fn hash<P: AsRef<[u8]>>(password: P, cost: u32) -> Result<String, BcryptError> {
    let salt = generate_salt(cost, Version::default())?;
    hash_with_salt(password, &salt)
}

/// Hash a password under an existing salt string.
///
/// The salt's embedded version and cost are honored. A full stored hash is
/// also accepted as `salt`; its digest tail is ignored.
///
/// # Errors
///
/// Returns [`BcryptError::InvalidSalt`] if the salt argument is malformed
/// (wrong prefix, bad characters, truncated); version and cost defects keep
/// their own error kinds.
pub fn hash_with_salt<P: AsRef<[u8]>>(password: P, salt: &str) -> Result<String, BcryptError> {
    let parsed = ParsedSalt::parse(salt)?;
    let digest = eksblowfish::compute_digest(password.as_ref(), &parsed.salt, parsed.cost)?;
    let mut truncated = [0u8; 23];
    truncated.copy_from_slice(&digest[..23]);
    Ok(HashParts::new(parsed.version, parsed.cost, parsed.salt, truncated).format())
}

/// Check a candidate password against a stored hash.
///
/// Recomputes the digest with the salt, cost, and version embedded in
/// `stored`, then compares digests in constant time. A mismatched password
/// is `Ok(false)` — only a hash that cannot be parsed is an error.
///
/// # Errors
///
/// Returns [`BcryptError::MalformedHash`] (or the version/cost error kinds)
/// if `stored` cannot be parsed.
pub fn verify<P: AsRef<[u8]>>(password: P, stored: &str) -> Result<bool, BcryptError> {
    let parts = HashParts::parse(stored)?;
    let digest = eksblowfish::compute_digest(password.as_ref(), parts.salt(), parts.cost())?;
    Ok(constant_time_eq(&digest[..23], parts.digest()))
}

/// Extract the work factor from a stored hash.
///
/// # Errors
///
/// Returns [`BcryptError::MalformedHash`] (or the version/cost error kinds)
/// if the hash cannot be parsed.
pub fn get_rounds(stored: &str) -> Result<u32, BcryptError> {
    Ok(HashParts::parse(stored)?.cost())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
