//! Eksblowfish — bcrypt's "expensive key schedule" — and raw digest
//! computation.
//!
//! The schedule alternately mixes password and salt into the Blowfish state,
//! `2^cost` times. The iteration count doubles for each unit increase in
//! cost, which is the defining security property of bcrypt: hashing time
//! grows exponentially with the work factor and cannot be precomputed,
//! because the whole state is re-derived per (password, salt) pair.

use zeroize::Zeroize;

use crate::blowfish::State;
use crate::error::BcryptError;

/// Minimum supported cost factor.
pub const MIN_COST: u32 = 4;

/// Maximum supported cost factor.
pub const MAX_COST: u32 = 31;

/// Default cost factor for salt generation.
pub const DEFAULT_COST: u32 = 10;

/// Number of raw salt bytes.
pub const SALT_LEN: usize = 16;

/// Raw digest length in bytes. Only the first 23 bytes are carried into the
/// formatted hash; the last byte's low bits are discarded by convention.
pub const DIGEST_LEN: usize = 24;

/// Effective maximum password length in bytes; longer input is truncated.
pub const MAX_PASSWORD_LEN: usize = 72;

/// The fixed plaintext bcrypt encrypts: `"OrpheanBeholderScryDoubt"` as six
/// big-endian words.
const MAGIC_WORDS: [u32; 6] = [
    0x4f72_7068, 0x6561_6e42, 0x6568_6f6c, 0x6465_7253, 0x6372_7944, 0x6f75_6274,
];

/// Number of times each 64-bit block of the magic plaintext is re-encrypted.
const FINAL_ROUNDS: usize = 64;

/// Returns `Ok(cost)` if the cost factor is within the supported range.
///
/// # Errors
///
/// Returns [`BcryptError::InvalidCost`] otherwise.
pub(crate) fn check_cost(cost: u32) -> Result<u32, BcryptError> {
    if (MIN_COST..=MAX_COST).contains(&cost) {
        Ok(cost)
    } else {
        Err(BcryptError::InvalidCost(format!(
            "{cost} is outside the supported {MIN_COST}..={MAX_COST} range"
        )))
    }
}

/// Compute the raw 24-byte bcrypt digest of `password` under `salt` and
/// `cost`.
///
/// The password is truncated to 72 bytes; when shorter, a terminating NUL is
/// appended before key expansion (the OpenBSD convention, shared by the
/// node and Python implementations). The schedule is:
///
/// 1. one salted expansion keyed by the password,
/// 2. `2^cost` rounds of plain expansion keyed alternately by password and
///    salt,
/// 3. 64 ECB encryptions of each of the three magic plaintext blocks.
///
/// The working key copy and the cipher state are zeroized before returning.
///
/// # Errors
///
/// Returns [`BcryptError::InvalidCost`] if `cost` is outside 4..=31.
#[allow(clippy::arithmetic_side_effects)] // block indices bounded by MAGIC_WORDS
pub(crate) fn compute_digest(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    cost: u32,
) -> Result<[u8; DIGEST_LEN], BcryptError> {
    check_cost(cost)?;

    // Working copy of the key: truncated password plus NUL terminator when
    // there is room for one.
    let mut key_buf = [0u8; MAX_PASSWORD_LEN + 1];
    let copied = password.len().min(MAX_PASSWORD_LEN);
    key_buf[..copied].copy_from_slice(&password[..copied]);
    let key_len = (copied + 1).min(MAX_PASSWORD_LEN);

    let mut state = State::new();
    state.salted_expand_key(salt, &key_buf[..key_len]);
    for _ in 0..(1u64 << cost) {
        state.expand_key(&key_buf[..key_len]);
        state.expand_key(salt);
    }
    key_buf.zeroize();

    let mut blocks = MAGIC_WORDS;
    for pair in 0..blocks.len() / 2 {
        let i = pair * 2;
        for _ in 0..FINAL_ROUNDS {
            (blocks[i], blocks[i + 1]) = state.encrypt_block(blocks[i], blocks[i + 1]);
        }
    }
    drop(state);

    let mut digest = [0u8; DIGEST_LEN];
    for (chunk, word) in digest.chunks_exact_mut(4).zip(blocks.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    blocks.zeroize();
    Ok(digest)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
