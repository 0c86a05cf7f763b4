//! Blowfish cipher core in its bcrypt configuration.
//!
//! This module provides:
//! - [`State`] — the expanded key schedule (18-word P-array, four 256-word
//!   S-boxes), initialized from the digits of pi
//! - [`State::encrypt_block`] — standard 16-round Blowfish ECB encryption of
//!   one 64-bit block
//! - [`State::expand_key`] — the stock Blowfish key schedule
//! - [`State::salted_expand_key`] — bcrypt's salted variant, which folds salt
//!   material into every re-encryption step
//!
//! Everything here is deterministic: identical (key, salt) inputs always
//! produce an identical expanded state. The state is scratch memory owned by
//! a single hash computation and is zeroized when dropped.

mod consts;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of Feistel rounds.
const ROUNDS: usize = 16;

/// P-array length: one subkey per round plus two whitening words.
const SUBKEYS: usize = ROUNDS + 2;

/// Expanded Blowfish key schedule.
///
/// Roughly 4 KiB of scratch state. Owned exclusively by one hash
/// computation; never shared or reused across calls.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct State {
    p: [u32; SUBKEYS],
    s: [[u32; 256]; 4],
}

impl State {
    /// Fresh state holding the standard pi-derived initial constants.
    pub(crate) const fn new() -> Self {
        Self {
            p: consts::P_INIT,
            s: consts::S_INIT,
        }
    }

    /// The Blowfish F-function: four S-box lookups combined with wrapping
    /// addition and XOR.
    fn round_fn(&self, x: u32) -> u32 {
        let [b0, b1, b2, b3] = x.to_be_bytes();
        let h = self.s[0][usize::from(b0)].wrapping_add(self.s[1][usize::from(b1)]);
        (h ^ self.s[2][usize::from(b2)]).wrapping_add(self.s[3][usize::from(b3)])
    }

    /// Encrypt one 64-bit block (as two big-endian words) in ECB mode.
    ///
    /// Runs the 16 Feistel rounds with the final half-swap and P\[16\]/P\[17\]
    /// whitening of standard Blowfish.
    #[allow(clippy::arithmetic_side_effects)] // indices bounded by SUBKEYS
    pub(crate) fn encrypt_block(&self, mut l: u32, mut r: u32) -> (u32, u32) {
        for i in (0..ROUNDS).step_by(2) {
            l ^= self.p[i];
            r ^= self.round_fn(l);
            r ^= self.p[i + 1];
            l ^= self.round_fn(r);
        }
        l ^= self.p[ROUNDS];
        r ^= self.p[ROUNDS + 1];
        (r, l)
    }

    /// XOR the cyclically repeated key into the P-array.
    ///
    /// The key is read as consecutive big-endian 32-bit words, wrapping
    /// around its end as often as needed to cover all 18 subkeys. This is
    /// what lets keys of any length (bounded only by the caller) drive the
    /// schedule.
    #[allow(clippy::arithmetic_side_effects)] // cursor is reduced modulo key length
    fn xor_key(&mut self, key: &[u8]) {
        debug_assert!(!key.is_empty());
        let mut cursor = 0;
        for subkey in &mut self.p {
            let mut word = 0u32;
            for _ in 0..4 {
                word = (word << 8) | u32::from(key[cursor]);
                cursor = (cursor + 1) % key.len();
            }
            *subkey ^= word;
        }
    }

    /// Stock Blowfish key schedule: XOR the key into P, then repeatedly
    /// encrypt a running zero block to refill the P-array and all four
    /// S-boxes.
    #[allow(clippy::arithmetic_side_effects)] // indices bounded by table sizes
    pub(crate) fn expand_key(&mut self, key: &[u8]) {
        self.xor_key(key);

        let (mut l, mut r) = (0u32, 0u32);
        for i in (0..SUBKEYS).step_by(2) {
            (l, r) = self.encrypt_block(l, r);
            self.p[i] = l;
            self.p[i + 1] = r;
        }
        for box_index in 0..4 {
            for k in (0..256).step_by(2) {
                (l, r) = self.encrypt_block(l, r);
                self.s[box_index][k] = l;
                self.s[box_index][k + 1] = r;
            }
        }
    }

    /// Bcrypt's salted key schedule.
    ///
    /// Identical to [`Self::expand_key`] except that each re-encryption step
    /// first XORs in the next two salt words, cycling through the 16-byte
    /// salt (read as four big-endian words). This salt mixing is what makes
    /// the Eksblowfish state keyed by both password and salt.
    #[allow(clippy::arithmetic_side_effects)] // indices bounded by table sizes
    pub(crate) fn salted_expand_key(&mut self, salt: &[u8; 16], key: &[u8]) {
        self.xor_key(key);

        let mut salt_words = [0u32; 4];
        for (word, chunk) in salt_words.iter_mut().zip(salt.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        let (mut l, mut r) = (0u32, 0u32);
        let mut next = 0;
        let mut mix = |l: &mut u32, r: &mut u32| {
            *l ^= salt_words[next];
            *r ^= salt_words[(next + 1) % 4];
            next = (next + 2) % 4;
        };

        for i in (0..SUBKEYS).step_by(2) {
            mix(&mut l, &mut r);
            (l, r) = self.encrypt_block(l, r);
            self.p[i] = l;
            self.p[i + 1] = r;
        }
        for box_index in 0..4 {
            for k in (0..256).step_by(2) {
                mix(&mut l, &mut r);
                (l, r) = self.encrypt_block(l, r);
                self.s[box_index][k] = l;
                self.s[box_index][k + 1] = r;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
