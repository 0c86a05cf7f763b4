//! `cadenas-core` — Pure bcrypt password hashing primitives for CADENAS.
//!
//! This crate is the audit target: zero network, zero async, a from-scratch
//! implementation of the bcrypt adaptive hashing scheme — the Eksblowfish
//! key setup, the Blowfish cipher rounds, bcrypt's custom base64 codec, the
//! `$2b$` textual format, and constant-time verification.
//!
//! Hash strings round-trip byte-for-byte with other bcrypt implementations
//! (OpenBSD, node, Python, Go).
//!
//! ```
//! use cadenas_core::{hash, verify};
//!
//! let stored = hash("correct horse battery staple", 4)?;
//! assert!(verify("correct horse battery staple", &stored)?);
//! assert!(!verify("tr0ub4dor&3", &stored)?);
//! # Ok::<(), cadenas_core::BcryptError>(())
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

mod alphabet;
mod blowfish;
mod eksblowfish;

pub mod hash_format;

mod ops;

pub use eksblowfish::{DEFAULT_COST, DIGEST_LEN, MAX_COST, MAX_PASSWORD_LEN, MIN_COST, SALT_LEN};
pub use error::BcryptError;
pub use hash_format::{HashParts, Version, HASH_STRING_LEN};
pub use ops::{generate_salt, get_rounds, hash, hash_with_salt, verify};
