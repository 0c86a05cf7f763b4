//! Error types for `cadenas-core`.

use thiserror::Error;

/// Errors produced by bcrypt operations.
///
/// Every failure is detected synchronously and surfaced to the caller as a
/// terminal error for that call — malformed input does not become valid on
/// retry. A password mismatch in [`crate::verify`] is `Ok(false)`, not an
/// error.
#[derive(Debug, Error)]
pub enum BcryptError {
    /// Cost factor outside the supported 4..=31 range, or not an integer.
    #[error("invalid cost factor: {0}")]
    InvalidCost(String),

    /// Salt string is malformed (wrong prefix, bad characters, truncated).
    #[error("invalid salt: {0}")]
    InvalidSalt(String),

    /// Hash string does not match the fixed-width `$2b$NN$...` format.
    #[error("malformed hash: {0}")]
    MalformedHash(String),

    /// Version tag is not one of the supported `2a` / `2b` identifiers.
    #[error("unsupported version tag: {0}")]
    UnsupportedVersion(String),

    /// Text is not valid bcrypt base64 (character outside the alphabet,
    /// or a length that cannot decode to the expected byte count).
    #[error("invalid bcrypt base64 encoding: {0}")]
    InvalidEncoding(String),

    /// The OS secure random source failed during salt generation.
    #[error("secure random source failed: {0}")]
    RandomSource(String),
}
