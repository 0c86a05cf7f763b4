//! The bcrypt modular-crypt textual format.
//!
//! This module provides:
//! - [`Version`] — the supported `2a` / `2b` minor-version tags
//! - [`HashParts`] — a parsed 60-character hash string
//! - [`ParsedSalt`] — a parsed salt argument (salt prefix or full hash)
//!
//! # Layout
//!
//! ```text
//! $ <version: "2a"|"2b"> $ <cost: 2 decimal digits, 04-31> $ <22-char salt> <31-char digest>
//! ```
//!
//! Exactly 60 characters total; anything else is rejected. The version tag
//! selects formatting only — the algorithm core is identical for `2a` and
//! `2b`.

use std::fmt;
use std::str::FromStr;

use crate::alphabet;
use crate::eksblowfish::{check_cost, SALT_LEN};
use crate::error::BcryptError;

/// Encoded salt width: 16 bytes in bcrypt base64.
const SALT_CHARS: usize = 22;

/// Encoded digest width: 23 bytes in bcrypt base64.
const DIGEST_CHARS: usize = 31;

/// Digest bytes carried in the formatted hash.
const DIGEST_BYTES: usize = 23;

/// Total length of a well-formed hash string.
pub const HASH_STRING_LEN: usize = 60;

// ---------------------------------------------------------------------------
// Version tag
// ---------------------------------------------------------------------------

/// Supported bcrypt minor-version identifiers.
///
/// `2a` and `2b` share the same algorithm core; the tag is a formatting
/// variant kept for cross-implementation compatibility. Other historical
/// tags (`2x`, `2y`) are rejected with [`BcryptError::UnsupportedVersion`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Version {
    /// Original OpenBSD revision tag.
    TwoA,
    /// Current OpenBSD revision tag (default).
    #[default]
    TwoB,
}

impl Version {
    /// The textual tag as it appears between the first two `$` delimiters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TwoA => "2a",
            Self::TwoB => "2b",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = BcryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2a" => Ok(Self::TwoA),
            "2b" => Ok(Self::TwoB),
            other => Err(BcryptError::UnsupportedVersion(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsed hash
// ---------------------------------------------------------------------------

/// A fully parsed bcrypt hash: version, cost, raw salt, and raw digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashParts {
    version: Version,
    cost: u32,
    salt: [u8; SALT_LEN],
    digest: [u8; DIGEST_BYTES],
}

impl HashParts {
    /// Assemble hash parts from already-validated components.
    pub(crate) const fn new(
        version: Version,
        cost: u32,
        salt: [u8; SALT_LEN],
        digest: [u8; DIGEST_BYTES],
    ) -> Self {
        Self {
            version,
            cost,
            salt,
            digest,
        }
    }

    /// Strictly parse a 60-character bcrypt hash string.
    ///
    /// # Errors
    ///
    /// - [`BcryptError::UnsupportedVersion`] for a version tag other than
    ///   `2a` / `2b`
    /// - [`BcryptError::InvalidCost`] for a cost field outside 4..=31
    /// - [`BcryptError::MalformedHash`] for any other structural defect
    pub fn parse(text: &str) -> Result<Self, BcryptError> {
        let (version, cost, payload) = split_fields(text)?;
        if payload.len() != SALT_CHARS + DIGEST_CHARS {
            return Err(BcryptError::MalformedHash(format!(
                "expected {} payload characters, got {}",
                SALT_CHARS + DIGEST_CHARS,
                payload.len()
            )));
        }

        let mut salt = [0u8; SALT_LEN];
        let mut digest = [0u8; DIGEST_BYTES];
        alphabet::decode_into(&payload[..SALT_CHARS], &mut salt)
            .and_then(|()| alphabet::decode_into(&payload[SALT_CHARS..], &mut digest))
            .map_err(|e| BcryptError::MalformedHash(e.to_string()))?;

        Ok(Self::new(version, cost, salt, digest))
    }

    /// Rebuild the canonical 60-character hash string.
    #[must_use]
    pub fn format(&self) -> String {
        let mut out = String::with_capacity(HASH_STRING_LEN);
        out.push('$');
        out.push_str(self.version.as_str());
        out.push('$');
        push_cost(&mut out, self.cost);
        out.push('$');
        out.push_str(&alphabet::encode(&self.salt));
        out.push_str(&alphabet::encode(&self.digest));
        debug_assert_eq!(out.len(), HASH_STRING_LEN);
        out
    }

    /// The version tag embedded in the hash.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// The work factor embedded in the hash.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// The raw 16 salt bytes.
    #[must_use]
    pub const fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// The raw 23 digest bytes.
    #[must_use]
    pub const fn digest(&self) -> &[u8; DIGEST_BYTES] {
        &self.digest
    }
}

impl FromStr for HashParts {
    type Err = BcryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HashParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

// ---------------------------------------------------------------------------
// Parsed salt argument
// ---------------------------------------------------------------------------

/// A parsed salt argument: the `$2b$NN$<22 chars>` prefix form produced by
/// salt generation, or a full stored hash whose digest tail is ignored.
#[derive(Clone, Debug)]
pub(crate) struct ParsedSalt {
    pub version: Version,
    pub cost: u32,
    pub salt: [u8; SALT_LEN],
}

impl ParsedSalt {
    /// Parse a salt string.
    ///
    /// By convention a salt string is a hash string with an empty digest
    /// field, so both the 29-character prefix and the full 60-character
    /// hash are accepted as the salt argument.
    ///
    /// # Errors
    ///
    /// [`BcryptError::InvalidSalt`] for structural defects;
    /// [`BcryptError::UnsupportedVersion`] / [`BcryptError::InvalidCost`]
    /// keep their own kinds.
    pub fn parse(text: &str) -> Result<Self, BcryptError> {
        let (version, cost, payload) = split_fields(text).map_err(|e| match e {
            BcryptError::MalformedHash(msg) => BcryptError::InvalidSalt(msg),
            other => other,
        })?;
        if payload.len() != SALT_CHARS && payload.len() != SALT_CHARS + DIGEST_CHARS {
            return Err(BcryptError::InvalidSalt(format!(
                "expected {SALT_CHARS} salt characters (optionally followed by a \
                 {DIGEST_CHARS}-character digest), got {} characters",
                payload.len()
            )));
        }

        let mut salt = [0u8; SALT_LEN];
        alphabet::decode_into(&payload[..SALT_CHARS], &mut salt)
            .map_err(|e| BcryptError::InvalidSalt(e.to_string()))?;

        Ok(Self {
            version,
            cost,
            salt,
        })
    }
}

/// Format the salt prefix produced by salt generation:
/// `$<version>$<cost>$<22 chars>`.
pub(crate) fn format_salt(version: Version, cost: u32, salt: &[u8; SALT_LEN]) -> String {
    let mut out = String::with_capacity(7 + SALT_CHARS);
    out.push('$');
    out.push_str(version.as_str());
    out.push('$');
    push_cost(&mut out, cost);
    out.push('$');
    out.push_str(&alphabet::encode(salt));
    out
}

// ---------------------------------------------------------------------------
// Shared field splitting
// ---------------------------------------------------------------------------

/// Append the zero-padded two-digit cost field.
#[allow(clippy::arithmetic_side_effects)] // cost is range-checked to 4..=31
fn push_cost(out: &mut String, cost: u32) {
    debug_assert!(cost <= 99);
    out.push(char::from(b'0' + u8::try_from(cost / 10).unwrap_or(0)));
    out.push(char::from(b'0' + u8::try_from(cost % 10).unwrap_or(0)));
}

/// Split `$<version>$<cost>$<payload>` into validated fields.
///
/// Structural failures are reported as [`BcryptError::MalformedHash`];
/// callers re-map to [`BcryptError::InvalidSalt`] where appropriate.
#[allow(clippy::arithmetic_side_effects)] // two-digit arithmetic cannot overflow
fn split_fields(text: &str) -> Result<(Version, u32, &str), BcryptError> {
    if !text.is_ascii() {
        return Err(BcryptError::MalformedHash(
            "contains non-ASCII characters".to_owned(),
        ));
    }
    let rest = text.strip_prefix('$').ok_or_else(|| {
        BcryptError::MalformedHash("missing leading '$' delimiter".to_owned())
    })?;
    let (version_text, rest) = rest.split_once('$').ok_or_else(|| {
        BcryptError::MalformedHash("missing version field delimiter".to_owned())
    })?;
    let (cost_text, payload) = rest.split_once('$').ok_or_else(|| {
        BcryptError::MalformedHash("missing cost field delimiter".to_owned())
    })?;
    if payload.contains('$') {
        return Err(BcryptError::MalformedHash(
            "unexpected extra '$' delimiter".to_owned(),
        ));
    }

    let version = version_text.parse::<Version>()?;

    let cost = match cost_text.as_bytes() {
        &[tens @ b'0'..=b'9', units @ b'0'..=b'9'] => {
            u32::from(tens - b'0') * 10 + u32::from(units - b'0')
        }
        _ => {
            return Err(BcryptError::InvalidCost(format!(
                "cost field {cost_text:?} is not a zero-padded two-digit integer"
            )))
        }
    };
    check_cost(cost)?;

    Ok((version, cost, payload))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
