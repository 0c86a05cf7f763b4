//! Bcrypt's custom base64 codec.
//!
//! Bcrypt predates RFC 4648 and uses its own 64-character alphabet
//! (`./A-Za-z0-9`) with no padding characters. Lengths are implicit from
//! context: a 16-byte salt is always 22 characters, a 23-byte digest is
//! always 31. The tables below are immutable and shared read-only across
//! all calls.

use crate::error::BcryptError;

/// The bcrypt base64 alphabet, in value order.
const ALPHABET: &[u8; 64] = b"./ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Sentinel for bytes outside the alphabet.
const INVALID: u8 = 0xFF;

/// Reverse map: ASCII byte -> 6-bit value, `INVALID` elsewhere.
static DECODE_TABLE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Number of encoded characters needed for `bytes` input bytes.
pub(crate) const fn encoded_len(bytes: usize) -> usize {
    (bytes * 8).div_ceil(6)
}

/// Encode raw bytes into bcrypt base64 (3 bytes -> 4 chars, no padding).
#[allow(clippy::arithmetic_side_effects)] // sextet shifts/masks on u8 values
pub(crate) fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(bytes.len()));
    let mut chunks = bytes.chunks_exact(3);
    for chunk in &mut chunks {
        let [b0, b1, b2] = [chunk[0], chunk[1], chunk[2]];
        out.push(ALPHABET[usize::from(b0 >> 2)] as char);
        out.push(ALPHABET[usize::from(((b0 & 0x03) << 4) | (b1 >> 4))] as char);
        out.push(ALPHABET[usize::from(((b1 & 0x0F) << 2) | (b2 >> 6))] as char);
        out.push(ALPHABET[usize::from(b2 & 0x3F)] as char);
    }
    match *chunks.remainder() {
        [b0] => {
            out.push(ALPHABET[usize::from(b0 >> 2)] as char);
            out.push(ALPHABET[usize::from((b0 & 0x03) << 4)] as char);
        }
        [b0, b1] => {
            out.push(ALPHABET[usize::from(b0 >> 2)] as char);
            out.push(ALPHABET[usize::from(((b0 & 0x03) << 4) | (b1 >> 4))] as char);
            out.push(ALPHABET[usize::from((b1 & 0x0F) << 2)] as char);
        }
        _ => {}
    }
    out
}

/// Decode bcrypt base64 text into `out`, which fixes the expected byte count.
///
/// Trailing bits of the final character that do not map to an output byte
/// are discarded, matching every other bcrypt implementation.
///
/// # Errors
///
/// Returns [`BcryptError::InvalidEncoding`] if `text` contains a character
/// outside the alphabet or its length does not encode exactly `out.len()`
/// bytes.
#[allow(clippy::arithmetic_side_effects)] // cursor stays within checked bounds
pub(crate) fn decode_into(text: &str, out: &mut [u8]) -> Result<(), BcryptError> {
    let expected = encoded_len(out.len());
    if text.len() != expected {
        return Err(BcryptError::InvalidEncoding(format!(
            "expected {expected} characters for {} bytes, got {}",
            out.len(),
            text.len()
        )));
    }

    let mut values = [0u8; 4];
    let mut cursor = 0;
    let mut chunks = text.as_bytes().chunks(4);
    for chunk in &mut chunks {
        for (value, raw) in values.iter_mut().zip(chunk.iter()) {
            *value = DECODE_TABLE[usize::from(*raw)];
            if *value == INVALID {
                return Err(BcryptError::InvalidEncoding(format!(
                    "character {:?} is outside the bcrypt alphabet",
                    char::from(*raw)
                )));
            }
        }
        let [v0, v1, v2, v3] = values;
        match chunk.len() {
            4 => {
                out[cursor] = (v0 << 2) | (v1 >> 4);
                out[cursor + 1] = (v1 << 4) | (v2 >> 2);
                out[cursor + 2] = (v2 << 6) | v3;
                cursor += 3;
            }
            3 => {
                out[cursor] = (v0 << 2) | (v1 >> 4);
                out[cursor + 1] = (v1 << 4) | (v2 >> 2);
                cursor += 2;
            }
            2 => {
                out[cursor] = (v0 << 2) | (v1 >> 4);
                cursor += 1;
            }
            _ => {
                return Err(BcryptError::InvalidEncoding(
                    "dangling final character".to_owned(),
                ));
            }
        }
    }

    debug_assert_eq!(cursor, out.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_len_matches_fixed_fields() {
        assert_eq!(encoded_len(16), 22); // salt
        assert_eq!(encoded_len(23), 31); // digest
    }

    #[test]
    fn encode_known_salt() {
        assert_eq!(encode(b"0123456789abcdef"), "KBCwKxOzLha2MUDgW0PjXe");
    }

    #[test]
    fn decode_known_salt() {
        let mut out = [0u8; 16];
        decode_into("KBCwKxOzLha2MUDgW0PjXe", &mut out).expect("decode should succeed");
        assert_eq!(&out, b"0123456789abcdef");
    }

    #[test]
    fn canonical_salt_text_round_trips() {
        let mut bytes = [0u8; 16];
        decode_into("N9qo8uLOickgx2ZMRZoMye", &mut bytes).expect("decode should succeed");
        assert_eq!(encode(&bytes), "N9qo8uLOickgx2ZMRZoMye");
    }

    #[test]
    fn rejects_character_outside_alphabet() {
        let mut out = [0u8; 16];
        let err = decode_into("KBCwKxOzLha2MUDgW0Pj=e", &mut out)
            .expect_err("decode should reject '='");
        assert!(matches!(err, BcryptError::InvalidEncoding(_)));
    }

    #[test]
    fn rejects_length_mismatch() {
        let mut out = [0u8; 16];
        let err =
            decode_into("KBCwKxOz", &mut out).expect_err("decode should reject short input");
        assert!(matches!(err, BcryptError::InvalidEncoding(_)));
    }

    #[test]
    fn encode_all_byte_values_round_trip() {
        let bytes: Vec<u8> = (0..=255).collect();
        let text = encode(&bytes);
        let mut back = vec![0u8; bytes.len()];
        decode_into(&text, &mut back).expect("decode should succeed");
        assert_eq!(back, bytes);
    }
}
