//! Hex ↔ binary codec.
//!
//! Every hex symbol expands to exactly four bits, most significant bit first.
//! All other modules go through here to turn digests into bits.

use crate::error::{DigestError, Result};

/// Bits carried by one hex character.
pub const BITS_PER_HEX: usize = 4;

/// Decode one lowercase hex symbol. Uppercase is rejected: digests are
/// lowercase by contract.
pub fn nibble_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

/// Check that `digest` is non-empty lowercase hex.
pub fn validate_hex(digest: &str) -> Result<()> {
    if digest.is_empty() {
        return Err(DigestError::invalid(digest, "digest is empty"));
    }
    check_alphabet(digest)
}

/// Expand a hex digest into a string of `'0'`/`'1'` characters.
///
/// The empty string maps to the empty string. A character outside `[0-9a-f]`
/// is a contract violation and yields [`DigestError::InvalidDigest`].
pub fn hex_to_binary(digest: &str) -> Result<String> {
    check_alphabet(digest)?;
    let mut out = String::with_capacity(digest.len() * BITS_PER_HEX);
    for nibble in nibbles(digest) {
        for bit in (0..BITS_PER_HEX).rev() {
            out.push(if (nibble >> bit) & 1 == 1 { '1' } else { '0' });
        }
    }
    Ok(out)
}

/// Number of bit positions in which two nibbles differ.
pub(crate) fn nibble_bit_diff(a: u8, b: u8) -> usize {
    ((a ^ b) & 0x0f).count_ones() as usize
}

/// Iterate the nibble values of an already validated digest.
pub(crate) fn nibbles(digest: &str) -> impl Iterator<Item = u8> + '_ {
    digest.bytes().filter_map(nibble_value)
}

/// Iterate the bits (0 or 1) of an already validated digest, MSB first.
pub(crate) fn bits(digest: &str) -> impl Iterator<Item = u8> + '_ {
    nibbles(digest).flat_map(|n| (0..BITS_PER_HEX).rev().map(move |bit| (n >> bit) & 1))
}

fn check_alphabet(digest: &str) -> Result<()> {
    let bad = digest
        .char_indices()
        .find(|&(_, c)| !c.is_ascii() || nibble_value(c as u8).is_none());
    match bad {
        Some((i, c)) => Err(DigestError::invalid(
            digest,
            format!("non-hex character {c:?} at index {i}"),
        )),
        None => Ok(()),
    }
}
