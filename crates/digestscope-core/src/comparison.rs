//! Pairwise digest comparison: position- and bit-exact diff plus the
//! avalanche-effect ratio.

use serde::Serialize;

use crate::binary::{BITS_PER_HEX, nibble_bit_diff, nibble_value, validate_hex};
use crate::error::{DigestError, Result};
use crate::statistics::compute_statistics;

/// Avalanche effect above which a comparison counts as a good avalanche.
pub const AVALANCHE_GOOD_THRESHOLD: f64 = 45.0;

/// Diff between two equal-length digests and the texts that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestComparison {
    pub identical: bool,
    /// Hex-character indices where the digests differ, ascending.
    pub diff_positions: Vec<usize>,
    pub diff_count: usize,
    /// Differing bits across all differing positions.
    pub diff_bits: usize,
    /// `diff_bits / (length × 4) × 100`.
    pub diff_percentage: f64,
    /// Percentage of all output bits that changed, or 0 when the input texts
    /// agree on their overlapping prefix.
    pub avalanche_effect: f64,
    /// Differing characters in the overlapping prefix of the two texts.
    pub input_diff_count: usize,
    /// Shannon entropy of the first digest.
    pub entropy: f64,
}

/// Compare two digests produced from `text_a` and `text_b`.
///
/// Both digests must be non-empty lowercase hex of equal length; otherwise
/// `InvalidDigest` or `LengthMismatch` is returned.
pub fn compare(
    digest_a: &str,
    digest_b: &str,
    text_a: &str,
    text_b: &str,
) -> Result<DigestComparison> {
    validate_hex(digest_a)?;
    validate_hex(digest_b)?;
    if digest_a.len() != digest_b.len() {
        return Err(DigestError::LengthMismatch {
            left: digest_a.len(),
            right: digest_b.len(),
        });
    }

    let mut diff_positions = Vec::new();
    let mut diff_bits = 0usize;
    for (i, (a, b)) in digest_a.bytes().zip(digest_b.bytes()).enumerate() {
        if a != b {
            diff_positions.push(i);
            if let (Some(na), Some(nb)) = (nibble_value(a), nibble_value(b)) {
                diff_bits += nibble_bit_diff(na, nb);
            }
        }
    }

    // Identical nibbles contribute no differing bits, so the full-width bit
    // diff equals `diff_bits`.
    let hash_diff_bits = diff_bits;
    let total_bits = (digest_a.len() * BITS_PER_HEX) as f64;
    let diff_percentage = diff_bits as f64 / total_bits * 100.0;

    let input_diff_count = input_diff_count(text_a, text_b);
    let avalanche_effect = if input_diff_count > 0 {
        hash_diff_bits as f64 / total_bits * 100.0
    } else {
        0.0
    };

    let entropy = compute_statistics(digest_a)?.entropy;

    log::trace!(
        "compared {}-char digests: {} positions, {diff_bits} bits, avalanche {avalanche_effect:.1}%",
        digest_a.len(),
        diff_positions.len()
    );

    Ok(DigestComparison {
        identical: diff_positions.is_empty(),
        diff_count: diff_positions.len(),
        diff_positions,
        diff_bits,
        diff_percentage,
        avalanche_effect,
        input_diff_count,
        entropy,
    })
}

/// Count differing characters over the overlapping prefix of two texts.
///
/// Characters past the end of the shorter text are never counted, so
/// `"abc"` vs `"abcd"` yields 0.
pub fn input_diff_count(text_a: &str, text_b: &str) -> usize {
    text_a
        .chars()
        .zip(text_b.chars())
        .filter(|(a, b)| a != b)
        .count()
}

// ---------------------------------------------------------------------------
// Verdicts
// ---------------------------------------------------------------------------

/// Qualitative avalanche-effect grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AvalancheGrade {
    Excellent,
    Good,
    Fair,
    Weak,
}

impl AvalancheGrade {
    pub fn from_effect(effect: f64) -> Self {
        if effect > AVALANCHE_GOOD_THRESHOLD {
            Self::Excellent
        } else if effect > 35.0 {
            Self::Good
        } else if effect > 25.0 {
            Self::Fair
        } else {
            Self::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Weak => "weak",
        }
    }
}

/// Qualitative size of a bit-level difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffLevel {
    Significant,
    Large,
    Moderate,
    Small,
}

impl DiffLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 75.0 {
            Self::Significant
        } else if percentage > 50.0 {
            Self::Large
        } else if percentage > 25.0 {
            Self::Moderate
        } else {
            Self::Small
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Significant => "significant difference",
            Self::Large => "large difference",
            Self::Moderate => "moderate difference",
            Self::Small => "small difference",
        }
    }
}
