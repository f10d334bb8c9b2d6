//! Single-digest statistics: character distribution, Shannon entropy over the
//! hex alphabet, and zero/one character counts.

use serde::Serialize;

use crate::binary::validate_hex;
use crate::error::Result;

/// Maximum Shannon entropy of a hex symbol, `log2(16)`.
pub const MAX_HEX_ENTROPY: f64 = 4.0;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Statistics derived from one digest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestStatistics {
    /// `(character, count)` sorted by count descending. Ties keep the order in
    /// which characters first appear in the digest.
    pub distribution: Vec<(char, usize)>,
    /// Occurrences of the hex character `'0'`.
    ///
    /// Character level, not bit level: `'1'` (0001) holds three zero bits yet
    /// counts towards `ones`. Use [`crate::pattern::count_bits`] for real bit
    /// counts.
    pub zeros: usize,
    /// `length - zeros`, the number of non-`'0'` characters.
    pub ones: usize,
    /// Shannon entropy in bits per character, in `[0, 4]`.
    pub entropy: f64,
    pub length: usize,
    pub distinct_chars: usize,
    /// `entropy / 4 × 100`.
    pub uniformity: f64,
    /// Longest run of one repeated character.
    pub longest_char_run: usize,
    /// Adjacent positions holding different characters.
    pub transitions: usize,
}

/// Coarse entropy verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntropyQuality {
    High,
    Medium,
    Low,
}

impl EntropyQuality {
    /// Thresholds sit at 7/8 and 5/8 of the 4-bit hex maximum.
    pub fn from_entropy(entropy: f64) -> Self {
        if entropy > 3.5 {
            Self::High
        } else if entropy > 2.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Verdict on how evenly characters are spread, from the max/min count ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionQuality {
    Excellent,
    Good,
    Fair,
    Uneven,
}

impl DistributionQuality {
    pub fn from_distribution(distribution: &[(char, usize)]) -> Self {
        let max = distribution.iter().map(|&(_, n)| n).max().unwrap_or(0);
        let min = distribution.iter().map(|&(_, n)| n).min().unwrap_or(0);
        if min == 0 {
            return Self::Uneven;
        }
        let ratio = max as f64 / min as f64;
        if ratio < 1.5 {
            Self::Excellent
        } else if ratio < 2.0 {
            Self::Good
        } else if ratio < 3.0 {
            Self::Fair
        } else {
            Self::Uneven
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Uneven => "uneven",
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis functions
// ---------------------------------------------------------------------------

/// Compute distribution, entropy and zero/one character counts for a digest.
///
/// Fails with `InvalidDigest` on empty or non-hex input.
pub fn compute_statistics(digest: &str) -> Result<DigestStatistics> {
    validate_hex(digest)?;

    // First-appearance order; at most 16 entries so a linear scan is fine.
    let mut tally: Vec<(char, usize)> = Vec::with_capacity(16);
    for c in digest.chars() {
        match tally.iter_mut().find(|(k, _)| *k == c) {
            Some((_, n)) => *n += 1,
            None => tally.push((c, 1)),
        }
    }
    tally.sort_by(|a, b| b.1.cmp(&a.1));

    let length = digest.len();
    let zeros = tally
        .iter()
        .find(|&&(c, _)| c == '0')
        .map(|&(_, n)| n)
        .unwrap_or(0);
    let entropy = shannon_entropy(&tally, length);
    let (longest_char_run, transitions) = sequence_stats(digest.as_bytes());

    Ok(DigestStatistics {
        distinct_chars: tally.len(),
        distribution: tally,
        zeros,
        ones: length - zeros,
        entropy,
        length,
        uniformity: entropy / MAX_HEX_ENTROPY * 100.0,
        longest_char_run,
        transitions,
    })
}

/// Shannon entropy in bits of a symbol tally over `total` symbols.
pub fn shannon_entropy(tally: &[(char, usize)], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    let mut h = 0.0;
    for &(_, count) in tally {
        if count > 0 {
            let p = count as f64 / n;
            h -= p * p.log2();
        }
    }
    // A single symbol gives -0.0.
    if h <= 0.0 { 0.0 } else { h }
}

fn sequence_stats(data: &[u8]) -> (usize, usize) {
    if data.is_empty() {
        return (0, 0);
    }
    let mut longest = 1usize;
    let mut current = 1usize;
    let mut transitions = 0usize;
    for i in 1..data.len() {
        if data[i] == data[i - 1] {
            current += 1;
            longest = longest.max(current);
        } else {
            transitions += 1;
            current = 1;
        }
    }
    (longest, transitions)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
