//! Fixed-size visual bit pattern of a digest and full-digest bit counts.
//!
//! The pattern always shows the first [`PATTERN_WINDOW_BITS`] bits, whatever
//! the digest length. Longer digests are truncated for display; shorter ones
//! are padded with zero cells. Bit counts always cover the whole digest.

use serde::Serialize;

use crate::binary::{bits, validate_hex};
use crate::error::{DigestError, Result};

pub const PATTERN_ROWS: usize = 8;
pub const PATTERN_COLS: usize = 8;
/// Bits shown in a pattern (16 hex characters).
pub const PATTERN_WINDOW_BITS: usize = PATTERN_ROWS * PATTERN_COLS;

/// Row-major grid of bits (each cell 0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitMatrix {
    cells: [[u8; PATTERN_COLS]; PATTERN_ROWS],
}

impl BitMatrix {
    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> &[[u8; PATTERN_COLS]; PATTERN_ROWS] {
        &self.cells
    }

    /// Set cells inside the window.
    pub fn ones(&self) -> usize {
        self.cells.iter().flatten().filter(|&&b| b == 1).count()
    }

    /// Render with block glyphs, one line per row.
    pub fn render_blocks(&self) -> String {
        self.render_with('█', '·')
    }

    fn render_with(&self, one: char, zero: char) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&b| if b == 1 { one } else { zero })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_with('1', '0'))
    }
}

/// Genuine bit counts over a full digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitCounts {
    pub ones: usize,
    pub zeros: usize,
}

impl BitCounts {
    pub fn total(&self) -> usize {
        self.ones + self.zeros
    }

    pub fn one_percentage(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.ones as f64 / self.total() as f64 * 100.0
        }
    }
}

/// Cells where two pattern windows differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternDiff {
    changed: [[bool; PATTERN_COLS]; PATTERN_ROWS],
}

impl PatternDiff {
    pub fn is_changed(&self, row: usize, col: usize) -> bool {
        self.changed
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn changed_cells(&self) -> usize {
        self.changed.iter().flatten().filter(|&&c| c).count()
    }
}

/// Fill an 8×8 grid from the first 64 bits of `digest`.
pub fn generate_pattern(digest: &str) -> Result<BitMatrix> {
    validate_hex(digest)?;
    let mut cells = [[0u8; PATTERN_COLS]; PATTERN_ROWS];
    for (i, bit) in bits(digest).take(PATTERN_WINDOW_BITS).enumerate() {
        cells[i / PATTERN_COLS][i % PATTERN_COLS] = bit;
    }
    Ok(BitMatrix { cells })
}

/// Count one and zero bits across the whole digest.
///
/// Unlike `DigestStatistics::zeros`/`ones`, which count hex characters, this
/// expands every character to four bits.
pub fn count_bits(digest: &str) -> Result<BitCounts> {
    validate_hex(digest)?;
    let ones = bits(digest).filter(|&b| b == 1).count();
    let total = bits(digest).count();
    Ok(BitCounts {
        ones,
        zeros: total - ones,
    })
}

/// Compare the pattern windows of two digests of equal length.
pub fn diff_pattern(digest_a: &str, digest_b: &str) -> Result<PatternDiff> {
    if digest_a.len() != digest_b.len() {
        return Err(DigestError::LengthMismatch {
            left: digest_a.len(),
            right: digest_b.len(),
        });
    }
    let a = generate_pattern(digest_a)?;
    let b = generate_pattern(digest_b)?;
    let mut changed = [[false; PATTERN_COLS]; PATTERN_ROWS];
    for (row, flags) in changed.iter_mut().enumerate() {
        for (col, flag) in flags.iter_mut().enumerate() {
            *flag = a.cells[row][col] != b.cells[row][col];
        }
    }
    Ok(PatternDiff { changed })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_digest_pads_with_zeros() {
        let m = generate_pattern("ff").unwrap();
        assert_eq!(m.rows()[0], [1; 8]);
        for row in 1..PATTERN_ROWS {
            assert_eq!(m.rows()[row], [0; 8]);
        }
        assert_eq!(m.ones(), 8);
        assert_eq!(count_bits("ff").unwrap(), BitCounts { ones: 8, zeros: 0 });
    }

    #[test]
    fn test_long_digest_truncated_but_counted_in_full() {
        // First 16 chars zero, rest all f: the window sees only zeros.
        let digest = format!("{}{}", "0".repeat(16), "f".repeat(48));
        let m = generate_pattern(&digest).unwrap();
        assert_eq!(m.ones(), 0);
        let counts = count_bits(&digest).unwrap();
        assert_eq!(counts.ones, 192);
        assert_eq!(counts.zeros, 64);
        assert_eq!(counts.total(), 256);
    }

    #[test]
    fn test_sixteen_chars_fill_the_window_exactly() {
        let m = generate_pattern(&"f".repeat(16)).unwrap();
        assert_eq!(m.ones(), PATTERN_WINDOW_BITS);
        assert!(m.rows().iter().all(|row| *row == [1; 8]));

        // A 17th character falls outside the window.
        let m = generate_pattern(&format!("{}0", "f".repeat(16))).unwrap();
        assert_eq!(m.ones(), PATTERN_WINDOW_BITS);
        let m = generate_pattern(&format!("{}f", "0".repeat(16))).unwrap();
        assert_eq!(m.ones(), 0);
        assert_eq!(count_bits(&format!("{}f", "0".repeat(16))).unwrap().ones, 4);
    }

    #[test]
    fn test_row_major_order() {
        // 0x80 = 1000_0000, 0x01 = 0000_0001
        let m = generate_pattern("8001").unwrap();
        assert_eq!(m.cell(0, 0), Some(1));
        assert_eq!(m.cell(0, 7), Some(0));
        assert_eq!(m.cell(1, 7), Some(1));
        assert_eq!(m.cell(8, 0), None);
    }

    #[test]
    fn test_count_bits_is_bit_level() {
        // '1' = 0001: one set bit, three zero bits.
        assert_eq!(count_bits("1").unwrap(), BitCounts { ones: 1, zeros: 3 });
        assert_eq!(count_bits("0").unwrap(), BitCounts { ones: 0, zeros: 4 });
    }

    #[test]
    fn test_display_and_blocks() {
        let m = generate_pattern("f0").unwrap();
        let text = m.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "11110000");
        assert_eq!(lines[1], "00000000");
        assert!(m.render_blocks().starts_with("████····"));
    }

    #[test]
    fn test_diff_pattern() {
        let d = diff_pattern("f0", "0f").unwrap();
        assert_eq!(d.changed_cells(), 8);
        assert!(d.is_changed(0, 0));
        assert!(!d.is_changed(1, 0));
        assert!(diff_pattern("f0", "f").is_err());
    }

    #[test]
    fn test_invalid_input() {
        assert!(generate_pattern("").is_err());
        assert!(count_bits("xyz").is_err());
    }

    #[test]
    fn test_one_percentage() {
        let counts = count_bits("f0").unwrap();
        assert_eq!(counts.one_percentage(), 50.0);
    }
}
