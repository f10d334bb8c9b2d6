//! Higher-level metrics derived from a [`DigestComparison`]: diff segments,
//! longest run, gaps, front/back-half split, per-character counts and a
//! plain-language summary.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::binary::validate_hex;
use crate::comparison::{AVALANCHE_GOOD_THRESHOLD, DigestComparison};
use crate::error::{DigestError, Result};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Which half of the digest holds more differing positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffHalf {
    Front,
    Back,
}

impl DiffHalf {
    pub fn label(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }
}

/// Occurrences of one character in each of the two digests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharComparison {
    pub char: char,
    pub main_count: usize,
    pub comp_count: usize,
}

/// Descriptive metrics for a digest comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonAnalysis {
    /// Diff positions with index `< length / 2`.
    pub front_half_diffs: Vec<usize>,
    /// Diff positions with index `>= length / 2`.
    pub back_half_diffs: Vec<usize>,
    pub front_half_percentage: f64,
    pub back_half_percentage: f64,
    /// Longest run of adjacent differing positions.
    pub max_consecutive_diff: usize,
    /// Number of maximal runs of adjacent differing positions.
    pub diff_segments: usize,
    /// Largest distance between consecutive differing positions.
    pub max_gap: usize,
    /// Whole-digest character counts over the union of both alphabets.
    pub char_distribution: Vec<CharComparison>,
    pub dominant_half: DiffHalf,
    pub summary: String,
}

/// Run/segment/gap figures for a set of diff positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub max_consecutive: usize,
    pub segments: usize,
    pub max_gap: usize,
}

// ---------------------------------------------------------------------------
// Analysis functions
// ---------------------------------------------------------------------------

/// Derive descriptive metrics from a comparison of `digest_a` and `digest_b`.
pub fn analyze(
    digest_a: &str,
    digest_b: &str,
    comparison: &DigestComparison,
) -> Result<ComparisonAnalysis> {
    validate_hex(digest_a)?;
    validate_hex(digest_b)?;
    if digest_a.len() != digest_b.len() {
        return Err(DigestError::LengthMismatch {
            left: digest_a.len(),
            right: digest_b.len(),
        });
    }

    let mut positions = comparison.diff_positions.clone();
    positions.sort_unstable();
    positions.dedup();
    if let Some(&last) = positions.last().filter(|&&p| p >= digest_a.len()) {
        return Err(DigestError::invalid(
            digest_a,
            format!(
                "diff position {last} is out of range for {} characters",
                digest_a.len()
            ),
        ));
    }

    let half = digest_a.len() as f64 / 2.0;
    let (front_half_diffs, back_half_diffs): (Vec<usize>, Vec<usize>) =
        positions.iter().partition(|&&p| (p as f64) < half);
    let front_half_percentage = front_half_diffs.len() as f64 / half * 100.0;
    let back_half_percentage = back_half_diffs.len() as f64 / half * 100.0;

    let runs = run_stats(&positions);
    let dominant_half = if front_half_diffs.len() > back_half_diffs.len() {
        DiffHalf::Front
    } else {
        DiffHalf::Back
    };

    let summary = summarize(comparison, dominant_half, runs.max_consecutive);

    Ok(ComparisonAnalysis {
        front_half_diffs,
        back_half_diffs,
        front_half_percentage,
        back_half_percentage,
        max_consecutive_diff: runs.max_consecutive,
        diff_segments: runs.segments,
        max_gap: runs.max_gap,
        char_distribution: char_distribution(digest_a, digest_b),
        dominant_half,
        summary,
    })
}

/// Walk ascending positions once, tracking runs of adjacent indices.
///
/// Empty input gives all zeros; a single position gives a run and a segment
/// of 1 with no gap.
pub fn run_stats(sorted_positions: &[usize]) -> RunStats {
    let Some((&first, rest)) = sorted_positions.split_first() else {
        return RunStats {
            max_consecutive: 0,
            segments: 0,
            max_gap: 0,
        };
    };

    let mut max_consecutive = 1usize;
    let mut current = 1usize;
    let mut segments = 1usize;
    let mut max_gap = 0usize;
    let mut prev = first;

    for &pos in rest {
        let gap = pos.saturating_sub(prev);
        max_gap = max_gap.max(gap);
        if gap == 1 {
            current += 1;
            max_consecutive = max_consecutive.max(current);
        } else {
            segments += 1;
            current = 1;
        }
        prev = pos;
    }

    RunStats {
        max_consecutive,
        segments,
        max_gap,
    }
}

/// Character counts in each digest over the sorted union of their characters.
pub fn char_distribution(digest_a: &str, digest_b: &str) -> Vec<CharComparison> {
    let union: BTreeSet<char> = digest_a.chars().chain(digest_b.chars()).collect();
    union
        .into_iter()
        .map(|c| CharComparison {
            char: c,
            main_count: digest_a.chars().filter(|&x| x == c).count(),
            comp_count: digest_b.chars().filter(|&x| x == c).count(),
        })
        .collect()
}

fn summarize(comparison: &DigestComparison, dominant: DiffHalf, longest_run: usize) -> String {
    if comparison.identical {
        return "The two digests are identical, so the input was not changed.".to_string();
    }

    let avalanche = if comparison.avalanche_effect > AVALANCHE_GOOD_THRESHOLD {
        "This shows a good avalanche effect: a small input change produced a large output difference."
    } else {
        "The avalanche effect is below the ideal; the input difference may need further analysis."
    };

    format!(
        "The two digests differ in {} bits ({:.1}%). {} Differences are concentrated in the {} half, \
         and the longest consecutive run of differing characters is {}.",
        comparison.diff_bits,
        comparison.diff_percentage,
        avalanche,
        dominant.label(),
        longest_run
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::compare;

    fn comparison_with_positions(positions: Vec<usize>) -> DigestComparison {
        DigestComparison {
            identical: positions.is_empty(),
            diff_count: positions.len(),
            diff_positions: positions,
            diff_bits: 0,
            diff_percentage: 0.0,
            avalanche_effect: 0.0,
            input_diff_count: 0,
            entropy: 0.0,
        }
    }

    #[test]
    fn test_no_diffs_all_zero() {
        let c = compare("abcd", "abcd", "t", "t").unwrap();
        let a = analyze("abcd", "abcd", &c).unwrap();
        assert_eq!(a.diff_segments, 0);
        assert_eq!(a.max_consecutive_diff, 0);
        assert_eq!(a.max_gap, 0);
        assert!(a.front_half_diffs.is_empty());
        assert!(a.back_half_diffs.is_empty());
        assert_eq!(a.front_half_percentage, 0.0);
        assert_eq!(
            a.summary,
            "The two digests are identical, so the input was not changed."
        );
    }

    #[test]
    fn test_single_diff() {
        let stats = run_stats(&[5]);
        assert_eq!(
            stats,
            RunStats {
                max_consecutive: 1,
                segments: 1,
                max_gap: 0
            }
        );
    }

    #[test]
    fn test_runs_segments_and_gaps() {
        // Runs: [1,2,3] [7] [9,10]
        let stats = run_stats(&[1, 2, 3, 7, 9, 10]);
        assert_eq!(stats.max_consecutive, 3);
        assert_eq!(stats.segments, 3);
        assert_eq!(stats.max_gap, 4);
    }

    #[test]
    fn test_longest_run_after_shorter_run() {
        let stats = run_stats(&[0, 1, 5, 6, 7, 8]);
        assert_eq!(stats.max_consecutive, 4);
        assert_eq!(stats.segments, 2);
    }

    #[test]
    fn test_unsorted_positions_are_sorted_first() {
        let c = comparison_with_positions(vec![3, 0, 2, 1, 3]);
        let a = analyze("00000000", "11110000", &c).unwrap();
        assert_eq!(a.max_consecutive_diff, 4);
        assert_eq!(a.diff_segments, 1);
        assert_eq!(a.front_half_diffs, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_half_split() {
        let c = compare("00000000", "10000011", "a", "b").unwrap();
        let a = analyze("00000000", "10000011", &c).unwrap();
        assert_eq!(a.front_half_diffs, vec![0]);
        assert_eq!(a.back_half_diffs, vec![6, 7]);
        assert_eq!(a.front_half_percentage, 25.0);
        assert_eq!(a.back_half_percentage, 50.0);
        assert_eq!(a.dominant_half, DiffHalf::Back);
    }

    #[test]
    fn test_char_distribution_union_sorted() {
        let dist = char_distribution("aab0", "b0cc");
        let chars: Vec<char> = dist.iter().map(|c| c.char).collect();
        assert_eq!(chars, vec!['0', 'a', 'b', 'c']);
        assert_eq!(
            dist[1],
            CharComparison {
                char: 'a',
                main_count: 2,
                comp_count: 0
            }
        );
        assert_eq!(dist[3].comp_count, 2);
        assert_eq!(dist[3].main_count, 0);
    }

    #[test]
    fn test_summary_template() {
        let c = compare("ab", "ac", "x", "y").unwrap();
        let a = analyze("ab", "ac", &c).unwrap();
        assert_eq!(
            a.summary,
            "The two digests differ in 3 bits (37.5%). The avalanche effect is below the ideal; \
             the input difference may need further analysis. Differences are concentrated in the \
             back half, and the longest consecutive run of differing characters is 1."
        );
    }

    #[test]
    fn test_summary_good_avalanche_front_half() {
        let c = compare("ff00", "0000", "x", "y").unwrap();
        let a = analyze("ff00", "0000", &c).unwrap();
        assert_eq!(a.dominant_half, DiffHalf::Front);
        assert!(a.summary.contains("good avalanche effect"));
        assert!(a.summary.contains("front half"));
        assert!(a.summary.contains("8 bits (50.0%)"));
    }

    #[test]
    fn test_out_of_range_position_rejected() {
        let c = comparison_with_positions(vec![usize::MAX, 0, 99]);
        assert!(matches!(
            analyze("ab", "cd", &c),
            Err(DigestError::InvalidDigest { .. })
        ));

        let c = comparison_with_positions(vec![2]);
        assert!(analyze("ab", "cd", &c).is_err());
        let c = comparison_with_positions(vec![1]);
        assert_eq!(analyze("ab", "cd", &c).unwrap().back_half_diffs, vec![1]);
    }

    #[test]
    fn test_length_mismatch() {
        let c = comparison_with_positions(vec![]);
        assert!(matches!(
            analyze("ab", "abc", &c),
            Err(DigestError::LengthMismatch { left: 2, right: 3 })
        ));
    }
}
