//! # digestscope-core
//!
//! **Watch one changed character flip half the bits of a digest.**
//!
//! `digestscope-core` turns MD5, SHA-1, SHA-256 and SHA-512 hex digests into
//! numbers you can reason about: character distribution and Shannon entropy,
//! a bit-exact diff between two digests, the avalanche-effect ratio, diff
//! segmentation, and a fixed 8×8 visual bit pattern.
//!
//! ## Quick Start
//!
//! ```
//! use digestscope_core::{analyze, compare, compute_statistics};
//!
//! let a = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
//! let b = "a52d159f262b2c6ddb724a61840befc36eb30c88877a4030b65cbe86298449c9";
//!
//! let stats = compute_statistics(a).unwrap();
//! assert!(stats.entropy <= 4.0);
//!
//! let comparison = compare(a, b, "abc", "abd").unwrap();
//! let analysis = analyze(a, b, &comparison).unwrap();
//! println!("{}", analysis.summary);
//! ```
//!
//! ## Architecture
//!
//! Text → [`DigestHasher`] → hex digest → statistics / comparison / analysis / pattern
//!
//! The analysis functions never hash anything themselves. Digest computation is an injected
//! capability ([`DigestHasher`]); [`Explorer`] wires a hasher to the analysis
//! functions. Every analysis function is pure and safe to call from any thread.

pub mod algorithm;
pub mod analysis;
pub mod binary;
pub mod comparison;
pub mod digest;
pub mod error;
pub mod hashing;
pub mod pattern;
pub mod report;
pub mod statistics;

pub use algorithm::HashAlgorithm;
pub use analysis::{CharComparison, ComparisonAnalysis, DiffHalf, analyze};
pub use binary::{BITS_PER_HEX, hex_to_binary, validate_hex};
pub use comparison::{
    AVALANCHE_GOOD_THRESHOLD, AvalancheGrade, DiffLevel, DigestComparison, compare,
    input_diff_count,
};
pub use digest::Digest;
pub use error::{DigestError, Result};
pub use hashing::{
    DigestHasher, FileIntegrityCheck, HashResult, InputKind, IntegrityCheck, RustCryptoHasher,
    hash_bytes, hash_many, hash_text, sanitize_input, verify, verify_many,
};
pub use pattern::{
    BitCounts, BitMatrix, PATTERN_COLS, PATTERN_ROWS, PATTERN_WINDOW_BITS, PatternDiff,
    count_bits, diff_pattern, generate_pattern,
};
pub use report::{ComparisonReport, DemoSequence, DigestReport, Explorer, demo_sequences};
pub use statistics::{
    DigestStatistics, DistributionQuality, EntropyQuality, MAX_HEX_ENTROPY, compute_statistics,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
