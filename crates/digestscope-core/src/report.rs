//! Bundled reports for one digest or a pair of digests, and the [`Explorer`]
//! that produces them from text through an injected [`DigestHasher`].

use serde::Serialize;

use crate::algorithm::HashAlgorithm;
use crate::analysis::{ComparisonAnalysis, analyze};
use crate::binary::hex_to_binary;
use crate::comparison::{AvalancheGrade, DiffLevel, DigestComparison, compare};
use crate::error::Result;
use crate::hashing::{DigestHasher, RustCryptoHasher, sanitize_input};
use crate::pattern::{BitCounts, BitMatrix, PatternDiff, count_bits, diff_pattern, generate_pattern};
use crate::statistics::{DigestStatistics, DistributionQuality, EntropyQuality, compute_statistics};

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Everything the engine can say about a single digest.
#[derive(Debug, Clone, Serialize)]
pub struct DigestReport {
    pub digest: String,
    /// Inferred from the digest length; `None` for non-standard lengths.
    pub algorithm: Option<HashAlgorithm>,
    pub binary: String,
    pub statistics: DigestStatistics,
    pub entropy_quality: EntropyQuality,
    pub distribution_quality: DistributionQuality,
    pub bits: BitCounts,
    pub pattern: BitMatrix,
}

impl DigestReport {
    pub fn build(digest: &str) -> Result<Self> {
        let statistics = compute_statistics(digest)?;
        Ok(Self {
            digest: digest.to_string(),
            algorithm: HashAlgorithm::from_hex_len(digest.len()),
            binary: hex_to_binary(digest)?,
            entropy_quality: EntropyQuality::from_entropy(statistics.entropy),
            distribution_quality: DistributionQuality::from_distribution(
                &statistics.distribution,
            ),
            statistics,
            bits: count_bits(digest)?,
            pattern: generate_pattern(digest)?,
        })
    }
}

/// Both digests' reports plus their comparison and derived analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub primary: DigestReport,
    pub secondary: DigestReport,
    pub comparison: DigestComparison,
    pub analysis: ComparisonAnalysis,
    pub avalanche_grade: AvalancheGrade,
    pub diff_level: DiffLevel,
    pub pattern_diff: PatternDiff,
}

impl ComparisonReport {
    pub fn build(digest_a: &str, digest_b: &str, text_a: &str, text_b: &str) -> Result<Self> {
        let comparison = compare(digest_a, digest_b, text_a, text_b)?;
        let analysis = analyze(digest_a, digest_b, &comparison)?;
        Ok(Self {
            primary: DigestReport::build(digest_a)?,
            secondary: DigestReport::build(digest_b)?,
            avalanche_grade: AvalancheGrade::from_effect(comparison.avalanche_effect),
            diff_level: DiffLevel::from_percentage(comparison.diff_percentage),
            pattern_diff: diff_pattern(digest_a, digest_b)?,
            comparison,
            analysis,
        })
    }
}

// ---------------------------------------------------------------------------
// Explorer
// ---------------------------------------------------------------------------

/// Hashes text with an injected hasher and reports on the result.
#[derive(Debug, Clone)]
pub struct Explorer<H = RustCryptoHasher> {
    hasher: H,
    algorithm: HashAlgorithm,
}

impl Default for Explorer<RustCryptoHasher> {
    fn default() -> Self {
        Self::new(RustCryptoHasher, HashAlgorithm::default())
    }
}

impl<H: DigestHasher> Explorer<H> {
    pub fn new(hasher: H, algorithm: HashAlgorithm) -> Self {
        Self { hasher, algorithm }
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Sanitized `text` hashed with the configured algorithm.
    pub fn digest_of(&self, text: &str) -> Result<String> {
        let text = sanitize_input(text)?;
        Ok(self.hasher.digest(text.as_bytes(), self.algorithm))
    }

    pub fn inspect(&self, text: &str) -> Result<DigestReport> {
        DigestReport::build(&self.digest_of(text)?)
    }

    /// Hash both texts and compare the digests. The avalanche gate looks at
    /// the sanitized texts.
    pub fn compare_texts(&self, text_a: &str, text_b: &str) -> Result<ComparisonReport> {
        let clean_a = sanitize_input(text_a)?;
        let clean_b = sanitize_input(text_b)?;
        let digest_a = self.hasher.digest(clean_a.as_bytes(), self.algorithm);
        let digest_b = self.hasher.digest(clean_b.as_bytes(), self.algorithm);
        ComparisonReport::build(&digest_a, &digest_b, &clean_a, &clean_b)
    }

    /// Compare every consecutive pair of `steps`.
    pub fn walk(&self, steps: &[&str]) -> Result<Vec<ComparisonReport>> {
        steps
            .windows(2)
            .map(|pair| self.compare_texts(pair[0], pair[1]))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Built-in demonstrations
// ---------------------------------------------------------------------------

/// A titled sequence of inputs that shows off one avalanche property.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DemoSequence {
    pub title: &'static str,
    pub description: &'static str,
    pub steps: &'static [&'static str],
}

const DEMOS: &[DemoSequence] = &[
    DemoSequence {
        title: "Single character change",
        description: "One changed character rewrites the whole digest",
        steps: &[
            "Hello World",
            "Hello World!",
            "Hello World.",
            "Hello World,",
            "Hello World",
        ],
    },
    DemoSequence {
        title: "Whitespace",
        description: "Spaces and their absence are input like any other character",
        steps: &[
            "Hello World",
            "Hello  World",
            "Hello   World",
            "HelloWorld",
            "Hello World",
        ],
    },
    DemoSequence {
        title: "Case sensitivity",
        description: "Changing letter case changes the digest",
        steps: &[
            "Password123",
            "password123",
            "PASSWORD123",
            "PaSsWoRd123",
            "Password123",
        ],
    },
    DemoSequence {
        title: "Special characters",
        description: "Punctuation, emoji and CJK text hash like any other bytes",
        steps: &[
            "你好，世界！@#¥%……&*",
            "Hello, World!@#$%^&*",
            "🌍🌎🌏👋😊",
            "你好，世界！@#¥%……&*",
        ],
    },
    DemoSequence {
        title: "Repeated characters",
        description: "Low-entropy inputs still give evenly spread digests",
        steps: &["0000000000", "1111111111", "aaaaaaaaaa", "0000000000"],
    },
    DemoSequence {
        title: "Long text",
        description: "However long the input, the digest length is fixed",
        steps: &["This is a long piece of text used to test a property of hash functions. \
                  No matter how long the input text is, the length of the digest stays the \
                  same. This is one of the most important properties of a hash function."],
    },
];

pub fn demo_sequences() -> &'static [DemoSequence] {
    DEMOS
}
