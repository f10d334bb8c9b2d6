//! Digest computation as an injected capability.
//!
//! The analysis engine only consumes hex digests. Whoever needs to turn input
//! into a digest goes through [`DigestHasher`]; [`RustCryptoHasher`] is the
//! default implementation.

use std::sync::LazyLock;
use std::time::Instant;

use md5::Md5;
use regex::Regex;
use serde::Serialize;
use sha1::Sha1;
use sha2::Digest as _;
use sha2::{Sha256, Sha512};

use crate::algorithm::HashAlgorithm;
use crate::digest::Digest;
use crate::error::{DigestError, Result};

/// Computes lowercase hex digests.
pub trait DigestHasher: Send + Sync {
    /// Hash `input` with `algorithm`, returning `algorithm.hex_len()` lowercase
    /// hex characters.
    fn digest(&self, input: &[u8], algorithm: HashAlgorithm) -> String;
}

/// [`DigestHasher`] backed by the RustCrypto `md-5`, `sha1` and `sha2` crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoHasher;

impl DigestHasher for RustCryptoHasher {
    fn digest(&self, input: &[u8], algorithm: HashAlgorithm) -> String {
        match algorithm {
            HashAlgorithm::Md5 => hex::encode(Md5::digest(input)),
            HashAlgorithm::Sha1 => hex::encode(Sha1::digest(input)),
            HashAlgorithm::Sha256 => hex::encode(Sha256::digest(input)),
            HashAlgorithm::Sha512 => hex::encode(Sha512::digest(input)),
        }
    }
}

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup tag pattern is valid"));

/// Strip `<...>` markup tags and surrounding whitespace from text input.
///
/// Returns [`DigestError::EmptyInput`] when nothing is left.
pub fn sanitize_input(text: &str) -> Result<String> {
    let stripped = MARKUP_TAG.replace_all(text, "");
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return Err(DigestError::EmptyInput);
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Hash results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    File,
}

/// One computed digest plus where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct HashResult {
    pub digest: String,
    pub algorithm: HashAlgorithm,
    pub input_kind: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub size_bytes: usize,
    pub processing_time_us: u64,
}

/// Sanitize and hash text input.
pub fn hash_text(
    hasher: &dyn DigestHasher,
    text: &str,
    algorithm: HashAlgorithm,
) -> Result<HashResult> {
    let text = sanitize_input(text)?;
    let t0 = Instant::now();
    let digest = hasher.digest(text.as_bytes(), algorithm);
    Ok(HashResult {
        digest,
        algorithm,
        input_kind: InputKind::Text,
        filename: None,
        size_bytes: text.len(),
        processing_time_us: t0.elapsed().as_micros() as u64,
    })
}

/// Hash raw file contents. No sanitizing: file bytes are hashed verbatim.
pub fn hash_bytes(
    hasher: &dyn DigestHasher,
    bytes: &[u8],
    algorithm: HashAlgorithm,
    filename: Option<&str>,
) -> HashResult {
    let t0 = Instant::now();
    let digest = hasher.digest(bytes, algorithm);
    HashResult {
        digest,
        algorithm,
        input_kind: InputKind::File,
        filename: filename.map(str::to_string),
        size_bytes: bytes.len(),
        processing_time_us: t0.elapsed().as_micros() as u64,
    }
}

// ---------------------------------------------------------------------------
// Integrity check
// ---------------------------------------------------------------------------

/// Outcome of checking content against an expected digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityCheck {
    pub algorithm: HashAlgorithm,
    pub expected: String,
    pub computed: String,
    pub valid: bool,
}

/// Hash `bytes` and compare against `expected` (case-insensitive).
///
/// `expected` must be a well-formed digest for `algorithm`.
pub fn verify(
    hasher: &dyn DigestHasher,
    bytes: &[u8],
    algorithm: HashAlgorithm,
    expected: &str,
) -> Result<IntegrityCheck> {
    let expected = Digest::for_algorithm(expected, algorithm)?;
    Ok(check_against(hasher, bytes, algorithm, &expected))
}

/// Integrity outcome for one named input of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileIntegrityCheck {
    pub filename: String,
    #[serde(flatten)]
    pub check: IntegrityCheck,
}

/// Check every `(filename, bytes)` pair against one expected digest.
///
/// The expected digest is parsed once; a mismatch on one input never stops
/// the others from being checked.
pub fn verify_many(
    hasher: &dyn DigestHasher,
    files: &[(&str, &[u8])],
    algorithm: HashAlgorithm,
    expected: &str,
) -> Result<Vec<FileIntegrityCheck>> {
    let expected = Digest::for_algorithm(expected, algorithm)?;
    Ok(files
        .iter()
        .map(|&(filename, bytes)| FileIntegrityCheck {
            filename: filename.to_string(),
            check: check_against(hasher, bytes, algorithm, &expected),
        })
        .collect())
}

/// Hash every `(filename, bytes)` pair.
pub fn hash_many(
    hasher: &dyn DigestHasher,
    files: &[(&str, &[u8])],
    algorithm: HashAlgorithm,
) -> Vec<HashResult> {
    files
        .iter()
        .map(|&(filename, bytes)| hash_bytes(hasher, bytes, algorithm, Some(filename)))
        .collect()
}

fn check_against(
    hasher: &dyn DigestHasher,
    bytes: &[u8],
    algorithm: HashAlgorithm,
    expected: &Digest,
) -> IntegrityCheck {
    let computed = hasher.digest(bytes, algorithm);
    let valid = computed == expected.as_str();
    if !valid {
        log::debug!("integrity mismatch: expected {expected}, computed {computed}");
    }
    IntegrityCheck {
        algorithm,
        expected: expected.as_str().to_string(),
        computed,
        valid,
    }
}
