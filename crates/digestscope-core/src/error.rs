//! Error types for digest analysis.
//!
//! Every fallible operation in the crate returns [`Result`]. Degenerate but
//! well-formed inputs (identical digests, zero entropy, no diffs) are never
//! errors; they produce zero or neutral values.

use thiserror::Error;

/// Errors raised by the digest analysis engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestError {
    /// The digest is empty, contains characters outside `[0-9a-f]`, or has a
    /// length no supported algorithm produces.
    #[error("invalid digest {digest:?}: {reason}")]
    InvalidDigest { digest: String, reason: String },

    /// Two digests of different lengths were compared. They cannot come from
    /// the same algorithm.
    #[error("digest length mismatch: {left} vs {right} hex characters")]
    LengthMismatch { left: usize, right: usize },

    /// Algorithm name is not one of md5, sha1, sha256, sha512.
    #[error("unknown hash algorithm '{0}' (expected md5, sha1, sha256 or sha512)")]
    UnknownAlgorithm(String),

    /// Text input was empty after sanitizing.
    #[error("input must not be empty")]
    EmptyInput,
}

impl DigestError {
    pub(crate) fn invalid(digest: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log::debug!("rejected digest {digest:?}: {reason}");
        Self::InvalidDigest {
            digest: digest.to_string(),
            reason,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DigestError>;
