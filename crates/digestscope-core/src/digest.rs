//! Validated digest newtype.
//!
//! The analysis functions accept any non-empty lowercase hex string so they
//! can be exercised on toy inputs. [`Digest`] is the stricter front door used
//! by the CLI and the HTTP API: it also insists on a length one of the
//! supported algorithms actually produces.

use std::str::FromStr;

use serde::Serialize;

use crate::algorithm::HashAlgorithm;
use crate::binary::validate_hex;
use crate::error::{DigestError, Result};

/// A lowercase hex digest of MD5, SHA-1, SHA-256 or SHA-512 length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Digest {
    hex: String,
    algorithm: HashAlgorithm,
}

impl Digest {
    /// Parse user-supplied hex. Surrounding whitespace is trimmed and
    /// uppercase is folded to lowercase.
    pub fn parse(input: &str) -> Result<Self> {
        let hex = input.trim().to_ascii_lowercase();
        validate_hex(&hex)?;
        let algorithm = HashAlgorithm::from_hex_len(hex.len()).ok_or_else(|| {
            DigestError::invalid(
                &hex,
                format!(
                    "length {} matches no supported algorithm (32, 40, 64 or 128)",
                    hex.len()
                ),
            )
        })?;
        Ok(Self { hex, algorithm })
    }

    /// Parse and require the digest length of `algorithm`.
    pub fn for_algorithm(input: &str, algorithm: HashAlgorithm) -> Result<Self> {
        let digest = Self::parse(input)?;
        if digest.algorithm != algorithm {
            return Err(DigestError::invalid(
                &digest.hex,
                format!(
                    "expected a {} digest ({} hex characters), got {}",
                    algorithm.display_name(),
                    algorithm.hex_len(),
                    digest.hex.len()
                ),
            ));
        }
        Ok(digest)
    }

    pub fn as_str(&self) -> &str {
        &self.hex
    }

    pub fn len(&self) -> usize {
        self.hex.len()
    }

    /// Always false: an empty digest never parses.
    pub fn is_empty(&self) -> bool {
        self.hex.is_empty()
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl From<Digest> for String {
    fn from(d: Digest) -> Self {
        d.hex
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.hex
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex)
    }
}

impl FromStr for Digest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MD5_EMPTY: &str = "d41d8cd98f00b204e9800998ecf8427e";

    #[test]
    fn test_parse_infers_algorithm() {
        let d = Digest::parse(MD5_EMPTY).unwrap();
        assert_eq!(d.algorithm(), HashAlgorithm::Md5);
        assert_eq!(d.len(), 32);
        assert!(!d.is_empty());
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let d = Digest::parse("  D41D8CD98F00B204E9800998ECF8427E\n").unwrap();
        assert_eq!(d.as_str(), MD5_EMPTY);
    }

    #[test]
    fn test_parse_rejects_unsupported_length() {
        let err = Digest::parse("abcd").unwrap_err();
        assert!(matches!(err, DigestError::InvalidDigest { .. }));
        assert!(err.to_string().contains("length 4"));
    }

    #[test]
    fn test_parse_rejects_empty_and_non_hex() {
        assert!(Digest::parse("").is_err());
        assert!(Digest::parse("   ").is_err());
        let bad = "z".repeat(32);
        assert!(Digest::parse(&bad).is_err());
    }

    #[test]
    fn test_for_algorithm_checks_length() {
        assert!(Digest::for_algorithm(MD5_EMPTY, HashAlgorithm::Md5).is_ok());
        let err = Digest::for_algorithm(MD5_EMPTY, HashAlgorithm::Sha256).unwrap_err();
        assert!(err.to_string().contains("SHA-256"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let d = Digest::parse(MD5_EMPTY).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{MD5_EMPTY}\""));
    }
}
