pub mod analyze;
pub mod compare;
pub mod demo;
pub mod hash;
pub mod inspect;
pub mod server;
pub mod verify;

use std::fmt::Display;
use std::path::Path;

use digestscope_core::HashAlgorithm;
use serde::Serialize;

/// Accepted `--algorithm` values.
pub const ALGORITHMS: [&str; 4] = ["md5", "sha1", "sha256", "sha512"];

/// Files larger than this are refused.
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Parse an algorithm string into the enum.
pub fn parse_algorithm(s: &str) -> HashAlgorithm {
    match s.parse() {
        Ok(algorithm) => algorithm,
        Err(_) => {
            eprintln!("Unknown algorithm '{s}', using sha256");
            HashAlgorithm::Sha256
        }
    }
}

/// Print `message` as an error and exit with status 1.
pub fn fail(message: impl Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Pretty-print any report as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(format!("failed to serialize output: {e}")),
    }
}

/// Read a whole file, refusing anything above [`MAX_FILE_SIZE`].
pub fn read_input_file(path: &Path) -> Result<Vec<u8>, String> {
    let meta = std::fs::metadata(path).map_err(|e| format!("{}: {e}", path.display()))?;
    if meta.len() > MAX_FILE_SIZE {
        return Err(format!(
            "{}: file is {} bytes, limit is {} MiB",
            path.display(),
            meta.len(),
            MAX_FILE_SIZE / 1024 / 1024
        ));
    }
    let bytes = std::fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // -----------------------------------------------------------------------
    // parse_algorithm tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_each_algorithm() {
        assert_eq!(parse_algorithm("md5"), HashAlgorithm::Md5);
        assert_eq!(parse_algorithm("sha1"), HashAlgorithm::Sha1);
        assert_eq!(parse_algorithm("sha256"), HashAlgorithm::Sha256);
        assert_eq!(parse_algorithm("sha512"), HashAlgorithm::Sha512);
    }

    #[test]
    fn test_parse_unknown_defaults_sha256() {
        assert_eq!(parse_algorithm("blake3"), HashAlgorithm::Sha256);
        assert_eq!(parse_algorithm(""), HashAlgorithm::Sha256);
    }

    #[test]
    fn test_algorithm_list_parses() {
        for name in ALGORITHMS {
            assert_eq!(parse_algorithm(name).name(), name);
        }
    }

    // -----------------------------------------------------------------------
    // read_input_file tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_read_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();
        assert_eq!(read_input_file(file.path()).unwrap(), b"hello");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input_file(&dir.path().join("missing.txt")).unwrap_err();
        assert!(err.contains("missing.txt"));
    }
}
