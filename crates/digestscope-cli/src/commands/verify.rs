use std::path::Path;

use digestscope_core::{FileIntegrityCheck, HashAlgorithm, RustCryptoHasher, verify_many};

/// Per-file result of a verify run.
#[derive(Debug)]
pub enum FileOutcome {
    Checked(FileIntegrityCheck),
    Unreadable { path: String, error: String },
}

impl FileOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, Self::Checked(c) if c.check.valid)
    }
}

pub fn run(files: &[String], expected: &str, algorithm: &str) {
    let algorithm = super::parse_algorithm(algorithm);
    let outcomes = match check_files(files, algorithm, expected) {
        Ok(outcomes) => outcomes,
        Err(e) => super::fail(e),
    };

    println!("Expected {} digest {}\n", algorithm.display_name(), expected.trim());
    for outcome in &outcomes {
        match outcome {
            FileOutcome::Checked(c) if c.check.valid => {
                println!("  ✓ OK        {}", c.filename);
            }
            FileOutcome::Checked(c) => {
                println!("  ✗ MISMATCH  {}", c.filename);
                println!("              computed {}", c.check.computed);
            }
            FileOutcome::Unreadable { path, error } => {
                println!("  ✗ ERROR     {path}: {error}");
            }
        }
    }

    let failed = outcomes.iter().filter(|o| !o.passed()).count();
    if failed == 0 {
        println!("\n  All {} files match", outcomes.len());
    } else {
        println!("\n  {failed} of {} files failed", outcomes.len());
        std::process::exit(1);
    }
}

/// Check every file against `expected`, in the order given. A file that
/// cannot be read is recorded and the rest are still checked.
pub fn check_files(
    paths: &[String],
    algorithm: HashAlgorithm,
    expected: &str,
) -> digestscope_core::Result<Vec<FileOutcome>> {
    let reads: Vec<(&str, Result<Vec<u8>, String>)> = paths
        .iter()
        .map(|p| (p.as_str(), super::read_input_file(Path::new(p))))
        .collect();
    let readable: Vec<(&str, &[u8])> = reads
        .iter()
        .filter_map(|(p, r)| r.as_ref().ok().map(|b| (*p, b.as_slice())))
        .collect();

    let mut checks = verify_many(&RustCryptoHasher, &readable, algorithm, expected)?.into_iter();
    Ok(reads
        .iter()
        .filter_map(|(path, read)| match read {
            Ok(_) => checks.next().map(FileOutcome::Checked),
            Err(error) => Some(FileOutcome::Unreadable {
                path: path.to_string(),
                error: error.clone(),
            }),
        })
        .collect())
}
