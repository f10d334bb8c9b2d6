use std::path::Path;

use digestscope_core::{HashAlgorithm, HashResult, RustCryptoHasher, hash_many, hash_text};

pub fn run(text: Option<&str>, files: &[String], algorithm: &str, json: bool) {
    let algorithm = super::parse_algorithm(algorithm);

    if files.is_empty() {
        let Some(text) = text else {
            super::fail("provide a text argument or --file <path>");
        };
        let result = match hash_text(&RustCryptoHasher, text, algorithm) {
            Ok(result) => result,
            Err(e) => super::fail(e),
        };
        if json {
            super::print_json(&result);
        } else {
            println!("{}", result.digest);
        }
        return;
    }

    let (results, failed) = hash_files(files, algorithm);
    if json {
        super::print_json(&results);
    } else if files.len() == 1 {
        for r in &results {
            println!("{}", r.digest);
        }
    } else {
        for r in &results {
            println!("{}  {}", r.digest, r.filename.as_deref().unwrap_or("-"));
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} files could not be read", files.len());
        std::process::exit(1);
    }
}

/// Hash every readable file. Unreadable files are reported on stderr and
/// counted; they never stop the rest of the batch.
pub fn hash_files(paths: &[String], algorithm: HashAlgorithm) -> (Vec<HashResult>, usize) {
    let mut loaded = Vec::with_capacity(paths.len());
    let mut failed = 0usize;
    for path in paths {
        match super::read_input_file(Path::new(path)) {
            Ok(bytes) => loaded.push((path.as_str(), bytes)),
            Err(e) => {
                eprintln!("Error: {e}");
                failed += 1;
            }
        }
    }
    let inputs: Vec<(&str, &[u8])> = loaded.iter().map(|(p, b)| (*p, b.as_slice())).collect();
    (hash_many(&RustCryptoHasher, &inputs, algorithm), failed)
}
