use digestscope_core::{Explorer, RustCryptoHasher, demo_sequences};

pub fn run(algorithm: &str) {
    let algorithm = super::parse_algorithm(algorithm);
    let explorer = Explorer::new(RustCryptoHasher, algorithm);

    println!("Avalanche demonstrations ({})", algorithm.display_name());
    println!("{}", "=".repeat(60));

    for demo in demo_sequences() {
        println!("\n{}: {}", demo.title, demo.description);
        if let [text] = demo.steps {
            match explorer.digest_of(text) {
                Ok(digest) => println!(
                    "  {}-char input → {} hex chars ({} bits)\n  {digest}",
                    text.chars().count(),
                    digest.len(),
                    digest.len() * 4
                ),
                Err(e) => eprintln!("  skipped: {e}"),
            }
            continue;
        }
        let reports = match explorer.walk(demo.steps) {
            Ok(reports) => reports,
            Err(e) => {
                eprintln!("  skipped: {e}");
                continue;
            }
        };
        for (pair, report) in demo.steps.windows(2).zip(&reports) {
            let c = &report.comparison;
            println!(
                "  {:<24} → {:<24} {:>4} bits  {:>5.1}%  {}",
                format!("{:?}", pair[0]),
                format!("{:?}", pair[1]),
                c.diff_bits,
                c.avalanche_effect,
                report.avalanche_grade.label()
            );
        }
    }
}
