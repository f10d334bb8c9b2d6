use digestscope_core::{ComparisonReport, Digest};

use super::compare::{CompareView, format_comparison};

pub struct AnalyzeCommandConfig<'a> {
    pub digest_a: &'a str,
    pub digest_b: &'a str,
    pub text_a: &'a str,
    pub text_b: &'a str,
    pub view: &'a str,
    pub json: bool,
}

pub fn run(cfg: AnalyzeCommandConfig<'_>) {
    let a = match Digest::parse(cfg.digest_a) {
        Ok(d) => d,
        Err(e) => super::fail(e),
    };
    let b = match Digest::parse(cfg.digest_b) {
        Ok(d) => d,
        Err(e) => super::fail(e),
    };
    if a.algorithm() != b.algorithm() {
        super::fail(format!(
            "digests come from different algorithms ({} vs {})",
            a.algorithm().display_name(),
            b.algorithm().display_name()
        ));
    }

    let report = match ComparisonReport::build(a.as_str(), b.as_str(), cfg.text_a, cfg.text_b) {
        Ok(report) => report,
        Err(e) => super::fail(e),
    };

    if cfg.json {
        super::print_json(&report);
        return;
    }

    println!("Analyzing two {} digests\n", a.algorithm().display_name());
    print!("{}", format_comparison(&report, CompareView::parse(cfg.view)));
    if cfg.text_a.is_empty() && cfg.text_b.is_empty() {
        println!("\n  (pass --text-a and --text-b to compute the avalanche effect)");
    }
}
