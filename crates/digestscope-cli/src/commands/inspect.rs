use digestscope_core::{DigestReport, Explorer, RustCryptoHasher};

pub fn run(text: &str, algorithm: &str, json: bool) {
    let algorithm = super::parse_algorithm(algorithm);
    let explorer = Explorer::new(RustCryptoHasher, algorithm);
    let report = match explorer.inspect(text) {
        Ok(report) => report,
        Err(e) => super::fail(e),
    };

    if json {
        super::print_json(&report);
        return;
    }

    println!("{} digest of {text:?}:\n", algorithm.display_name());
    print!("{}", format_digest_report(&report));
}

/// Human-readable block for one digest.
pub fn format_digest_report(report: &DigestReport) -> String {
    let stats = &report.statistics;
    let mut out = String::new();

    out.push_str(&format!("  {}\n\n", report.digest));
    out.push_str(&format!(
        "  Entropy        {:.3} bits/char ({:.1}% of max, {})\n",
        stats.entropy,
        stats.uniformity,
        report.entropy_quality.label()
    ));
    out.push_str(&format!(
        "  Distribution   {} distinct chars ({})\n",
        stats.distinct_chars,
        report.distribution_quality.label()
    ));
    out.push_str(&format!(
        "  Hex chars      {} '0' / {} other\n",
        stats.zeros, stats.ones
    ));
    out.push_str(&format!(
        "  Bits           {} ones / {} zeros ({:.1}% ones)\n",
        report.bits.ones,
        report.bits.zeros,
        report.bits.one_percentage()
    ));
    out.push_str(&format!(
        "  Sequences      longest run {}, {} transitions\n",
        stats.longest_char_run, stats.transitions
    ));

    let top: Vec<String> = stats
        .distribution
        .iter()
        .take(5)
        .map(|(c, n)| format!("{c}:{n}"))
        .collect();
    out.push_str(&format!("  Most frequent  {}\n", top.join("  ")));

    out.push_str("\n  Bit pattern (first 64 bits):\n");
    for line in report.pattern.render_blocks().lines() {
        out.push_str(&format!("    {line}\n"));
    }
    out
}
