use digestscope_core::{ComparisonReport, Explorer, RustCryptoHasher};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareView {
    Summary,
    Detailed,
}

impl CompareView {
    pub fn parse(s: &str) -> Self {
        match s {
            "detailed" => Self::Detailed,
            _ => Self::Summary,
        }
    }
}

pub struct CompareCommandConfig<'a> {
    pub text_a: &'a str,
    pub text_b: &'a str,
    pub algorithm: &'a str,
    pub view: &'a str,
    pub json: bool,
}

pub fn run(cfg: CompareCommandConfig<'_>) {
    let algorithm = super::parse_algorithm(cfg.algorithm);
    let explorer = Explorer::new(RustCryptoHasher, algorithm);
    let report = match explorer.compare_texts(cfg.text_a, cfg.text_b) {
        Ok(report) => report,
        Err(e) => super::fail(e),
    };

    if cfg.json {
        super::print_json(&report);
        return;
    }

    println!(
        "Comparing {} digests of {:?} and {:?}\n",
        algorithm.display_name(),
        cfg.text_a,
        cfg.text_b
    );
    print!("{}", format_comparison(&report, CompareView::parse(cfg.view)));
}

/// Render a comparison report. Shared with `analyze`.
pub fn format_comparison(report: &ComparisonReport, view: CompareView) -> String {
    let c = &report.comparison;
    let a = &report.analysis;
    let mut out = String::new();

    out.push_str(&format!("  A  {}\n", report.primary.digest));
    out.push_str(&format!("  B  {}\n", report.secondary.digest));
    let marker = diff_marker(&c.diff_positions, report.primary.digest.len());
    out.push_str(&format!("     {marker}\n\n"));

    if c.identical {
        out.push_str("  Digests are identical.\n");
    } else {
        out.push_str(&format!(
            "  Changed chars  {} of {}\n",
            c.diff_count,
            report.primary.digest.len()
        ));
        out.push_str(&format!(
            "  Changed bits   {} ({:.1}%, {})\n",
            c.diff_bits,
            c.diff_percentage,
            report.diff_level.label()
        ));
    }
    if c.input_diff_count > 0 {
        out.push_str(&format!(
            "  Avalanche      {:.1}% ({})\n",
            c.avalanche_effect,
            report.avalanche_grade.label()
        ));
    } else {
        out.push_str("  Avalanche      0.0% (inputs agree on their common prefix)\n");
    }
    out.push_str(&format!(
        "  Halves         front {:.1}% / back {:.1}%\n",
        a.front_half_percentage, a.back_half_percentage
    ));
    out.push_str(&format!(
        "  Runs           {} segments, longest {}, max gap {}\n",
        a.diff_segments, a.max_consecutive_diff, a.max_gap
    ));
    out.push_str(&format!("\n  {}\n", a.summary));

    if view == CompareView::Detailed {
        out.push_str(&format!(
            "\n  Pattern cells changed: {} of 64\n",
            report.pattern_diff.changed_cells()
        ));
        out.push_str("\n  Character counts (A / B):\n");
        for cc in &a.char_distribution {
            out.push_str(&format!(
                "    {}  {:>3} / {:<3}\n",
                cc.char, cc.main_count, cc.comp_count
            ));
        }
        out.push_str("\n─────────────────────────────────\nDigest A\n\n");
        out.push_str(&super::inspect::format_digest_report(&report.primary));
        out.push_str("\n─────────────────────────────────\nDigest B\n\n");
        out.push_str(&super::inspect::format_digest_report(&report.secondary));
    }
    out
}

/// A `^` under every differing position, spaces elsewhere.
fn diff_marker(positions: &[usize], len: usize) -> String {
    let mut marker = vec![' '; len];
    for &p in positions {
        if let Some(slot) = marker.get_mut(p) {
            *slot = '^';
        }
    }
    marker.into_iter().collect::<String>().trim_end().to_string()
}
