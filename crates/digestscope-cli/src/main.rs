//! CLI for digestscope: watch one changed character flip half the bits of a digest.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "digestscope")]
#[command(about = "digestscope — explore entropy, bit patterns and the avalanche effect of hash digests")]
#[command(version = digestscope_core::VERSION)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the digest of a text or of one or more files
    Hash {
        /// Text to hash (markup tags are stripped, whitespace trimmed)
        text: Option<String>,

        /// Hash the raw contents of this file instead (repeatable)
        #[arg(long, conflicts_with = "text")]
        file: Vec<String>,

        /// Hash algorithm
        #[arg(long, default_value = "sha256", value_parser = commands::ALGORITHMS)]
        algorithm: String,

        /// Print the full hash result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Statistics, entropy, bit counts and the 8x8 bit pattern of one digest
    Inspect {
        /// Text to hash and inspect
        text: String,

        /// Hash algorithm
        #[arg(long, default_value = "sha256", value_parser = commands::ALGORITHMS)]
        algorithm: String,

        /// Write the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Hash two texts and compare their digests bit by bit
    Compare {
        /// Original text
        text_a: String,

        /// Modified text
        text_b: String,

        /// Hash algorithm
        #[arg(long, default_value = "sha256", value_parser = commands::ALGORITHMS)]
        algorithm: String,

        /// Output view: summary (default) or detailed (per-digest statistics and patterns)
        #[arg(long, default_value = "summary", value_parser = ["summary", "detailed"])]
        view: String,

        /// Write the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two digests computed elsewhere (no hashing)
    Analyze {
        /// First digest (hex)
        digest_a: String,

        /// Second digest (hex, same algorithm)
        digest_b: String,

        /// Text that produced the first digest (enables the avalanche figure)
        #[arg(long, default_value = "")]
        text_a: String,

        /// Text that produced the second digest
        #[arg(long, default_value = "")]
        text_b: String,

        /// Output view: summary (default) or detailed
        #[arg(long, default_value = "summary", value_parser = ["summary", "detailed"])]
        view: String,

        /// Write the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check one or more files against an expected digest
    Verify {
        /// File to check (repeatable; every file is checked against the same digest)
        #[arg(long, required = true)]
        file: Vec<String>,

        /// Expected digest (hex, case-insensitive)
        #[arg(long)]
        expected: String,

        /// Hash algorithm
        #[arg(long, default_value = "sha256", value_parser = commands::ALGORITHMS)]
        algorithm: String,
    },

    /// Walk the built-in avalanche demonstrations
    Demo {
        /// Hash algorithm
        #[arg(long, default_value = "sha256", value_parser = commands::ALGORITHMS)]
        algorithm: String,
    },

    /// Start the HTTP analysis API
    Server {
        /// Port to listen on
        #[arg(long, default_value = "8043")]
        port: u16,

        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Default algorithm for requests that do not name one
        #[arg(long, default_value = "sha256", value_parser = commands::ALGORITHMS)]
        algorithm: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Hash {
            text,
            file,
            algorithm,
            json,
        } => commands::hash::run(text.as_deref(), &file, &algorithm, json),
        Commands::Inspect {
            text,
            algorithm,
            json,
        } => commands::inspect::run(&text, &algorithm, json),
        Commands::Compare {
            text_a,
            text_b,
            algorithm,
            view,
            json,
        } => commands::compare::run(commands::compare::CompareCommandConfig {
            text_a: &text_a,
            text_b: &text_b,
            algorithm: &algorithm,
            view: &view,
            json,
        }),
        Commands::Analyze {
            digest_a,
            digest_b,
            text_a,
            text_b,
            view,
            json,
        } => commands::analyze::run(commands::analyze::AnalyzeCommandConfig {
            digest_a: &digest_a,
            digest_b: &digest_b,
            text_a: &text_a,
            text_b: &text_b,
            view: &view,
            json,
        }),
        Commands::Verify {
            file,
            expected,
            algorithm,
        } => commands::verify::run(&file, &expected, &algorithm),
        Commands::Demo { algorithm } => commands::demo::run(&algorithm),
        Commands::Server {
            port,
            host,
            algorithm,
        } => commands::server::run(&host, port, &algorithm),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
