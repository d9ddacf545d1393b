// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Two ways to run:
//   site-mirror example.org docs.example.org   -> mirror these, then exit
//   site-mirror                                -> read addresses from stdin
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "site-mirror",
    version = "0.1.0",
    about = "Mirror a website to disk, rewriting same-domain links to the local copies",
    long_about = "site-mirror downloads a page, follows its same-domain links up to --max-depth hops, \
                  and saves every page under <output-dir>/<domain>/<path>. Links to mirrored pages \
                  are rewritten to relative paths so the copy can be browsed offline."
)]
pub struct Cli {
    /// Addresses to mirror (scheme defaults to http://)
    ///
    /// Without any, addresses are read from standard input one per line
    /// until "exit" or end of input.
    pub addresses: Vec<String>,

    /// Maximum number of link hops to follow from each address
    ///
    /// Depth 0 = just the page itself
    /// Depth 1 = the page + the pages it links to
    /// etc.
    #[arg(long, default_value_t = 1)]
    pub max_depth: usize,

    /// Directory the mirror is written to (default: the system temp directory)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Print a JSON report for each address instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Logging level for diagnostics on stderr (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
}

impl Cli {
    pub fn mirror_root(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is Vec<String> for a positional argument?
//    - clap collects every remaining positional value into the Vec
//    - Zero values is fine: the Vec is just empty
//
// 2. Why Option<PathBuf> for --output-dir?
//    - The default (the temp directory) is only known at runtime
//    - None means "not given", and mirror_root() fills it in
//
// 3. What does ValueEnum do?
//    - Lets clap parse "--log-level debug" straight into LogLevel::Debug
//    - Invalid values get a helpful error listing the allowed ones
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["site-mirror"]).unwrap();
        assert!(cli.addresses.is_empty());
        assert_eq!(cli.max_depth, 1);
        assert_eq!(cli.timeout, 10);
        assert!(!cli.json);
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert_eq!(cli.mirror_root(), std::env::temp_dir());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "site-mirror",
            "example.org",
            "https://docs.example.org/guide",
            "--max-depth",
            "3",
            "--output-dir",
            "/srv/mirror",
            "--timeout",
            "30",
            "--json",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.addresses, vec!["example.org", "https://docs.example.org/guide"]);
        assert_eq!(cli.max_depth, 3);
        assert_eq!(cli.mirror_root(), PathBuf::from("/srv/mirror"));
        assert_eq!(cli.timeout, 30);
        assert!(cli.json);
        assert_eq!(cli.log_level.as_str(), "debug");
    }

    #[test]
    fn test_rejects_negative_depth() {
        assert!(Cli::try_parse_from(["site-mirror", "--max-depth", "-1"]).is_err());
    }
}
