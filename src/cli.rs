// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Every option that tunes the checker can also come from an environment
// variable (clap's 'env' feature), which is handy in CI where the docs
// site runs on a different port.
// =============================================================================

use crate::checker::NormalizePolicy;
use crate::config::{
    CheckerConfig, Config, ScanOptions, DEFAULT_BASE_URL, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS,
};
use clap::builder::TypedValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "doc-link-verifier",
    version,
    about = "Verify internal and GitHub links across a markdown documentation tree",
    long_about = "doc-link-verifier scans a directory for markdown files, extracts every inline \
                  [text](url) link, and checks site-internal and GitHub links concurrently. \
                  It exits with 1 if any link is broken, which makes it easy to drop into CI."
)]
pub struct Cli {
    /// Root of the documentation tree
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Base URL that absolute links ("/guide") are appended to
    ///
    /// The link is appended as-is after dropping its leading slash, so the
    /// base must end with "/" (e.g. http://localhost:3000/#/).
    #[arg(long, env = "DOC_LINKS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "DOC_LINKS_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Maximum number of checks in flight at once
    #[arg(
        long,
        env = "DOC_LINKS_MAX_CONCURRENCY",
        default_value_t = DEFAULT_MAX_CONCURRENCY,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
    )]
    pub max_concurrency: usize,

    /// Maximum redirects to follow before giving up on a URL
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// Additional directory name to skip (repeatable)
    ///
    /// .git and node_modules are always skipped.
    #[arg(long = "exclude", value_name = "DIR")]
    pub exclude: Vec<String>,

    /// How URLs are compared when grouping duplicates
    #[arg(long, value_enum, default_value_t = NormalizeArg::Exact)]
    pub normalize: NormalizeArg,

    /// Also check external links that are not hosted on GitHub
    #[arg(long)]
    pub check_external: bool,

    /// Do not count timeouts and connection failures as broken links
    #[arg(long)]
    pub ignore_unreachable: bool,

    /// Only print the final summary, no progress lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Command-line spelling of [`NormalizePolicy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NormalizeArg {
    /// Raw URL strings are compared as-is
    Exact,
    /// Case of scheme/host and a trailing slash are ignored
    Loose,
}

impl From<NormalizeArg> for NormalizePolicy {
    fn from(arg: NormalizeArg) -> Self {
        match arg {
            NormalizeArg::Exact => NormalizePolicy::Exact,
            NormalizeArg::Loose => NormalizePolicy::Loose,
        }
    }
}

impl Cli {
    /// Converts parsed arguments into the run configuration.
    ///
    /// `quiet` and `verbose` are read before this call; they shape output,
    /// not the run itself.
    pub fn into_config(self) -> Config {
        let scan = ScanOptions {
            excluded_dirs: self.exclude,
            normalize: self.normalize.into(),
            check_external: self.check_external,
            report_unreachable: !self.ignore_unreachable,
            ..ScanOptions::new(self.root)
        };
        let checker = CheckerConfig {
            base_url: self.base_url,
            timeout: Duration::from_secs(self.timeout),
            max_concurrency: self.max_concurrency,
            max_redirects: self.max_redirects,
        };
        Config { scan, checker }
    }

    /// Log filter used when RUST_LOG is not set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["doc-link-verifier"]).unwrap();
        assert_eq!(cli.log_level(), "warn");
        assert!(!cli.quiet);
        let config = cli.into_config();
        assert_eq!(config.scan.root, PathBuf::from("."));
        assert_eq!(config.scan.normalize, NormalizePolicy::Exact);
        assert!(config.scan.report_unreachable);
        assert!(!config.scan.check_external);
        assert_eq!(config.checker.max_concurrency, 20);
        assert_eq!(config.checker.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "doc-link-verifier",
            "docs",
            "--base-url",
            "http://127.0.0.1:8080/",
            "--timeout",
            "3",
            "--max-concurrency",
            "4",
            "--exclude",
            "vendor",
            "--exclude",
            "build",
            "--normalize",
            "loose",
            "--check-external",
            "--ignore-unreachable",
            "--quiet",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), "debug");
        assert!(cli.quiet);

        let config = cli.into_config();
        assert_eq!(config.scan.root, PathBuf::from("docs"));
        assert_eq!(config.scan.excluded_dirs, vec!["vendor", "build"]);
        assert_eq!(config.scan.normalize, NormalizePolicy::Loose);
        assert!(config.scan.check_external);
        assert!(!config.scan.report_unreachable);
        assert_eq!(config.checker.base_url, "http://127.0.0.1:8080/");
        assert_eq!(config.checker.timeout, Duration::from_secs(3));
        assert_eq!(config.checker.max_concurrency, 4);
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let result = Cli::try_parse_from(["doc-link-verifier", "--max-concurrency", "0"]);
        assert!(result.is_err());
    }
}
