// src/config.rs
// =============================================================================
// Run configuration.
//
// Everything the pipeline needs is carried in one explicit Config value
// built from the command line, so tests can point the checker at a local
// mock server without touching any global state.
// =============================================================================

use crate::checker::NormalizePolicy;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Address of the local docs site; the hash route prefix is part of it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/#/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_CONCURRENCY: usize = 20;
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Directory names that are never scanned.
pub const ALWAYS_EXCLUDED_DIRS: &[&str] = &[".git", "node_modules"];

/// Top-level configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub scan: ScanOptions,
    pub checker: CheckerConfig,
}

/// What to scan and how to judge the results.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    /// Directory names pruned from the walk, on top of [`ALWAYS_EXCLUDED_DIRS`].
    pub excluded_dirs: Vec<String>,
    pub normalize: NormalizePolicy,
    /// Run a third stage for non-GitHub external links.
    pub check_external: bool,
    /// Count requests that never got a status as broken links.
    pub report_unreachable: bool,
}

/// Settings owned by the concurrent checker.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Prefix that absolute site links are appended to.
    pub base_url: String,
    pub timeout: Duration,
    pub max_concurrency: usize,
    pub max_redirects: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excluded_dirs: Vec::new(),
            normalize: NormalizePolicy::Exact,
            check_external: false,
            report_unreachable: true,
        }
    }

    /// True if a directory with this name must be skipped.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        ALWAYS_EXCLUDED_DIRS.contains(&name) || self.excluded_dirs.iter().any(|dir| dir == name)
    }
}

impl Config {
    /// Rejects settings that would make the run meaningless.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL
    /// ending in "/", the timeout or concurrency is zero, or the root is
    /// not a directory.
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.checker.base_url)
            .with_context(|| format!("Invalid base URL '{}'", self.checker.base_url))?;
        if !matches!(base.scheme(), "http" | "https") {
            bail!("Base URL must use http or https: {}", self.checker.base_url);
        }
        // Links are appended verbatim: "http://x.com" + "guide" would
        // produce "http://x.comguide"
        if !self.checker.base_url.ends_with('/') {
            bail!("Base URL must end with '/': {}", self.checker.base_url);
        }
        if self.checker.timeout.is_zero() {
            bail!("Timeout must be greater than zero");
        }
        if self.checker.max_concurrency == 0 {
            bail!("Max concurrency must be at least 1");
        }
        if !self.scan.root.is_dir() {
            bail!("Not a directory: {}", self.scan.root.display());
        }
        Ok(())
    }
}
