// src/checker/http.rs
// =============================================================================
// This module checks if URLs are alive by making HTTP requests.
//
// Two resolution strategies:
// - Internal: "/guide/intro" is appended to the configured base URL and
//   fetched with GET. Anything that is not site-absolute (e.g. "../x.md")
//   is skipped: it needs the referencing file's directory to resolve.
// - External: a HEAD request. If the server answers 405 Method Not Allowed
//   we retry exactly once with GET, without reading the body.
//
// Concurrency:
// - All checks of a stage go through one buffer_unordered() pool, so at
//   most `max_concurrency` requests are in flight.
// - Completed results are drained one at a time by the caller's loop into
//   the result map. Nothing is shared between workers, so no locks.
// - A failing URL never affects the others: every error becomes data.
// =============================================================================

use crate::config::CheckerConfig;
use crate::error::CheckError;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use reqwest::{redirect, Client, Response, StatusCode};
use std::collections::HashMap;
use tracing::debug;

/// Reason recorded for links that cannot be resolved without context.
pub const SKIPPED_REASON: &str = "needs context";

/// How a set of URLs is turned into requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Site-absolute paths, resolved against the base URL
    Internal,
    /// Full http(s) URLs, checked with HEAD then GET on 405
    External,
}

/// Outcome of checking one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// The server answered; this is the final status after redirects
    Http(u16),
    /// No status could be obtained (timeout, DNS, refused, TLS, bad URL)
    Unreachable(CheckError),
    /// Not checked because it cannot be resolved on its own
    Skipped,
}

/// The result of checking a single unique URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// The URL as submitted (the key of the result map)
    pub url: String,
    pub status: LinkStatus,
    /// Canonical status text ("Not Found") or the failure description
    pub reason: String,
}

impl CheckResult {
    fn skipped(url: String) -> Self {
        Self {
            url,
            status: LinkStatus::Skipped,
            reason: SKIPPED_REASON.to_string(),
        }
    }

    fn from_response(url: String, response: &Response) -> Self {
        let status = response.status();
        Self {
            url,
            status: LinkStatus::Http(status.as_u16()),
            reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
        }
    }

    fn from_error(url: String, error: CheckError) -> Self {
        Self {
            url,
            reason: error.to_string(),
            status: LinkStatus::Unreachable(error),
        }
    }

    /// The HTTP status, absent for skipped and unreachable URLs.
    pub fn status_code(&self) -> Option<u16> {
        match self.status {
            LinkStatus::Http(code) => Some(code),
            _ => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, LinkStatus::Skipped)
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self.status, LinkStatus::Unreachable(_))
    }

    /// Anything but a plain 200 is broken. Unreachable URLs count only when
    /// `report_unreachable` is set; skipped URLs never do.
    pub fn is_broken(&self, report_unreachable: bool) -> bool {
        match self.status {
            LinkStatus::Http(code) => code != StatusCode::OK.as_u16(),
            LinkStatus::Unreachable(_) => report_unreachable,
            LinkStatus::Skipped => false,
        }
    }
}

/// Checks URLs concurrently with a bounded number of requests in flight.
pub struct Checker {
    client: Client,
    config: CheckerConfig,
}

impl Checker {
    /// Builds the HTTP client from the configuration.
    ///
    /// Idle connections are not kept around: every check opens and closes
    /// its own, so nothing outlives a single request.
    pub fn new(config: CheckerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .pool_max_idle_per_host(0)
            .user_agent(concat!("doc-link-verifier/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Rewrites a site-absolute link onto the base URL.
    ///
    /// "/guide/intro" with base "http://localhost:3000/#/" becomes
    /// "http://localhost:3000/#/guide/intro". Returns None for links that
    /// are not site-absolute.
    pub fn internal_url(&self, url: &str) -> Option<String> {
        url.starts_with('/')
            .then(|| format!("{}{}", self.config.base_url, url.trim_start_matches('/')))
    }

    // Checks every URL and returns exactly one result per unique URL.
    //
    // `on_checked(checked, total, result)` runs once per completion, in
    // completion order, from this function's own loop.
    pub async fn check_links<F>(
        &self,
        urls: Vec<String>,
        resolution: Resolution,
        mut on_checked: F,
    ) -> HashMap<String, CheckResult>
    where
        F: FnMut(usize, usize, &CheckResult),
    {
        let total = urls.len();
        let pending = stream::iter(urls)
            .map(|url| self.check_one(url, resolution))
            .buffer_unordered(self.config.max_concurrency.max(1));
        let mut pending = std::pin::pin!(pending);

        let mut results = HashMap::with_capacity(total);
        let mut checked = 0;
        while let Some(result) = pending.next().await {
            checked += 1;
            on_checked(checked, total, &result);
            results.insert(result.url.clone(), result);
        }
        results
    }

    async fn check_one(&self, url: String, resolution: Resolution) -> CheckResult {
        match resolution {
            Resolution::Internal => self.check_internal(url).await,
            Resolution::External => self.check_external(url).await,
        }
    }

    async fn check_internal(&self, url: String) -> CheckResult {
        let Some(target) = self.internal_url(&url) else {
            debug!(%url, "skipping link that needs directory context");
            return CheckResult::skipped(url);
        };

        debug!(%url, %target, "GET internal link");
        match self.client.get(&target).send().await {
            Ok(response) => CheckResult::from_response(url, &response),
            Err(e) => CheckResult::from_error(url, e.into()),
        }
    }

    async fn check_external(&self, url: String) -> CheckResult {
        match self.head_then_get(&url).await {
            Ok(response) => CheckResult::from_response(url, &response),
            Err(e) => CheckResult::from_error(url, e.into()),
        }
    }

    // HEAD first (no body). Some servers refuse HEAD with 405 but serve
    // GET fine, so that one status earns a single GET retry. The GET body
    // is never read; dropping the response closes the stream.
    async fn head_then_get(&self, url: &str) -> Result<Response, reqwest::Error> {
        debug!(%url, "HEAD external link");
        let response = self.client.head(url).send().await?;
        if response.status() != StatusCode::METHOD_NOT_ALLOWED {
            return Ok(response);
        }

        drop(response);
        debug!(%url, "HEAD not allowed, retrying with GET");
        self.client.get(url).send().await
    }
}
