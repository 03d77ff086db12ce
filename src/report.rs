// src/report.rs
// =============================================================================
// Joins check results with their URL groups into broken-link reports.
//
// A URL is broken when its final status is anything but 200, or when the
// request never completed and unreachable URLs are being reported.
// Skipped URLs are never broken.
// =============================================================================

use crate::checker::{CheckResult, DedupedLinks};
use std::collections::HashMap;
use tracing::warn;

/// How many affected files are listed before "... and N more".
pub const DISPLAY_FILE_LIMIT: usize = 3;

/// One broken URL and where it is referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    pub url: String,
    /// Absent when the request never got a response
    pub status_code: Option<u16>,
    pub reason: String,
    pub occurrences: usize,
    /// Distinct referencing files, in discovery order
    pub files: Vec<String>,
}

impl BrokenLink {
    /// The files shown in the console report.
    pub fn shown_files(&self) -> &[String] {
        &self.files[..self.files.len().min(DISPLAY_FILE_LIMIT)]
    }

    /// How many files are left out of [`BrokenLink::shown_files`].
    pub fn hidden_files(&self) -> usize {
        self.files.len().saturating_sub(DISPLAY_FILE_LIMIT)
    }
}

/// Emits a report for every broken URL, in the order the URLs were first
/// discovered.
///
/// Skipped URLs are never broken. Unreachable URLs are broken only when
/// `report_unreachable` is set.
pub fn aggregate(
    deduped: &DedupedLinks,
    results: &HashMap<String, CheckResult>,
    report_unreachable: bool,
) -> Vec<BrokenLink> {
    let mut broken = Vec::new();
    for group in deduped.groups() {
        let Some(result) = results.get(&group.url) else {
            warn!(url = %group.url, "no check result for URL");
            continue;
        };
        if !result.is_broken(report_unreachable) {
            continue;
        }
        broken.push(BrokenLink {
            url: group.url.clone(),
            status_code: result.status_code(),
            reason: result.reason.clone(),
            occurrences: group.count(),
            files: group.files(),
        });
    }
    broken
}
