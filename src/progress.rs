// src/progress.rs
// =============================================================================
// Progress reporting as callbacks.
//
// The pipeline never prints by itself; it tells a Progress implementation
// what happened. Console prints the familiar progress lines, Silent backs
// --quiet (and keeps tests quiet).
// =============================================================================

use crate::checker::{CheckResult, LinkCategory, LinkStatus};
use crate::pipeline::Stage;

/// Print a "Checked N/M" line after every this many completions.
const PROGRESS_EVERY: usize = 10;

/// Observer of pipeline events. Every method defaults to doing nothing.
pub trait Progress {
    fn files_found(&self, _count: usize) {}

    fn links_extracted(&self, _total: usize, _histogram: &[(LinkCategory, usize)]) {}

    fn stage_started(&self, _stage: Stage, _unique: usize) {}

    fn url_checked(&self, _stage: Stage, _checked: usize, _total: usize, _result: &CheckResult) {}

    fn stage_finished(&self, _stage: Stage, _unique: usize, _skipped: usize) {}
}

/// Reports nothing; used by `--quiet`.
pub struct Silent;

impl Progress for Silent {}

/// Human-readable progress on stdout.
pub struct Console;

impl Progress for Console {
    fn files_found(&self, count: usize) {
        println!("🔍 Scanning for markdown files...");
        println!("Found {} markdown files\n", count);
    }

    fn links_extracted(&self, total: usize, histogram: &[(LinkCategory, usize)]) {
        println!("📝 Extracting links...");
        println!("Found {} total links\n", total);

        println!("📊 Link Categories:");
        for (category, count) in histogram {
            println!("  {}: {}", category, count);
        }
        println!();
    }

    fn stage_started(&self, stage: Stage, unique: usize) {
        println!("🔗 Checking {} {} links...", unique, stage.label());
    }

    fn url_checked(&self, stage: Stage, checked: usize, total: usize, result: &CheckResult) {
        match &result.status {
            LinkStatus::Http(code) if *code != 200 => println!("❌ [{}] {}", code, result.url),
            LinkStatus::Unreachable(_) => {
                println!("⚠️  Error checking {}: {}", result.url, result.reason)
            }
            _ if checked % PROGRESS_EVERY == 0 => {
                println!("✓ Checked {}/{} {} URLs...", checked, total, stage.label())
            }
            _ => {}
        }
    }

    fn stage_finished(&self, stage: Stage, unique: usize, skipped: usize) {
        println!("✅ Checked {} unique {} URLs", unique, stage.label());
        if skipped > 0 {
            println!("⏭️  Skipped {} {} URLs that need context", skipped, stage.label());
        }
        println!();
    }
}
