// src/output.rs
// =============================================================================
// Prints the final summary banner.
//
// For every stage: either "all links are working" or the list of broken
// links with their status, reason, occurrence count and up to three of
// the files that reference them.
// =============================================================================

use crate::checker::LinkCategory;
use crate::pipeline::{ScanSummary, StageReport};
use crate::report::BrokenLink;

const BANNER_WIDTH: usize = 80;

pub fn print_summary(summary: &ScanSummary) {
    println!("{}", "=".repeat(BANNER_WIDTH));
    println!("📋 SUMMARY");
    println!("{}", "=".repeat(BANNER_WIDTH));

    for stage in &summary.stages {
        print_stage(stage);
    }

    println!();
    println!(
        "📊 {} files, {} links, {} broken",
        summary.files_scanned,
        summary.total_links,
        summary.broken_count()
    );
    if !summary.categories.is_empty() {
        println!("   {}", format_categories(&summary.categories));
    }
    println!("{}", "=".repeat(BANNER_WIDTH));
}

fn print_stage(report: &StageReport) {
    let label = report.stage.label();
    if report.broken.is_empty() {
        println!(
            "\n✅ All {} links are working! ({} unique URLs)",
            label, report.unique_urls
        );
    } else {
        println!(
            "\n❌ Found {} broken {} links out of {} unique URLs:\n",
            report.broken.len(),
            label,
            report.unique_urls
        );
        for link in &report.broken {
            print_broken_link(link);
        }
    }
    if report.skipped > 0 {
        println!("⏭️  {} {} links skipped (need context)", report.skipped, label);
    }
}

fn print_broken_link(link: &BrokenLink) {
    println!("  [{}] {}", format_status(link.status_code), link.url);
    println!("    Reason: {}", link.reason);
    println!("    Occurrences: {}", link.occurrences);
    for file in link.shown_files() {
        println!("      - {}", file);
    }
    if link.hidden_files() > 0 {
        println!("      ... and {} more", link.hidden_files());
    }
    println!();
}

// "absolute: 3, github: 2" in category-name order
fn format_categories(categories: &[(LinkCategory, usize)]) -> String {
    categories
        .iter()
        .map(|(category, count)| format!("{}: {}", category, count))
        .collect::<Vec<_>>()
        .join(", ")
}

// "404" for HTTP answers, "ERR" when the request never completed
fn format_status(status_code: Option<u16>) -> String {
    match status_code {
        Some(code) => code.to_string(),
        None => "ERR".to_string(),
    }
}
