// src/pipeline.rs
// =============================================================================
// The top-level run:
//
//   Scan -> Extract -> Classify
//        -> [Dedup -> Check -> Aggregate] for internal links
//        -> [Dedup -> Check -> Aggregate] for GitHub links
//        -> [Dedup -> Check -> Aggregate] for external links (opt-in)
//        -> Summary
//
// Stages run strictly one after another. The only concurrency is inside
// a stage's Check step. Every URL is always checked; there is no
// fail-fast.
// =============================================================================

use crate::checker::{classify, dedup_links, Checker, LinkCategory, LinkOccurrence, Resolution};
use crate::config::{Config, ScanOptions};
use crate::progress::Progress;
use crate::report::{aggregate, BrokenLink};
use crate::scan;
use anyhow::Result;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// A group of categories checked together with one resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Site-absolute links (checked) and relative links (skipped)
    Internal,
    Github,
    /// Non-GitHub http(s) links, only with `check_external`
    External,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Internal => "internal",
            Stage::Github => "GitHub",
            Stage::External => "external",
        }
    }

    fn resolution(self) -> Resolution {
        match self {
            Stage::Internal => Resolution::Internal,
            Stage::Github | Stage::External => Resolution::External,
        }
    }

    // Which stage, if any, checks links of this category
    fn for_category(category: LinkCategory, options: &ScanOptions) -> Option<Stage> {
        match category {
            LinkCategory::Absolute | LinkCategory::Relative => Some(Stage::Internal),
            LinkCategory::Github => Some(Stage::Github),
            LinkCategory::External if options.check_external => Some(Stage::External),
            _ => None,
        }
    }

    fn enabled(options: &ScanOptions) -> Vec<Stage> {
        let mut stages = vec![Stage::Internal, Stage::Github];
        if options.check_external {
            stages.push(Stage::External);
        }
        stages
    }
}

/// What one stage found.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: Stage,
    pub unique_urls: usize,
    pub skipped: usize,
    pub broken: Vec<BrokenLink>,
}

/// Everything the final summary needs.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub files_scanned: usize,
    pub total_links: usize,
    /// Link count per category, sorted by category name
    pub categories: Vec<(LinkCategory, usize)>,
    pub stages: Vec<StageReport>,
}

impl ScanSummary {
    pub fn broken_count(&self) -> usize {
        self.stages.iter().map(|stage| stage.broken.len()).sum()
    }

    /// 0 when nothing is broken, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.broken_count() == 0 {
            0
        } else {
            1
        }
    }
}

// Runs every stage and returns the summary
//
// Errors only for problems that make the whole run impossible (unreadable
// root, HTTP client construction). Per-file and per-URL failures are
// recovered inside the stages.
pub async fn run_pipeline(config: &Config, progress: &dyn Progress) -> Result<ScanSummary> {
    let options = &config.scan;

    let files = scan::find_markdown_files(options)?;
    progress.files_found(files.len());

    let links = scan::collect_links(&options.root, &files);
    let total_links = links.len();

    // Classify once, keeping discovery order inside every stage
    let mut histogram: BTreeMap<LinkCategory, usize> = BTreeMap::new();
    let mut by_stage: HashMap<Stage, Vec<LinkOccurrence>> = HashMap::new();
    for link in links {
        let category = classify(&link.url);
        *histogram.entry(category).or_default() += 1;
        if let Some(stage) = Stage::for_category(category, options) {
            by_stage.entry(stage).or_default().push(link);
        }
    }
    let categories: Vec<_> = histogram.into_iter().collect();
    progress.links_extracted(total_links, &categories);

    let checker = Checker::new(config.checker.clone())?;
    let stages = Stage::enabled(options);
    let mut reports = Vec::with_capacity(stages.len());
    for stage in stages {
        let occurrences = by_stage.remove(&stage).unwrap_or_default();
        reports.push(run_stage(stage, &checker, occurrences, options, progress).await);
    }

    Ok(ScanSummary {
        files_scanned: files.len(),
        total_links,
        categories,
        stages: reports,
    })
}

async fn run_stage(
    stage: Stage,
    checker: &Checker,
    occurrences: Vec<LinkOccurrence>,
    options: &ScanOptions,
    progress: &dyn Progress,
) -> StageReport {
    let deduped = dedup_links(occurrences, options.normalize);
    let unique_urls = deduped.len();
    info!(stage = stage.label(), unique_urls, "checking links");
    progress.stage_started(stage, unique_urls);

    let results = if deduped.is_empty() {
        HashMap::new()
    } else {
        checker
            .check_links(deduped.urls(), stage.resolution(), |checked, total, result| {
                progress.url_checked(stage, checked, total, result)
            })
            .await
    };

    let skipped = results.values().filter(|result| result.is_skipped()).count();
    let unreachable = results.values().filter(|result| result.is_unreachable()).count();
    let broken = aggregate(&deduped, &results, options.report_unreachable);
    info!(stage = stage.label(), broken = broken.len(), skipped, unreachable, "stage finished");
    progress.stage_finished(stage, unique_urls, skipped);

    StageReport {
        stage,
        unique_urls,
        skipped,
        broken,
    }
}
