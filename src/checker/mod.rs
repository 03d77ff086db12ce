// src/checker/mod.rs
// =============================================================================
// Everything between "here is some markdown" and "here is the status of
// every unique URL".
//
// Submodules, in pipeline order:
// - markdown: pulls [text](url) occurrences out of file contents
// - classify: decides what kind of link each URL is
// - dedup: groups occurrences so each URL is requested once
// - http: checks the unique URLs concurrently
// =============================================================================

mod classify;
mod dedup;
mod http;
mod markdown;

pub use classify::{classify, LinkCategory};
pub use dedup::{dedup_links, DedupedLinks, NormalizePolicy};
pub use http::{CheckResult, Checker, LinkStatus, Resolution};
pub use markdown::{extract_markdown_links, LinkOccurrence};
