// src/scan/mod.rs
// =============================================================================
// This module finds the markdown files of a documentation tree and reads
// the links out of them.
//
// Features:
// - Recursive discovery of *.md / *.markdown files
// - Pruning of version-control and dependency directories
// - Per-file failures are logged and skipped, never fatal
// =============================================================================

mod walk;

pub use walk::{collect_links, find_markdown_files};
