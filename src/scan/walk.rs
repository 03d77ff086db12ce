// src/scan/walk.rs
// =============================================================================
// Walks the documentation tree and extracts links file by file.
//
// How it works:
// 1. walkdir visits the tree in file-name order (stable output)
// 2. Excluded directories are pruned before we descend into them
// 3. Each markdown file is read and handed to the link extractor
// 4. A file we cannot read contributes zero links and a warning
// =============================================================================

use crate::checker::{extract_markdown_links, LinkOccurrence};
use crate::config::ScanOptions;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

// Finds every markdown file under the scan root
//
// Returns: paths in a deterministic (file-name sorted) order
//
// Errors only if the root itself cannot be read; anything deeper is
// logged and skipped.
pub fn find_markdown_files(options: &ScanOptions) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(&options.root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, options));

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() && is_markdown(entry.path()) => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(e) if e.depth() == 0 => {
                return Err(e).with_context(|| {
                    format!("Failed to read directory {}", options.root.display())
                });
            }
            Err(e) => warn!(error = %e, "skipping unreadable path"),
        }
    }

    Ok(files)
}

// Reads every file and concatenates their links in file order
pub fn collect_links(root: &Path, files: &[PathBuf]) -> Vec<LinkOccurrence> {
    files.iter().flat_map(|file| read_links(root, file)).collect()
}

// Reads one file and extracts its links
//
// A missing file, a permission error or invalid UTF-8 all end up here as
// an empty list plus a warning.
pub fn read_links(root: &Path, file: &Path) -> Vec<LinkOccurrence> {
    let relative = relative_path(root, file);
    match fs::read_to_string(file) {
        Ok(content) => extract_markdown_links(&content, &relative).collect(),
        Err(e) => {
            warn!(file = %relative, error = %e, "error reading file");
            Vec::new()
        }
    }
}

// The root itself is never pruned, even if it is called "node_modules"
fn is_excluded(entry: &DirEntry, options: &ScanOptions) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| options.is_excluded_dir(name))
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

fn relative_path(root: &Path, file: &Path) -> String {
    file.strip_prefix(root).unwrap_or(file).display().to_string()
}
