// src/checker/classify.rs
// =============================================================================
// Maps a raw URL to the kind of link it is.
//
// Pure prefix tests, first match wins:
//   1. http(s) + contains "github.com"  -> Github
//   2. http(s)                          -> External
//   3. "#"                              -> Anchor
//   4. "/"                              -> Absolute
//   5. "./" or "../"                    -> Relative
//   6. anything else                    -> Other
// =============================================================================

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkCategory {
    Absolute,
    Anchor,
    External,
    Github,
    Other,
    Relative,
}

impl LinkCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkCategory::Absolute => "absolute",
            LinkCategory::Anchor => "anchor",
            LinkCategory::External => "external",
            LinkCategory::Github => "github",
            LinkCategory::Other => "other",
            LinkCategory::Relative => "relative",
        }
    }
}

impl fmt::Display for LinkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a raw URL. Total: every string gets exactly one category.
pub fn classify(url: &str) -> LinkCategory {
    if url.starts_with("http://") || url.starts_with("https://") {
        if url.contains("github.com") {
            LinkCategory::Github
        } else {
            LinkCategory::External
        }
    } else if url.starts_with('#') {
        LinkCategory::Anchor
    } else if url.starts_with('/') {
        LinkCategory::Absolute
    } else if url.starts_with("./") || url.starts_with("../") {
        LinkCategory::Relative
    } else {
        LinkCategory::Other
    }
}
