// src/checker/markdown.rs
// =============================================================================
// This module extracts links from Markdown text.
//
// We deliberately do NOT parse markdown here. A single regex finds every
// inline "[text](url)" span, wherever it appears (code blocks included).
// Images, reference-style links and HTML anchors are not recognised.
//
// Rust concepts:
// - Iterators: extraction is lazy, matches are produced on demand
// - Lifetimes: the iterator borrows the text it scans
// - LazyLock: the regex is compiled once, on first use
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

// [display text](url): no ']' inside the text, no ')' inside the url.
static INLINE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("inline link pattern is valid"));

/// One textual appearance of a link in one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence {
    /// The bracketed display text
    pub text: String,
    /// The raw, unnormalized URL from the parentheses
    pub url: String,
    /// Path of the file relative to the scan root
    pub file: String,
}

// Extracts every inline link from markdown text
//
// Parameters:
//   markdown: the text to scan (borrowed)
//   file: relative path attached to every occurrence
//
// Returns: a lazy iterator of LinkOccurrence
//
// Example input:
//   "See [Home](/guide/intro)"
// Example output:
//   LinkOccurrence { text: "Home", url: "/guide/intro", file }
pub fn extract_markdown_links<'a>(
    markdown: &'a str,
    file: &'a str,
) -> impl Iterator<Item = LinkOccurrence> + 'a {
    INLINE_LINK.captures_iter(markdown).map(move |caps| LinkOccurrence {
        text: caps[1].to_string(),
        url: caps[2].to_string(),
        file: file.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(markdown: &str) -> Vec<String> {
        extract_markdown_links(markdown, "README.md")
            .map(|link| link.url)
            .collect()
    }

    #[test]
    fn test_extract_simple_link() {
        let links: Vec<_> = extract_markdown_links("Check out [Rust](https://www.rust-lang.org)!", "a.md").collect();
        assert_eq!(
            links,
            vec![LinkOccurrence {
                text: "Rust".to_string(),
                url: "https://www.rust-lang.org".to_string(),
                file: "a.md".to_string(),
            }]
        );
    }

    #[test]
    fn test_extract_multiple_links_in_order() {
        let markdown = r#"
# Resources

- [Home](/guide/intro)
- [Repo](https://github.com/x/y)
- [Next](../x.md) and [Top](#top)
        "#;
        assert_eq!(
            urls(markdown),
            vec!["/guide/intro", "https://github.com/x/y", "../x.md", "#top"]
        );
    }

    #[test]
    fn test_keeps_relative_and_mailto_links() {
        // Unlike a renderer we keep everything; classification decides later
        assert_eq!(
            urls("[docs](./docs/README.md) [mail](mailto:a@b.c)"),
            vec!["./docs/README.md", "mailto:a@b.c"]
        );
    }

    #[test]
    fn test_no_brackets_no_links() {
        assert!(urls("plain text with (parens) and no links").is_empty());
        assert!(urls("").is_empty());
    }

    #[test]
    fn test_malformed_spans_do_not_match() {
        assert!(urls("[text] (space/between)").is_empty());
        assert!(urls("[](empty-text)").is_empty());
        assert!(urls("[text]()").is_empty());
        assert!(urls("[unclosed](/never").is_empty());
    }

    #[test]
    fn test_url_stops_at_first_closing_paren() {
        assert_eq!(urls("[wiki](https://e.org/A_(b))"), vec!["https://e.org/A_(b"]);
    }

    #[test]
    fn test_image_inner_link_is_matched() {
        // The "!" is outside the pattern, so images still yield their target
        assert_eq!(urls("![logo](img/logo.png)"), vec!["img/logo.png"]);
    }
}
