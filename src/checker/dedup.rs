// src/checker/dedup.rs
// =============================================================================
// Groups link occurrences by URL so each URL is checked exactly once.
//
// Groups keep first-discovery order, and each group keeps its occurrences
// in encounter order; the report relies on both when it truncates the list
// of affected files.
//
// How URLs are compared is a policy (NormalizePolicy). The default is exact
// string identity: "/a" and "/a/" are different URLs.
// =============================================================================

use super::markdown::LinkOccurrence;
use std::collections::{HashMap, HashSet};
use url::Url;

/// How two raw URLs are decided to be "the same" URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizePolicy {
    /// The raw string is the key.
    #[default]
    Exact,
    /// Scheme and host are lowercased and one trailing slash is dropped.
    /// Paths, queries and fragments stay case-sensitive.
    Loose,
}

impl NormalizePolicy {
    /// Returns the deduplication key for a raw URL.
    pub fn key(self, raw: &str) -> String {
        match self {
            NormalizePolicy::Exact => raw.to_string(),
            NormalizePolicy::Loose => match Url::parse(raw) {
                // Url::parse lowercases scheme and host for us
                Ok(mut parsed) if parsed.has_host() => {
                    if parsed.query().is_none() && parsed.fragment().is_none() {
                        if let Some(trimmed) = trim_trailing_slash(parsed.path()) {
                            let trimmed = trimmed.to_string();
                            parsed.set_path(&trimmed);
                        }
                    }
                    parsed.to_string()
                }
                // Site-relative links have no host; only a bare path is touched
                _ if raw.contains(['?', '#']) => raw.to_string(),
                _ => trim_trailing_slash(raw).unwrap_or(raw).to_string(),
            },
        }
    }
}

// "/a/" -> "/a". The root "/" and "//"-style endings are left alone.
fn trim_trailing_slash(path: &str) -> Option<&str> {
    path.strip_suffix('/')
        .filter(|trimmed| !trimmed.is_empty() && !trimmed.ends_with('/'))
}

/// Every occurrence of one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlGroup {
    /// Deduplication key (equal to `url` under the exact policy)
    pub key: String,
    /// Raw URL of the first occurrence; this is what gets requested
    pub url: String,
    occurrences: Vec<LinkOccurrence>,
}

impl UrlGroup {
    fn new(key: String, first: LinkOccurrence) -> Self {
        Self {
            key,
            url: first.url.clone(),
            occurrences: vec![first],
        }
    }

    /// Number of occurrences, always at least 1.
    pub fn count(&self) -> usize {
        self.occurrences.len()
    }

    /// Distinct source files, in the order they were first seen.
    pub fn files(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.occurrences
            .iter()
            .filter(|occurrence| seen.insert(occurrence.file.as_str()))
            .map(|occurrence| occurrence.file.clone())
            .collect()
    }
}

/// Unique URLs of one stage, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct DedupedLinks {
    groups: Vec<UrlGroup>,
    // key -> position in `groups`
    index: HashMap<String, usize>,
}

impl DedupedLinks {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[UrlGroup] {
        &self.groups
    }

    /// The URLs to submit to the checker, one per group.
    pub fn urls(&self) -> Vec<String> {
        self.groups.iter().map(|group| group.url.clone()).collect()
    }

    fn push(&mut self, policy: NormalizePolicy, occurrence: LinkOccurrence) {
        let key = policy.key(&occurrence.url);
        match self.index.get(&key) {
            Some(&position) => self.groups[position].occurrences.push(occurrence),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push(UrlGroup::new(key, occurrence));
            }
        }
    }
}

/// Folds occurrences into one group per unique URL.
pub fn dedup_links<I>(occurrences: I, policy: NormalizePolicy) -> DedupedLinks
where
    I: IntoIterator<Item = LinkOccurrence>,
{
    let mut deduped = DedupedLinks::default();
    for occurrence in occurrences {
        deduped.push(policy, occurrence);
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(url: &str, file: &str) -> LinkOccurrence {
        LinkOccurrence {
            text: "t".to_string(),
            url: url.to_string(),
            file: file.to_string(),
        }
    }

    #[test]
    fn test_same_url_across_files() {
        let deduped = dedup_links(
            vec![
                occ("/a", "one.md"),
                occ("/a", "two.md"),
                occ("/a", "one.md"),
                occ("/a", "three.md"),
            ],
            NormalizePolicy::Exact,
        );
        assert_eq!(deduped.len(), 1);
        let group = &deduped.groups()[0];
        assert_eq!(group.key, "/a");
        assert_eq!(group.count(), 4);
        assert_eq!(group.files(), vec!["one.md", "two.md", "three.md"]);
    }

    #[test]
    fn test_discovery_order_is_kept() {
        let deduped = dedup_links(
            vec![occ("/b", "x.md"), occ("/a", "x.md"), occ("/b", "y.md"), occ("/c", "x.md")],
            NormalizePolicy::Exact,
        );
        assert_eq!(deduped.urls(), vec!["/b", "/a", "/c"]);
    }

    #[test]
    fn test_exact_policy_keeps_variants_apart() {
        let deduped = dedup_links(
            vec![
                occ("/guide", "x.md"),
                occ("/guide/", "x.md"),
                occ("/Guide", "x.md"),
            ],
            NormalizePolicy::Exact,
        );
        assert_eq!(deduped.len(), 3);
    }

    #[test]
    fn test_loose_policy_merges_variants() {
        let deduped = dedup_links(
            vec![
                occ("https://GitHub.com/x/y/", "a.md"),
                occ("https://github.com/x/y", "b.md"),
                occ("/guide/", "c.md"),
                occ("/guide", "d.md"),
            ],
            NormalizePolicy::Loose,
        );
        assert_eq!(deduped.len(), 2);

        let github = &deduped.groups()[0];
        assert_eq!(github.key, "https://github.com/x/y");
        // The first raw spelling is what gets requested
        assert_eq!(github.url, "https://GitHub.com/x/y/");
        assert_eq!(github.count(), 2);

        let guide = &deduped.groups()[1];
        assert_eq!(guide.key, "/guide");
        assert_eq!(guide.files(), vec!["c.md", "d.md"]);
    }

    #[test]
    fn test_loose_policy_keeps_path_case_and_root_slash() {
        assert_eq!(NormalizePolicy::Loose.key("/A/b"), "/A/b");
        assert_eq!(NormalizePolicy::Loose.key("/"), "/");
        assert_eq!(NormalizePolicy::Loose.key("HTTP://Example.COM"), "http://example.com/");
        assert_eq!(NormalizePolicy::Loose.key("https://example.com/"), "https://example.com/");
    }

    #[test]
    fn test_loose_policy_only_trims_the_path() {
        let loose = NormalizePolicy::Loose;
        assert_ne!(
            loose.key("https://example.com/search?path=/"),
            loose.key("https://example.com/search?path=")
        );
        // Hash routes: "#/" and "#" are different pages of a docs site
        assert_ne!(loose.key("https://example.com/#/"), loose.key("https://example.com/#"));
        assert_ne!(loose.key("/guide?next=/"), loose.key("/guide?next="));
        assert_ne!(loose.key("/docs#/"), loose.key("/docs#"));

        assert_eq!(loose.key("https://example.com/a/b/"), "https://example.com/a/b");
        assert_eq!(loose.key("https://example.com/a/?q=1"), "https://example.com/a/?q=1");
    }

    #[test]
    fn test_files_with_many_repeats() {
        let occurrences = (0..1000).map(|i| occ("/hot", &format!("f{}.md", i % 4)));
        let deduped = dedup_links(occurrences, NormalizePolicy::Exact);
        let group = &deduped.groups()[0];
        assert_eq!(group.count(), 1000);
        assert_eq!(group.files(), vec!["f0.md", "f1.md", "f2.md", "f3.md"]);
    }

    #[test]
    fn test_empty_input() {
        let deduped = dedup_links(Vec::new(), NormalizePolicy::Exact);
        assert!(deduped.is_empty());
        assert!(deduped.urls().is_empty());
    }
}
