//! Secondary summary/difficulty lookup built from external datasets.
//!
//! Datasets are scanned once, in load order. An entry matches when its name
//! equals the query case-insensitively or on the [`normalize_name`] form, so
//! `Lock-2` answers a lookup for `lock 2`. The first matching entry wins.

use serde::{Deserialize, Serialize};

/// One record of a fallback dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackEntry {
    pub name: String,
    pub difficulty: String,
    pub summary: String,
}

impl FallbackEntry {
    pub fn new(
        name: impl Into<String>,
        difficulty: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            difficulty: difficulty.into(),
            summary: summary.into(),
        }
    }
}

/// Case-fold and drop everything that is not a letter or digit.
///
/// `"Re: Lock_2"` → `"relock2"`.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Precomputed comparison forms of a name.
#[derive(Debug, Clone)]
struct NameKey {
    folded: String,
    compact: String,
}

impl NameKey {
    fn new(name: &str) -> Self {
        Self {
            folded: name.to_lowercase(),
            compact: normalize_name(name),
        }
    }
}

type NameMatcher = fn(&NameKey, &NameKey) -> bool;

fn exact(entry: &NameKey, query: &NameKey) -> bool {
    entry.folded == query.folded
}

fn fuzzy(entry: &NameKey, query: &NameKey) -> bool {
    entry.compact == query.compact
}

/// Ways a name may match; any one is enough.
const MATCHERS: [NameMatcher; 2] = [exact, fuzzy];

/// Read-only lookup shared by every document of a run.
#[derive(Debug, Clone, Default)]
pub struct FallbackIndex {
    entries: Vec<(NameKey, FallbackEntry)>,
}

impl FallbackIndex {
    /// Merge datasets in order. Duplicate names are kept; the first one wins
    /// at lookup time.
    pub fn build<I, D>(datasets: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = FallbackEntry>,
    {
        let entries = datasets
            .into_iter()
            .flatten()
            .map(|entry| (NameKey::new(&entry.name), entry))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry matching `name`, if any.
    pub fn find(&self, name: &str) -> Option<&FallbackEntry> {
        let query = NameKey::new(name);
        self.entries
            .iter()
            .find(|(key, _)| MATCHERS.iter().any(|matches| matches(key, &query)))
            .map(|(_, entry)| entry)
    }

    /// Summary of the matching entry (possibly empty).
    pub fn lookup_summary(&self, name: &str) -> Option<&str> {
        self.find(name).map(|entry| entry.summary.as_str())
    }

    /// Difficulty of the matching entry (possibly empty).
    pub fn lookup_difficulty(&self, name: &str) -> Option<&str> {
        self.find(name).map(|entry| entry.difficulty.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> FallbackIndex {
        FallbackIndex::build([
            vec![
                FallbackEntry::new("Lock-2", "Medium", "Gitea token → CI runner."),
                FallbackEntry::new("Sauna", "Easy", "ASREP roast → DCSync."),
            ],
            vec![FallbackEntry::new("sauna", "Hard", "duplicate, never seen")],
        ])
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Re: Lock_2"), "relock2");
        assert_eq!(normalize_name("  "), "");
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        assert_eq!(index().lookup_difficulty("SAUNA"), Some("Easy"));
    }

    #[test]
    fn test_normalized_match() {
        let index = index();
        assert_eq!(index.lookup_summary("lock 2"), Some("Gitea token → CI runner."));
        assert_eq!(index.lookup_difficulty("lock_2"), Some("Medium"));
    }

    #[test]
    fn test_first_match_in_load_order_wins() {
        let index = FallbackIndex::build([vec![
            FallbackEntry::new("Lock-2", "Medium", "first"),
            FallbackEntry::new("lock 2", "Hard", "second"),
        ]]);
        assert_eq!(index.lookup_summary("Lock 2"), Some("first"));
        assert_eq!(index.lookup_difficulty("lock 2"), Some("Medium"));
    }

    #[test]
    fn test_no_match() {
        let index = index();
        assert_eq!(index.lookup_summary("Forest"), None);
        assert!(FallbackIndex::default().lookup_difficulty("Sauna").is_none());
    }

    #[test]
    fn test_matched_entry_with_empty_field() {
        let index = FallbackIndex::build([vec![FallbackEntry::new("Blue", "Easy", "")]]);
        assert_eq!(index.lookup_summary("blue"), Some(""));
    }

    #[test]
    fn test_build_keeps_load_order() {
        assert_eq!(index().len(), 3);
    }
}
