//! Loose key/value extraction from writeup READMEs.
//!
//! READMEs accumulated several authoring styles over the years:
//!
//! ```text
//! ---                     **Status:** 🔒 Private      Status: Retired
//! difficulty: Easy        **Difficulty:** Easy        Difficulty: Easy
//! ---
//! ```
//!
//! Front matter wins unconditionally. Every canonical key that is still
//! missing afterwards is looked up through its ordered list of patterns,
//! decorated (`**Key:**`) before plain (`Key:` at line start).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Keys the pattern pass knows how to find.
pub const CANONICAL_KEYS: [&str; 5] = ["status", "difficulty", "platform", "os", "category"];

/// Front matter block at the very start of a document.
static FRONT_MATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\s*\n(.*?)\n---").unwrap());

/// Front matter including its closing line, for body stripping.
static FRONT_MATTER_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\s*\n.*?\n---\s*\n").unwrap());

/// Ordered extraction strategies per canonical key.
///
/// `os` accepts a `Platform:` label as well, since older writeups used it
/// for the operating system.
static STRATEGIES: LazyLock<Vec<KeyStrategies>> = LazyLock::new(|| {
    [
        ("status", "Status"),
        ("difficulty", "Difficulty"),
        ("platform", "Platform"),
        ("os", "(?:OS|Platform)"),
        ("category", "Category"),
    ]
    .into_iter()
    .map(|(key, label)| KeyStrategies {
        key,
        patterns: vec![
            KeyPattern::decorated(label),
            KeyPattern::plain(label),
        ],
    })
    .collect()
});

// ============================================================================
// AttributeMap
// ============================================================================

/// Lowercase key → raw string value for one document.
///
/// A key is present at most once; later lookups for a populated key are
/// skipped entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap(BTreeMap<String, String>);

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Raw value, or `""` when the key was never found.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, key: String, value: String) {
        self.0.insert(key, value);
    }
}

// ============================================================================
// Strategies
// ============================================================================

/// One way of spotting a key in free text. Capture group 1 is the value.
struct KeyPattern(Regex);

impl KeyPattern {
    /// `**Key:** value` anywhere in the text.
    fn decorated(label: &str) -> Self {
        Self(Regex::new(&format!(r"(?im)\*\*{label}:\*\*\s*(.+)")).unwrap())
    }

    /// `Key: value` at the start of a line.
    fn plain(label: &str) -> Self {
        Self(Regex::new(&format!(r"(?im)^{label}:\s*(.+)")).unwrap())
    }

    fn find(&self, text: &str) -> Option<String> {
        self.0
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

struct KeyStrategies {
    key: &'static str,
    patterns: Vec<KeyPattern>,
}

impl KeyStrategies {
    /// First pattern that matches anywhere wins.
    fn resolve(&self, text: &str) -> Option<String> {
        self.patterns.iter().find_map(|pattern| pattern.find(text))
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Extract every attribute the document declares.
///
/// Never fails: unknown layouts simply yield fewer keys, and an empty
/// document yields an empty map.
pub fn extract(text: &str) -> AttributeMap {
    let mut map = front_matter_attributes(text);

    for strategy in STRATEGIES.iter() {
        if map.contains(strategy.key) {
            continue;
        }
        if let Some(value) = strategy.resolve(text) {
            map.insert(strategy.key.to_string(), value);
        }
    }

    map
}

/// Parse `key: value` lines of a leading front matter block.
///
/// Keys are lowercased and values lose surrounding quotes. Every key is
/// kept, not only the canonical ones.
fn front_matter_attributes(text: &str) -> AttributeMap {
    let mut map = AttributeMap::new();

    let Some(body) = FRONT_MATTER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return map;
    };

    for line in body.lines() {
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            map.insert(key.trim().to_lowercase(), value.to_string());
        }
    }

    map
}

/// Document body with any leading front matter removed.
pub fn strip_front_matter(text: &str) -> &str {
    match FRONT_MATTER_BLOCK.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_decorated_lines() {
        let text = "# Lame\n\n**Status:** ✅ Pwned\n**Difficulty:** Easy\n**OS:** Linux\n";
        let map = extract(text);
        assert_eq!(map.get("status"), Some("✅ Pwned"));
        assert_eq!(map.get("difficulty"), Some("Easy"));
        assert_eq!(map.get("os"), Some("Linux"));
        assert_eq!(map.get("platform"), None);
    }

    #[test]
    fn test_plain_lines() {
        let text = "Status: Retired\ndifficulty: Medium\nCategory: Web, AD\n";
        let map = extract(text);
        assert_eq!(map.get("status"), Some("Retired"));
        assert_eq!(map.get("difficulty"), Some("Medium"));
        assert_eq!(map.get("category"), Some("Web, AD"));
    }

    #[test]
    fn test_plain_requires_line_start() {
        let map = extract("The Difficulty: was brutal");
        assert_eq!(map.get("difficulty"), None);
    }

    #[test]
    fn test_decorated_beats_plain() {
        let text = "Difficulty: Hard\n**Difficulty:** Easy\n";
        assert_eq!(extract(text).get("difficulty"), Some("Easy"));
    }

    #[test]
    fn test_front_matter_wins() {
        let text = "---\ndifficulty: \"Insane\"\nName: 'Sauna'\n---\n**Difficulty:** Easy\n";
        let map = extract(text);
        assert_eq!(map.get("difficulty"), Some("Insane"));
        assert_eq!(map.get("name"), Some("Sauna"));
    }

    #[test]
    fn test_platform_label_fills_os() {
        let map = extract("**Platform:** Windows\n");
        assert_eq!(map.get("platform"), Some("Windows"));
        assert_eq!(map.get("os"), Some("Windows"));
    }

    #[test]
    fn test_case_insensitive_labels() {
        let map = extract("**STATUS:** ⏳ In progress\n");
        assert_eq!(map.get("status"), Some("⏳ In progress"));
    }

    #[test]
    fn test_strip_front_matter() {
        let text = "---\nlayout: x\n---\n# Body\n";
        assert_eq!(strip_front_matter(text), "# Body\n");
        assert_eq!(strip_front_matter("# Body"), "# Body");
    }
}
