//! Canonical forms for difficulty, operating system and tags.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Trailing decoration after the actual difficulty (`Easy | Linux`, `Hard  **AD**`).
static DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[|·\-–\\]|\s{2,}|\*\*").unwrap());

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

// ============================================================================
// Difficulty
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Insane,
    Varied,
    Unknown,
    /// Unrecognized token, title-cased.
    Other(String),
}

impl Difficulty {
    /// Map a single token through the synonym table.
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "" | "unknown" => Self::Unknown,
            "easy" | "basic" => Self::Easy,
            "medium" => Self::Medium,
            "hard" | "medium-hard" => Self::Hard,
            "insane" => Self::Insane,
            "varied" | "season" => Self::Varied,
            _ => Self::Other(title_case(token)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Insane => "Insane",
            Self::Varied => "Varied",
            Self::Unknown => "Unknown",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Reduce a raw difficulty value to one canonical token.
///
/// `fallback` is consulted only when nothing usable survives cleanup
/// (empty or literally "unknown"), and is mapped without cleanup so that
/// dataset values like `medium-hard` keep their meaning.
pub fn normalize_difficulty(raw: &str, fallback: Option<&str>) -> Difficulty {
    let head = DECORATION.split(raw.trim()).next().unwrap_or_default().trim();
    let cleaned = NON_WORD.replace_all(head, "");
    let token = cleaned.split_whitespace().next().unwrap_or_default();

    let missing = token.is_empty() || token.eq_ignore_ascii_case("unknown");
    match fallback {
        Some(fallback) if missing => Difficulty::from_token(fallback),
        _ => Difficulty::from_token(token),
    }
}

// ============================================================================
// Operating system
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Os {
    Linux,
    Windows,
    /// Anything else, punctuation stripped.
    Other(String),
}

impl Os {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Linux => "Linux",
            Self::Windows => "Windows",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Os {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// `None` when nothing is left after dropping emoji and punctuation.
pub fn normalize_os(raw: &str) -> Option<Os> {
    let cleaned = NON_WORD.replace_all(raw.trim(), "");
    let cleaned = cleaned.trim();
    match cleaned.to_lowercase().as_str() {
        "" => None,
        "linux" | "unix" | "freebsd" => Some(Os::Linux),
        "windows" => Some(Os::Windows),
        _ => Some(Os::Other(cleaned.to_string())),
    }
}

// ============================================================================
// Tags
// ============================================================================

/// Split a category line on `|`, `,` or `;`, keeping order.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    raw.split(['|', ',', ';'])
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Uppercase the first letter of every word, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_decoration() {
        for raw in [
            "Easy | Linux",
            "Easy · 20 pts",
            "Easy - retired",
            "Easy – retired",
            "Easy\\",
            "Easy  (first blood)",
            "Easy**",
            "🟢 Easy",
            "Easy Linux",
        ] {
            assert_eq!(normalize_difficulty(raw, None), Difficulty::Easy, "{raw}");
        }
        assert_eq!(normalize_difficulty("Hard — AD", None), Difficulty::Hard);
    }

    #[test]
    fn test_synonyms() {
        assert_eq!(normalize_difficulty("basic", None), Difficulty::Easy);
        assert_eq!(normalize_difficulty("SEASON", None), Difficulty::Varied);
        assert_eq!(normalize_difficulty("insane", None), Difficulty::Insane);
    }

    #[test]
    fn test_unrecognized_is_title_cased() {
        let diff = normalize_difficulty("nightmare", None);
        assert_eq!(diff, Difficulty::Other("Nightmare".to_string()));
        assert_eq!(diff.to_string(), "Nightmare");
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(normalize_difficulty("", None), Difficulty::Unknown);
        assert_eq!(normalize_difficulty("❓", None), Difficulty::Unknown);
        assert_eq!(normalize_difficulty("unknown", None).as_str(), "Unknown");
    }

    #[test]
    fn test_fallback_only_when_missing() {
        assert_eq!(normalize_difficulty("", Some("medium-hard")), Difficulty::Hard);
        assert_eq!(normalize_difficulty("Unknown", Some("Insane")), Difficulty::Insane);
        assert_eq!(normalize_difficulty("Easy", Some("Insane")), Difficulty::Easy);
        assert_eq!(normalize_difficulty("", Some("")), Difficulty::Unknown);
    }

    #[test]
    fn test_os() {
        assert_eq!(normalize_os("🐧 Linux"), Some(Os::Linux));
        assert_eq!(normalize_os("FreeBSD"), Some(Os::Linux));
        assert_eq!(normalize_os("unix"), Some(Os::Linux));
        assert_eq!(normalize_os("WINDOWS"), Some(Os::Windows));
        assert_eq!(normalize_os("Android!"), Some(Os::Other("Android".into())));
        assert_eq!(normalize_os("  "), None);
        assert_eq!(normalize_os("🪟"), None);
    }

    #[test]
    fn test_tags() {
        assert_eq!(normalize_tags("Web | AD; Kerberos,, "), vec!["Web", "AD", "Kerberos"]);
        assert!(normalize_tags("").is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hELLO wORLD"), "Hello World");
        assert_eq!(title_case("x2y"), "X2Y");
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"Hard\"");
    }
}
