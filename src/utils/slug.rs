//! URL slugs for writeup names.

use std::sync::LazyLock;

use regex::Regex;

static UNSAFE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_]+").unwrap());
static DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Lowercase, drop punctuation, join words with single dashes.
///
/// `"Re: Lock"` and `"re lock"` both become `"re-lock"`.
pub fn slugify(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let kept = UNSAFE.replace_all(&lower, "");
    let dashed = SEPARATORS.replace_all(&kept, "-");
    let collapsed = DASHES.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}
