//! `## Heading` section extraction.

use std::sync::LazyLock;

use regex::Regex;

/// `## Summary`, optionally decorated with a memo glyph.
static SUMMARY_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)##\s*(?:📝\s*)?Summary[ \t]*\n").unwrap());

/// Any `##` heading line mentioning "Teaser".
static TEASER_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)##\s*[^\n]*Teaser[^\n]*\n").unwrap());

/// Start of the next `##` heading line.
static NEXT_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^##").unwrap());

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\n\s*").unwrap());

/// `*em*` / `**strong**` spans.
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*+([^*]+)\*+").unwrap());

/// Body of the section introduced by `heading`, up to the next `##` line.
fn section_body<'a>(text: &'a str, heading: &Regex) -> &'a str {
    let Some(m) = heading.find(text) else {
        return "";
    };
    let rest = &text[m.end()..];
    let end = NEXT_HEADING.find(rest).map_or(rest.len(), |m| m.start());
    rest[..end].trim()
}

/// Extract the section whose `##` heading mentions `name`.
///
/// The heading may carry decoration around the name (`## 🧩 Teaser (spoiler-free)`).
/// Returns an empty string when there is no such section.
pub fn extract_section(text: &str, name: &str) -> String {
    let pattern = format!(r"(?i)##\s*[^\n]*{}[^\n]*\n", regex::escape(name));
    match Regex::new(&pattern) {
        Ok(heading) => section_body(text, &heading).to_string(),
        Err(_) => String::new(),
    }
}

/// First paragraph of `## Summary` as a single plain line.
pub fn extract_summary(text: &str) -> String {
    let content = section_body(text, &SUMMARY_HEADING);
    let first = content.split("\n\n").next().unwrap_or_default().trim();
    let joined = LINE_BREAK.replace_all(first, " ");
    EMPHASIS.replace_all(&joined, "$1").trim().to_string()
}

/// `## Teaser` section verbatim.
pub fn extract_teaser(text: &str) -> String {
    section_body(text, &TEASER_HEADING).to_string()
}
