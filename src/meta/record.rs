//! Canonical per-writeup record and its front matter.

use std::fmt::Write as _;

use serde::Serialize;

use super::RawDocument;
use super::attrs::{self, AttributeMap};
use super::fallback::FallbackIndex;
use super::normalize::{Difficulty, Os, normalize_difficulty, normalize_os, normalize_tags};
use super::section::extract_teaser;
use super::summary;
use crate::utils::date::DateTimeUtc;
use crate::utils::slug::slugify;

const LOCK: char = '🔒';
const HOURGLASS: char = '⏳';

/// Body shown instead of a redacted writeup.
const SPOILER_NOTICE: &str =
    "\n> 🔒 **Spoiler Policy** — Full writeup published on machine retirement.\n\n";

/// Rendering knobs supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOptions {
    /// `layout:` value of the emitted front matter.
    pub layout: String,
    /// URL prefix for permalinks, e.g. `/writeups`.
    pub permalink_prefix: String,
    /// Categories whose private writeups are redacted.
    pub redact: Vec<String>,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            layout: "writeup".to_string(),
            permalink_prefix: "/writeups".to_string(),
            redact: vec!["active".to_string()],
        }
    }
}

/// Final normalized attributes of one writeup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeRecord {
    pub name: String,
    pub difficulty: Difficulty,
    pub os: Option<Os>,
    pub tags: Vec<String>,
    pub platform: String,
    pub category: String,
    pub pwned: bool,
    pub private: bool,
    pub summary: String,
    pub date: String,
    pub slug: String,
    pub url: String,
}

/// Everything the output writer needs for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Writeup {
    pub record: AttributeRecord,
    pub front_matter: String,
    /// Replacement body when the redaction policy applies.
    pub redacted_body: Option<String>,
}

impl Writeup {
    pub fn is_redacted(&self) -> bool {
        self.redacted_body.is_some()
    }

    /// Body to publish: the redaction payload, or the source minus its front matter.
    pub fn body<'a>(&'a self, source: &'a str) -> &'a str {
        match &self.redacted_body {
            Some(body) => body,
            None => attrs::strip_front_matter(source),
        }
    }

    /// Front matter followed by the publishable body.
    pub fn render_page(&self, source: &str) -> String {
        let body = self.body(source);
        let mut page = String::with_capacity(self.front_matter.len() + body.len());
        page.push_str(&self.front_matter);
        page.push_str(body);
        page
    }
}

/// Private when the status carries a lock or says "private".
pub fn is_private(status: &str) -> bool {
    status.contains(LOCK) || status.to_lowercase().contains("private")
}

/// Solved unless the status carries an hourglass.
pub fn is_pwned(status: &str) -> bool {
    !status.contains(HOURGLASS)
}

/// Builds [`Writeup`]s against one shared fallback index.
#[derive(Debug, Clone, Copy)]
pub struct RecordBuilder<'a> {
    index: &'a FallbackIndex,
    options: &'a RecordOptions,
}

impl<'a> RecordBuilder<'a> {
    pub const fn new(index: &'a FallbackIndex, options: &'a RecordOptions) -> Self {
        Self { index, options }
    }

    /// Resolve one document filed under `category` on `platform`.
    pub fn build(&self, doc: &RawDocument, category: &str, platform: &str) -> Writeup {
        let attrs = attrs::extract(&doc.text);
        let record = self.record(doc, &attrs, category, platform);
        let front_matter = render_front_matter(&record, &self.options.layout);

        let redact = record.private && self.options.redact.iter().any(|c| c == category);
        let redacted_body = redact.then(|| spoiler_body(&extract_teaser(&doc.text)));

        Writeup {
            record,
            front_matter,
            redacted_body,
        }
    }

    fn record(
        &self,
        doc: &RawDocument,
        attrs: &AttributeMap,
        category: &str,
        platform: &str,
    ) -> AttributeRecord {
        let status = attrs.value("status");
        let private = is_private(status);
        let slug = slugify(&doc.name);
        let prefix = self.options.permalink_prefix.trim_end_matches('/');
        let os_raw = attrs.get("os").or_else(|| attrs.get("platform")).unwrap_or("");

        AttributeRecord {
            name: doc.name.clone(),
            difficulty: normalize_difficulty(
                attrs.value("difficulty"),
                self.index.lookup_difficulty(&doc.name),
            ),
            os: normalize_os(os_raw),
            tags: normalize_tags(attrs.value("category")),
            platform: platform.to_string(),
            category: category.to_string(),
            pwned: is_pwned(status),
            private,
            summary: summary::resolve(&doc.text, &doc.name, private, self.index),
            date: DateTimeUtc::from_system_time(doc.modified).to_ymd(),
            url: format!("{prefix}/{category}/{slug}/"),
            slug,
        }
    }
}

/// Spoiler notice, plus the teaser when there is one.
fn spoiler_body(teaser: &str) -> String {
    let mut body = SPOILER_NOTICE.to_string();
    if !teaser.is_empty() {
        let _ = writeln!(body, "## Teaser\n\n{teaser}");
    }
    body
}

/// Double-quoted YAML scalar.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Front matter with a fixed key order. Optional keys are left out
/// entirely when empty.
pub fn render_front_matter(record: &AttributeRecord, layout: &str) -> String {
    let mut fm = String::from("---\n");
    let _ = writeln!(fm, "layout: {layout}");
    let _ = writeln!(fm, "name: {}", quoted(&record.name));
    let _ = writeln!(fm, "platform: {}", quoted(&record.platform));
    let _ = writeln!(fm, "category: {}", quoted(&record.category));
    let _ = writeln!(fm, "difficulty: {}", quoted(record.difficulty.as_str()));
    let _ = writeln!(fm, "permalink: {}", record.url);
    if let Some(os) = &record.os {
        let _ = writeln!(fm, "os: {}", quoted(os.as_str()));
    }
    if !record.tags.is_empty() {
        let _ = writeln!(fm, "tags: [{}]", record.tags.join(", "));
    }
    if !record.date.is_empty() {
        let _ = writeln!(fm, "date: {}", record.date);
    }
    if record.pwned {
        fm.push_str("pwned: true\n");
    }
    fm.push_str("---\n");
    fm
}
