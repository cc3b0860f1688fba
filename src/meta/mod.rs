//! Writeup metadata resolution.
//!
//! Turns one raw README plus the shared [`FallbackIndex`] into one canonical
//! [`AttributeRecord`]:
//!
//! ```text
//! RawDocument ─┬─ attrs::extract ──────────┐
//!              ├─ section (Summary/Teaser) ├─ RecordBuilder ─→ Writeup
//! FallbackIndex┴─ summary::resolve ────────┘        (record + front matter + redaction)
//! ```
//!
//! Nothing in here touches the filesystem and nothing fails: missing data
//! degrades to empty or `Unknown` values.

pub mod attrs;
pub mod fallback;
pub mod normalize;
pub mod record;
pub mod section;
pub mod summary;

use std::time::SystemTime;

pub use attrs::AttributeMap;
pub use fallback::{FallbackEntry, FallbackIndex, normalize_name};
pub use normalize::{Difficulty, Os};
pub use record::{AttributeRecord, RecordBuilder, RecordOptions, Writeup};

/// One writeup as handed over by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub name: String,
    pub text: String,
    pub modified: SystemTime,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>, modified: SystemTime) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            modified,
        }
    }
}
