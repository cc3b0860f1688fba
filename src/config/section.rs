//! `boxdex.toml` sections.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::meta::RecordOptions;

/// `[paths]`: where writeups come from and where the site lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the writeup repository.
    pub ctf: PathBuf,
    /// Root of the site repository.
    pub out: PathBuf,
    /// Directory of fallback `*.yml` datasets.
    pub datasets: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            ctf: "ctf-writeups".into(),
            out: "site".into(),
            datasets: "site/_data".into(),
        }
    }
}

/// `[output]`: what gets written under `paths.out`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Writeup pages directory, relative to `paths.out`.
    pub writeups: PathBuf,
    /// Card data script, relative to `paths.out`.
    pub data_file: PathBuf,
    /// `layout:` of emitted front matter.
    pub layout: String,
    pub permalink_prefix: String,
    /// Categories whose private writeups are replaced by a spoiler notice.
    pub redact: Vec<String>,
    /// File extensions copied next to each page (case-insensitive).
    pub images: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let defaults = RecordOptions::default();
        Self {
            writeups: "_writeups".into(),
            data_file: "boxes-data.js".into(),
            layout: defaults.layout,
            permalink_prefix: defaults.permalink_prefix,
            redact: defaults.redact,
            images: ["png", "jpg", "jpeg", "gif", "webp", "svg"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl OutputConfig {
    pub fn record_options(&self) -> RecordOptions {
        RecordOptions {
            layout: self.layout.clone(),
            permalink_prefix: self.permalink_prefix.clone(),
            redact: self.redact.clone(),
        }
    }

    pub fn is_image(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| self.images.iter().any(|img| img.eq_ignore_ascii_case(&ext)))
    }
}

/// `[enrich]`: per-lab presentation data merged into one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EnrichConfig {
    /// File name inside `paths.datasets`.
    pub file: String,
    /// Category whose cards are enriched.
    pub category: String,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            file: "prolabs.yml".to_string(),
            category: "prolabs".to_string(),
        }
    }
}

/// `[[scan]]`: one directory of writeups and how to file it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanEntry {
    /// Directory relative to `paths.ctf`.
    pub path: PathBuf,
    pub category: String,
    pub platform: String,
}

impl ScanEntry {
    pub fn new(path: &str, category: &str, platform: &str) -> Self {
        Self {
            path: path.into(),
            category: category.to_string(),
            platform: platform.to_string(),
        }
    }
}

pub fn default_scan_entries() -> Vec<ScanEntry> {
    [
        ("HTB/Seasonal", "seasonal", "HackTheBox"),
        ("HTB/Active", "active", "HackTheBox"),
        ("HTB/Retired", "retired", "HackTheBox"),
        ("HTB/Challenges", "challenges", "HackTheBox"),
        ("HTB/ProLabs", "prolabs", "HackTheBox"),
        ("HTB/StartingPoint", "starting", "HackTheBox"),
        ("Other/THM", "thm", "TryHackMe"),
        ("Other/PG", "pg", "ProvingGrounds"),
        ("Other/HackSmarter", "hacksmarter", "HackSmarter"),
    ]
    .into_iter()
    .map(|(path, category, platform)| ScanEntry::new(path, category, platform))
    .collect()
}
