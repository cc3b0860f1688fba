//! Loading of the YAML `_data` files that back summaries and difficulties.
//!
//! Every `*.yml` file in the dataset directory is a list of mappings with at
//! least a `name`. Files are read in file-name order so lookups are stable
//! between runs. A broken file is reported and skipped; it never stops a build.

mod enrich;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;
use thiserror::Error;

use crate::log;
use crate::meta::FallbackEntry;

pub use enrich::{EnrichmentTable, LabInfo, load_enrichment};

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\n\s*").unwrap());

/// Summary field names, most specific first.
const SUMMARY_KEYS: [&str; 3] = ["summary", "notes", "blurb"];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Entries of one dataset file, in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub source: PathBuf,
    pub entries: Vec<FallbackEntry>,
}

impl IntoIterator for Dataset {
    type Item = FallbackEntry;
    type IntoIter = std::vec::IntoIter<FallbackEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Load every dataset in `dir`.
///
/// A missing directory yields no datasets; unparsable files are skipped with
/// a warning.
pub fn load_fallback_dir(dir: &Path) -> Vec<Dataset> {
    let files = match yaml_files(dir) {
        Ok(files) => files,
        Err(err) => {
            log!("warn"; "dataset dir not found: {} ({})", dir.display(), err);
            return Vec::new();
        }
    };

    let mut datasets = Vec::with_capacity(files.len());
    for path in files {
        match load_dataset(&path) {
            Ok(dataset) => datasets.push(dataset),
            Err(err) => log!("warn"; "failed to parse {}: {}", file_name(&path), err),
        }
    }

    let total: usize = datasets.iter().map(|d| d.entries.len()).sum();
    log!("yaml"; "loaded {} entries from {}", total, dir.display());
    datasets
}

/// `*.yml` files of `dir`, sorted by name.
fn yaml_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "yml"))
        .collect();
    files.sort();
    Ok(files)
}

pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let content = read_lossy(path)?;
    Ok(Dataset {
        source: path.to_path_buf(),
        entries: parse_fallback_entries(&content)?,
    })
}

/// Parse one dataset file. A top level that is not a list holds no entries.
pub fn parse_fallback_entries(content: &str) -> Result<Vec<FallbackEntry>, DatasetError> {
    let value: Value = serde_yaml::from_str(content)?;
    let Value::Sequence(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items.iter().filter_map(entry_from_yaml).collect())
}

fn entry_from_yaml(item: &Value) -> Option<FallbackEntry> {
    let name = item.get("name").and_then(scalar_string)?;

    let summary = SUMMARY_KEYS
        .iter()
        .filter_map(|key| item.get(*key).and_then(scalar_string))
        .find(|s| !s.is_empty())
        .map(|s| LINE_BREAK.replace_all(&s, " ").trim().to_string())
        .unwrap_or_default();

    let difficulty = item
        .get("difficulty")
        .and_then(scalar_string)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    Some(FallbackEntry {
        name,
        difficulty,
        summary,
    })
}

/// Strings, numbers and booleans as text; anything else is ignored.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn read_lossy(path: &Path) -> Result<String, DatasetError> {
    let bytes = fs::read(path).map_err(|err| DatasetError::Io(path.to_path_buf(), err))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
