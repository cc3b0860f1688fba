//! Per-lab presentation data (`prolabs.yml`): tier, blurb and proof image.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde_yaml::Value;

use super::{DatasetError, read_lossy, scalar_string};
use crate::meta::normalize_name;

/// Presentation fields of one lab. `None` means the key was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabInfo {
    pub name: String,
    pub tier: Option<String>,
    pub blurb: Option<String>,
    pub proof_img: Option<String>,
}

/// Labs keyed by [`normalize_name`]. Later entries replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentTable(FxHashMap<String, LabInfo>);

impl EnrichmentTable {
    pub fn from_entries(entries: impl IntoIterator<Item = LabInfo>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|info| (normalize_name(&info.name), info))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&LabInfo> {
        self.0.get(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the YAML list. A top level that is not a list yields an empty table.
    pub fn parse(content: &str) -> Result<Self, DatasetError> {
        let value: Value = serde_yaml::from_str(content)?;
        let Value::Sequence(items) = value else {
            return Ok(Self::default());
        };
        Ok(Self::from_entries(items.iter().filter_map(lab_from_yaml)))
    }
}

fn lab_from_yaml(item: &Value) -> Option<LabInfo> {
    let field = |key: &str| item.get(key).and_then(scalar_string);
    Some(LabInfo {
        name: field("name")?,
        tier: field("tier"),
        blurb: field("blurb"),
        proof_img: field("proof_img"),
    })
}

pub fn load_enrichment(path: &Path) -> Result<EnrichmentTable, DatasetError> {
    EnrichmentTable::parse(&read_lossy(path)?)
}
