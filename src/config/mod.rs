//! Run configuration loaded from `boxdex.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `[paths]`   | Writeup repo, site repo and dataset directory     |
//! | `[output]`  | Page/data locations, layout, redaction, images    |
//! | `[enrich]`  | Per-lab enrichment file and target category       |
//! | `[[scan]]`  | Directories to scan with category and platform    |
//!
//! Every key is optional. Relative paths resolve against the directory
//! holding the config file (or the working directory when there is none).

mod error;
mod section;
mod util;

pub use error::ConfigError;
pub use section::{EnrichConfig, OutputConfig, PathsConfig, ScanEntry, default_scan_entries};
use util::{find_config_file, resolve_path};

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{cli::Cli, debug, log};

/// Root configuration structure representing boxdex.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Absolute path to the config file, when one was found
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Base for relative paths
    #[serde(skip)]
    pub root: PathBuf,

    pub paths: PathsConfig,
    pub output: OutputConfig,
    pub enrich: EnrichConfig,
    pub scan: Vec<ScanEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            root: PathBuf::new(),
            paths: PathsConfig::default(),
            output: OutputConfig::default(),
            enrich: EnrichConfig::default(),
            scan: default_scan_entries(),
        }
    }
}

impl Config {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. A missing file is not
    /// an error: defaults apply, rooted at cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map_or_else(|| cwd.clone(), Path::to_path_buf);
                config.config_path = Some(path);
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd.clone(),
                    ..Self::default()
                }
            }
        };

        config.apply_cli(cli, &cwd);
        config.resolve_paths();
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content without touching the filesystem.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(Self::parse_with_ignored(content)?.0)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            let display_path = path
                .file_name()
                .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy());
            log!("warn"; "unknown fields in {}, ignoring: {}", display_path, ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// CLI paths are relative to cwd, not to the config file.
    fn apply_cli(&mut self, cli: &Cli, cwd: &Path) {
        Self::update_option(&mut self.paths.ctf, cli.ctf.as_deref(), cwd);
        Self::update_option(&mut self.paths.out, cli.out.as_deref(), cwd);
        Self::update_option(&mut self.paths.datasets, cli.datasets.as_deref(), cwd);
    }

    fn update_option(target: &mut PathBuf, value: Option<&Path>, cwd: &Path) {
        if let Some(value) = value {
            *target = resolve_path(cwd, value);
        }
    }

    /// Expand `~` and anchor relative paths at the project root.
    fn resolve_paths(&mut self) {
        let root = self.root.clone();
        for path in [
            &mut self.paths.ctf,
            &mut self.paths.out,
            &mut self.paths.datasets,
        ] {
            *path = resolve_path(&root, path);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.is_empty() {
            return Err(ConfigError::Validation("[[scan]] must list at least one directory".into()));
        }

        let mut seen = FxHashSet::default();
        for entry in &self.scan {
            if entry.category.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "[[scan]] entry `{}` has an empty category",
                    entry.path.display()
                )));
            }
            if !seen.insert(entry.category.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "category `{}` is scanned more than once",
                    entry.category
                )));
            }
        }

        if !self.output.permalink_prefix.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "output.permalink-prefix must start with `/`, got `{}`",
                self.output.permalink_prefix
            )));
        }

        Ok(())
    }

    // ------------------------------------------------------------------------
    // derived locations
    // ------------------------------------------------------------------------

    pub fn writeups_dir(&self) -> PathBuf {
        self.paths.out.join(&self.output.writeups)
    }

    pub fn data_file(&self) -> PathBuf {
        self.paths.out.join(&self.output.data_file)
    }

    pub fn enrich_file(&self) -> PathBuf {
        self.paths.datasets.join(&self.enrich.file)
    }

    pub fn scan_entry(&self, category: &str) -> Option<&ScanEntry> {
        self.scan.iter().find(|entry| entry.category == category)
    }
}
