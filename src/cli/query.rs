//! `query` command: resolve a single writeup and print its record.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::args::QueryArgs;
use super::build::scan::{README, read_document, writeup_name};
use crate::config::Config;
use crate::dataset::load_fallback_dir;
use crate::meta::{FallbackIndex, RecordBuilder};

pub fn run_query(args: &QueryArgs, config: &Config) -> Result<()> {
    let readme = if args.path.is_dir() {
        args.path.join(README)
    } else {
        args.path.clone()
    };
    let readme = std::path::absolute(&readme)
        .with_context(|| format!("invalid path {}", readme.display()))?;

    let name = args.name.clone().unwrap_or_else(|| {
        readme.parent().map(writeup_name).unwrap_or_default()
    });
    let (category, platform) = placement(config, &readme, args);

    let doc = read_document(&readme, name)?;
    let index = FallbackIndex::build(load_fallback_dir(&config.paths.datasets));
    let options = config.output.record_options();
    let writeup = RecordBuilder::new(&index, &options).build(&doc, &category, &platform);

    if args.front_matter {
        print!("{}", writeup.front_matter);
        return Ok(());
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&writeup.record)?
    } else {
        serde_json::to_string(&writeup.record)?
    };
    println!("{json}");
    Ok(())
}

/// Category and platform for `readme`: explicit arguments first, then the
/// `[[scan]]` entry whose directory contains it.
fn placement(config: &Config, readme: &Path, args: &QueryArgs) -> (String, String) {
    let scanned = config
        .scan
        .iter()
        .find(|entry| readme.starts_with(config.paths.ctf.join(&entry.path)));

    let category = args
        .category
        .clone()
        .or_else(|| scanned.map(|entry| entry.category.clone()))
        .unwrap_or_default();
    let platform = args
        .platform
        .clone()
        .or_else(|| scanned.map(|entry| entry.platform.clone()))
        .unwrap_or_default();
    (category, platform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathsConfig;

    fn args(path: &str) -> QueryArgs {
        QueryArgs {
            path: PathBuf::from(path),
            name: None,
            category: None,
            platform: None,
            pretty: false,
            front_matter: false,
        }
    }

    fn config() -> Config {
        Config {
            paths: PathsConfig {
                ctf: PathBuf::from("/ctf"),
                ..PathsConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_placement_from_scan_entry() {
        let readme = Path::new("/ctf/Other/THM/Blue/README.md");
        assert_eq!(
            placement(&config(), readme, &args("x")),
            ("thm".to_string(), "TryHackMe".to_string())
        );
    }

    #[test]
    fn test_placement_override() {
        let readme = Path::new("/ctf/HTB/Retired/Sauna/README.md");
        let mut args = args("x");
        args.category = Some("archive".into());
        assert_eq!(
            placement(&config(), readme, &args),
            ("archive".to_string(), "HackTheBox".to_string())
        );
    }

    #[test]
    fn test_placement_outside_scan() {
        let readme = Path::new("/tmp/Box/README.md");
        assert_eq!(placement(&config(), readme, &args("x")), (String::new(), String::new()));
    }
}
