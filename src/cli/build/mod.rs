//! `build` command: resolve every scanned writeup, publish its page and
//! regenerate the card data file.
//!
//! Writeups of one category are resolved in parallel, then their pages are
//! written in scan order; categories are processed in config order so the
//! output is deterministic. A writeup that fails to read or write is
//! reported and left out, the rest of the run continues.

pub mod card;
pub mod enrich;
pub mod scan;
pub mod write;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::config::{Config, ScanEntry};
use crate::dataset::load_fallback_dir;
use crate::logger::ProgressLine;
use crate::meta::{FallbackIndex, RawDocument, RecordBuilder, Writeup};
use crate::utils::date::DateTimeUtc;
use crate::{debug, log};
use card::{Card, CategoryCards, render_cards_js};
use scan::{list_writeup_dirs, read_writeup, writeup_name};

/// Counts and cards of a finished build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Writeup directories seen.
    pub scanned: usize,
    /// Writeups resolved into a card.
    pub processed: usize,
    /// Writeups dropped because of an I/O error.
    pub failed: usize,
    pub groups: Vec<CategoryCards>,
}

enum Outcome {
    Resolved(Box<Resolved>),
    NoReadme(String),
    Failed(String, anyhow::Error),
}

/// A resolved writeup waiting to be written.
struct Resolved {
    dir: PathBuf,
    doc: RawDocument,
    writeup: Writeup,
}

struct BuildContext<'a> {
    config: &'a Config,
    builder: RecordBuilder<'a>,
    writeups_dir: PathBuf,
    dry_run: bool,
}

impl BuildContext<'_> {
    fn resolve(&self, dir: &Path, entry: &ScanEntry) -> Outcome {
        match read_writeup(dir) {
            Ok(Some(doc)) => {
                let writeup = self.builder.build(&doc, &entry.category, &entry.platform);
                Outcome::Resolved(Box::new(Resolved {
                    dir: dir.to_path_buf(),
                    doc,
                    writeup,
                }))
            }
            Ok(None) => Outcome::NoReadme(writeup_name(dir)),
            Err(err) => Outcome::Failed(writeup_name(dir), err),
        }
    }

    /// Write the page unless this is a dry run.
    fn publish(&self, resolved: &Resolved) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }
        let dest = write::write_page(
            &self.writeups_dir,
            &resolved.writeup,
            &resolved.doc,
            &resolved.dir,
            &self.config.output,
        )?;
        debug!("page"; "{}", dest.display());
        Ok(())
    }
}

/// Run a full build.
pub fn build_all(config: &Config, dry_run: bool) -> Result<BuildReport> {
    let ctf_root = &config.paths.ctf;
    if !ctf_root.exists() {
        bail!("ctf-writeups not found: {}", ctf_root.display());
    }

    let writeups_dir = config.writeups_dir();
    if !dry_run {
        fs::create_dir_all(&writeups_dir)
            .with_context(|| format!("failed to create {}", writeups_dir.display()))?;
    }

    let index = FallbackIndex::build(load_fallback_dir(&config.paths.datasets));
    let options = config.output.record_options();
    let ctx = BuildContext {
        config,
        builder: RecordBuilder::new(&index, &options),
        writeups_dir,
        dry_run,
    };

    let targets = discover(config);
    let counters: Vec<_> = targets
        .iter()
        .map(|(entry, dirs)| (entry.category.clone(), dirs.len()))
        .collect();

    let progress = ProgressLine::new(&counters);
    let results: Vec<(&ScanEntry, Vec<Outcome>)> = targets
        .iter()
        .map(|(entry, dirs)| {
            let outcomes = dirs
                .par_iter()
                .map(|dir| {
                    let outcome = ctx.resolve(dir, entry);
                    progress.inc(&entry.category);
                    outcome
                })
                .collect();
            (*entry, outcomes)
        })
        .collect();
    progress.finish();

    // Pages are written in scan order, so a later writeup sharing a slug
    // replaces an earlier one deterministically.
    let mut report = BuildReport::default();
    for (entry, outcomes) in results {
        let mut group = CategoryCards {
            category: entry.category.clone(),
            cards: Vec::with_capacity(outcomes.len()),
        };
        let mut slugs = FxHashSet::default();
        for outcome in outcomes {
            report.scanned += 1;
            match outcome {
                Outcome::Resolved(resolved) => {
                    let record = &resolved.writeup.record;
                    if !slugs.insert(record.slug.clone()) {
                        log!(
                            "warn";
                            "duplicate slug {}/{}: {} replaces an earlier page",
                            entry.category, record.slug, record.name
                        );
                    }
                    if let Err(err) = ctx.publish(&resolved) {
                        log!("error"; "{}/{}: {:#}", entry.category, record.name, err);
                        report.failed += 1;
                        continue;
                    }
                    let card = Card::from(record);
                    log_card(&card);
                    report.processed += 1;
                    group.cards.push(card);
                }
                Outcome::NoReadme(name) => log!("skip"; "no README: {}", name),
                Outcome::Failed(name, err) => {
                    log!("error"; "{}/{}: {:#}", entry.category, name, err);
                    report.failed += 1;
                }
            }
        }
        if entry.category == config.enrich.category {
            enrich::enrich_from_file(&mut group.cards, &config.enrich_file());
        }
        report.groups.push(group);
    }

    let data_file = config.data_file();
    if !dry_run {
        let js = render_cards_js(&report.groups, &DateTimeUtc::now())?;
        write::write_data_file(&data_file, &js)?;
    }

    log!("build"; "scanned: {} · processed: {}", report.scanned, report.processed);
    if report.failed > 0 {
        log!("warn"; "{} writeups failed", report.failed);
    }
    log!("build"; "output: {}", data_file.display());
    log!("build"; "writeups: {}", ctx.writeups_dir.display());
    if dry_run {
        log!("dry"; "run without --dry-run to write files");
    }
    Ok(report)
}

/// Scan entries whose directory exists, with their writeup directories.
fn discover(config: &Config) -> Vec<(&ScanEntry, Vec<PathBuf>)> {
    config
        .scan
        .iter()
        .filter_map(|entry| {
            let dir = config.paths.ctf.join(&entry.path);
            match list_writeup_dirs(&dir) {
                Ok(dirs) => Some((entry, dirs)),
                Err(_) => {
                    log!("skip"; "not found: {}", dir.display());
                    None
                }
            }
        })
        .collect()
}

fn log_card(card: &Card) {
    let flag = if card.private { "🔒" } else { "✅" };
    let has_summary = if card.summary.is_empty() { "  " } else { "📝" };
    log!("box"; "[{}] {} {}/{} ({})", flag, has_summary, card.category, card.name, card.diff);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PathsConfig, ScanEntry};
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(
            &root.join("ctf/HTB/Retired/Sauna/README.md"),
            "---\nold: true\n---\n**Status:** ✅ Pwned\n**Difficulty:** Easy | AD\n**OS:** Windows\n\n\
             ## Summary\nASREP roast →\nDCSync.\n\n## Recon\nnmap\n",
        );
        write(&root.join("ctf/HTB/Retired/Sauna/shot.png"), "png");
        write(
            &root.join("ctf/HTB/Active/Secret/README.md"),
            "**Status:** 🔒 Private\n# Secret\nroot steps\n## Teaser\nAPI foothold.\n",
        );
        fs::create_dir_all(root.join("ctf/HTB/Active/Empty")).unwrap();
        write(&root.join("ctf/HTB/ProLabs/Dante/README.md"), "# Dante\n");
        write(
            &root.join("data/prolabs.yml"),
            "- name: Dante\n  tier: Intermediate\n  blurb: Pivot-heavy network.\n",
        );

        let config = Config {
            root: root.to_path_buf(),
            paths: PathsConfig {
                ctf: root.join("ctf"),
                out: root.join("site"),
                datasets: root.join("data"),
            },
            scan: vec![
                ScanEntry::new("HTB/Retired", "retired", "HackTheBox"),
                ScanEntry::new("HTB/Active", "active", "HackTheBox"),
                ScanEntry::new("HTB/Missing", "missing", "HackTheBox"),
                ScanEntry::new("HTB/ProLabs", "prolabs", "HackTheBox"),
            ],
            ..Config::default()
        };
        (dir, config)
    }

    #[test]
    fn test_build_writes_pages_and_data() {
        let (dir, config) = fixture();
        let report = build_all(&config, false).unwrap();

        assert_eq!(report.scanned, 4);
        assert_eq!(report.processed, 3);
        assert_eq!(report.failed, 0);
        let categories: Vec<_> = report.groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["retired", "active", "prolabs"]);

        let sauna = dir.path().join("site/_writeups/retired/sauna");
        let page = fs::read_to_string(sauna.join("index.md")).unwrap();
        assert!(page.starts_with("---\nlayout: writeup\nname: \"Sauna\"\n"));
        assert!(page.contains("difficulty: \"Easy\"\n"));
        assert!(!page.contains("old: true"));
        assert!(page.ends_with("## Recon\nnmap\n"));
        assert!(sauna.join("shot.png").is_file());

        let secret = fs::read_to_string(dir.path().join("site/_writeups/active/secret/index.md")).unwrap();
        assert!(secret.contains("Spoiler Policy"));
        assert!(!secret.contains("root steps"));

        let js = fs::read_to_string(dir.path().join("site/boxes-data.js")).unwrap();
        assert!(js.contains("// Total writeups: 3\n"));
        assert!(js.contains("const BOXES_RETIRED = ["));
        assert!(js.contains("\"summary\": \"ASREP roast → DCSync.\""));
        assert!(js.contains("\"tier\": \"Intermediate\""));
        assert!(!js.contains("BOXES_MISSING"));
    }

    #[test]
    fn test_prolab_summary_from_dataset() {
        let (_dir, config) = fixture();
        let report = build_all(&config, true).unwrap();
        let dante = &report.groups[2].cards[0];
        assert_eq!(dante.summary, "Pivot-heavy network.");
        assert_eq!(dante.blurb.as_deref(), Some("Pivot-heavy network."));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (dir, config) = fixture();
        let report = build_all(&config, true).unwrap();
        assert_eq!(report.processed, 3);
        assert!(!dir.path().join("site").exists());
    }

    #[test]
    fn test_duplicate_slug_last_in_scan_order_wins() {
        let (dir, config) = fixture();
        let retired = dir.path().join("ctf/HTB/Retired");
        write(&retired.join("Re Lock/README.md"), "**Difficulty:** Easy\n");
        write(&retired.join("re_lock/README.md"), "**Difficulty:** Hard\n");

        let report = build_all(&config, false).unwrap();
        assert_eq!(report.groups[0].cards.len(), 3);
        let page =
            fs::read_to_string(dir.path().join("site/_writeups/retired/re-lock/index.md")).unwrap();
        assert!(page.contains("name: \"re_lock\"\n"));
        assert!(page.contains("difficulty: \"Hard\"\n"));
    }

    #[test]
    fn test_missing_ctf_root() {
        let (dir, mut config) = fixture();
        config.paths.ctf = dir.path().join("nowhere");
        assert!(build_all(&config, true).is_err());
    }
}
