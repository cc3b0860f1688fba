//! `inject` command: backfill `## Summary` sections into lab writeups from
//! the enrichment file's blurbs, so later builds read them from the README.

use std::{fs, path::Path, sync::LazyLock};

use anyhow::{Context, Result, bail};
use regex::Regex;

use super::args::InjectArgs;
use super::build::scan::{README, list_writeup_dirs, writeup_name};
use crate::config::Config;
use crate::dataset::{EnrichmentTable, load_enrichment};
use crate::log;

static SUMMARY_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^##\s*(?:📝\s*)?Summary").unwrap());

static SECTION_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^##\s+").unwrap());

/// Outcome counts of one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InjectReport {
    pub updated: usize,
    pub skipped: usize,
    /// No README, or no enrichment entry.
    pub missing: usize,
}

pub fn has_summary_section(text: &str) -> bool {
    SUMMARY_SECTION.is_match(text)
}

/// Insert a summary block before the first `##` heading, or append it
/// after a blank line when there is none.
pub fn inject_summary(text: &str, blurb: &str) -> String {
    let block = summary_block(blurb);
    match SECTION_HEADING.find(text) {
        Some(m) => {
            let (head, tail) = text.split_at(m.start());
            format!("{head}{block}{tail}")
        }
        None => format!("{}\n\n{block}", text.trim_end_matches('\n')),
    }
}

fn summary_block(blurb: &str) -> String {
    format!("## Summary\n{blurb}\n\n---\n")
}

pub fn run_inject(args: &InjectArgs, config: &Config) -> Result<InjectReport> {
    let yaml_path = args.yaml.clone().unwrap_or_else(|| config.enrich_file());
    if !yaml_path.is_file() {
        bail!("enrichment file not found: {}", yaml_path.display());
    }

    let entry = config.scan_entry(&config.enrich.category).with_context(|| {
        format!("no [[scan]] entry for category `{}`", config.enrich.category)
    })?;
    let labs_dir = config.paths.ctf.join(&entry.path);
    if !labs_dir.is_dir() {
        bail!("lab directory not found: {}", labs_dir.display());
    }

    let table = load_enrichment(&yaml_path)?;
    log!("inject"; "loaded {} entries from {}", table.len(), yaml_path.display());

    let report = inject_dir(&labs_dir, &table, args.dry_run)?;

    let verb = if args.dry_run { "would update" } else { "updated" };
    log!(
        "inject";
        "{}: {} · skipped: {} · no match: {}",
        verb, report.updated, report.skipped, report.missing
    );
    if args.dry_run {
        log!("dry"; "run without --dry-run to write changes");
    }
    Ok(report)
}

/// Process every writeup directory under `labs_dir`.
pub fn inject_dir(labs_dir: &Path, table: &EnrichmentTable, dry_run: bool) -> Result<InjectReport> {
    let mut report = InjectReport::default();

    for dir in list_writeup_dirs(labs_dir)? {
        let name = writeup_name(&dir);
        let readme = dir.join(README);
        if !readme.is_file() {
            log!("skip"; "no README: {}", name);
            report.missing += 1;
            continue;
        }

        let Some(lab) = table.get(&name) else {
            log!("warn"; "no enrichment entry for: {}", name);
            report.missing += 1;
            continue;
        };

        let blurb = lab.blurb.as_deref().unwrap_or_default().trim();
        if blurb.is_empty() {
            log!("warn"; "empty blurb for: {}", name);
            report.skipped += 1;
            continue;
        }

        let bytes = fs::read(&readme).with_context(|| format!("failed to read {}", readme.display()))?;
        let text = String::from_utf8_lossy(&bytes);
        if has_summary_section(&text) {
            log!("skip"; "already has ## Summary: {}", name);
            report.skipped += 1;
            continue;
        }

        let updated = inject_summary(&text, blurb);
        if dry_run {
            let preview: String = summary_block(blurb).chars().take(120).collect();
            log!("dry"; "{} → {}", name, preview.trim());
        } else {
            fs::write(&readme, updated)
                .with_context(|| format!("failed to write {}", readme.display()))?;
            let short: String = blurb.chars().take(80).collect();
            log!("ok"; "{} → \"{}\"", name, short);
        }
        report.updated += 1;
    }

    Ok(report)
}
