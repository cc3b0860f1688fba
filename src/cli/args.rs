//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Metadata resolver and card-data builder for CTF writeups
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: boxdex.toml)
    #[arg(short = 'C', long, global = true, default_value = "boxdex.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Writeup repository root (relative to current directory)
    #[arg(long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub ctf: Option<PathBuf>,

    /// Site repository root (relative to current directory)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub out: Option<PathBuf>,

    /// Fallback dataset directory (relative to current directory)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub datasets: Option<PathBuf>,

    /// Print debug output
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate writeup pages and the card data file
    #[command(visible_alias = "b")]
    Build {
        /// Resolve and report without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Print the resolved record of a single writeup
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },

    /// Add `## Summary` sections to lab writeups from the enrichment file
    #[command(visible_alias = "i")]
    Inject {
        #[command(flatten)]
        args: InjectArgs,
    },
}

/// Query command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// README.md, or the writeup directory holding it
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub path: PathBuf,

    /// Writeup name (default: name of the containing directory)
    #[arg(long)]
    pub name: Option<String>,

    /// Category (default: taken from the matching [[scan]] entry)
    #[arg(long)]
    pub category: Option<String>,

    /// Platform (default: taken from the matching [[scan]] entry)
    #[arg(long)]
    pub platform: Option<String>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Print the generated front matter instead of JSON
    #[arg(short, long)]
    pub front_matter: bool,
}

/// Inject command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct InjectArgs {
    /// Preview changes without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enrichment file (default: [enrich] file inside the dataset directory)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub yaml: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["boxdex", "build", "-C", "alt.toml", "--dry-run"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        assert!(matches!(cli.command, Commands::Build { dry_run: true }));
    }

    #[test]
    fn test_config_default() {
        let cli = Cli::try_parse_from(["boxdex", "inject"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("boxdex.toml"));
    }
}
