//! boxdex - publish CTF writeups with normalized metadata.

use anyhow::Result;
use boxdex::cli::{Cli, Commands, build::build_all, inject::run_inject, query::run_query};
use boxdex::config::Config;
use boxdex::logger;
use clap::{ColorChoice, Parser};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Config::load(&cli)?;

    match &cli.command {
        Commands::Build { dry_run } => build_all(&config, *dry_run).map(|_| ()),
        Commands::Query { args } => run_query(args, &config),
        Commands::Inject { args } => run_inject(args, &config).map(|_| ()),
    }
}
