//! Command-line subcommands.

pub mod args;
pub mod build;
pub mod inject;
pub mod query;

pub use args::{Cli, Commands, InjectArgs, QueryArgs};
