//! boxdex - metadata resolver and card-data builder for CTF writeup collections.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod logger;
pub mod meta;
pub mod utils;
