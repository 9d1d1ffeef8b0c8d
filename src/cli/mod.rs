//! CLI module
//!
//! Command-line interface for the daily extraction.
//!
//! # Commands
//!
//! - `extract` - Fetch one day's orders and write the parquet files
//! - `run` - Extract, then hand off to the dbt transformation layer
//! - `metrics` - Print the day's summary metrics without writing files

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
