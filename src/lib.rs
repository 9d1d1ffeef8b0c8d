//! # Orders ETL
//!
//! A small daily batch pipeline: fetch one day's orders from an HTTP API,
//! flatten them into two tabular datasets (orders and line-items), derive a
//! handful of columns, keep the finalized orders, persist both datasets as
//! dated Parquet files, and hand off to a dbt transformation project.
//!
//! ## Pipeline
//!
//! ```text
//! API Client ──► Record Mapper ──► Transform ──► Status Filter ──┬─► Parquet
//!   (GET)        (flatten JSON)    (derive cols)  (semi-join)    └─► Metrics
//! ```
//!
//! Single-threaded and synchronous by design: one network call, one linear
//! pass over at most a few dozen records, one file commit. Retry policy
//! belongs to the orchestrator, not this crate.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use orders_etl::{config::PipelineConfig, pipeline::Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> orders_etl::Result<()> {
//!     let config = PipelineConfig::from_env()?;
//!     let pipeline = Pipeline::new(&config)?;
//!     let summary = pipeline.run_for_date("2025-11-15".parse().unwrap()).await?;
//!     println!("{} orders written", summary.orders_written);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

/// Error types for the pipeline
pub mod error;

/// Runtime configuration (read from the environment once)
pub mod config;

/// Upstream orders API client
pub mod client;

/// Record types and envelope mapping
pub mod records;

/// Derived columns and the status filter
pub mod transform;

/// Summary metrics
pub mod metrics;

/// Arrow/Parquet output
pub mod output;

/// Downstream dbt invocation
pub mod dbt;

/// Run orchestration
pub mod pipeline;

/// Command-line interface
pub mod cli;

pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
