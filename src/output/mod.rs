//! Columnar output
//!
//! # Overview
//!
//! - Fixed Arrow schemas for the orders and items datasets
//! - Typed record to `RecordBatch` conversion
//! - Dated Parquet files with an all-or-nothing commit

mod schema;
mod writer;

pub use schema::{items_schema, items_to_batch, orders_schema, orders_to_batch};
pub use writer::{DatasetWriter, ParquetWriterConfig, RunPaths};

#[cfg(test)]
mod tests;
