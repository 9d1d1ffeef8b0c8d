//! Dated Parquet output with an all-or-nothing commit
//!
//! A run either leaves both dataset files on disk or neither. Batches are
//! written to `.part` temp files first and only renamed into place once
//! both writes succeeded.

use crate::error::{Error, Result};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writer settings shared by both dataset files.
///
/// Kept deterministic on purpose: with fixed properties, re-running a date
/// against an unchanged upstream response produces byte-identical files.
#[derive(Debug, Clone)]
pub struct ParquetWriterConfig {
    compression: Compression,
    row_group_size: usize,
}

impl Default for ParquetWriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: 1024 * 1024,
        }
    }
}

impl ParquetWriterConfig {
    /// Create a config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression algorithm
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set row group size
    #[must_use]
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Use no compression
    #[must_use]
    pub fn uncompressed(mut self) -> Self {
        self.compression = Compression::UNCOMPRESSED;
        self
    }

    fn build_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build()
    }
}

/// Final locations of one run's output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub orders: PathBuf,
    pub items: PathBuf,
}

/// Writes the per-date orders and items Parquet files.
#[derive(Debug, Clone)]
pub struct DatasetWriter {
    dir: PathBuf,
    config: ParquetWriterConfig,
}

impl DatasetWriter {
    /// Create a writer targeting `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            config: ParquetWriterConfig::default(),
        }
    }

    /// Override the writer configuration.
    #[must_use]
    pub fn with_config(mut self, config: ParquetWriterConfig) -> Self {
        self.config = config;
        self
    }

    /// Path of the orders file for `date`.
    pub fn orders_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("orders_{date}.parquet"))
    }

    /// Path of the items file for `date`.
    pub fn items_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("items_{date}.parquet"))
    }

    /// Persist both batches for `date`, atomically.
    ///
    /// Existing files for the same date are overwritten. On any failure no
    /// partial output remains: temp files are removed and already-renamed
    /// files are rolled back.
    pub fn write_run(
        &self,
        date: NaiveDate,
        orders: &RecordBatch,
        items: &RecordBatch,
    ) -> Result<RunPaths> {
        fs::create_dir_all(&self.dir)?;

        let paths = RunPaths {
            orders: self.orders_path(date),
            items: self.items_path(date),
        };
        let orders_part = paths.orders.with_extension("parquet.part");
        let items_part = paths.items.with_extension("parquet.part");

        let staged = self
            .write_batch(&orders_part, orders)
            .and_then(|()| self.write_batch(&items_part, items));
        if let Err(e) = staged {
            let _ = fs::remove_file(&orders_part);
            let _ = fs::remove_file(&items_part);
            return Err(e);
        }

        fs::rename(&orders_part, &paths.orders).map_err(|e| {
            let _ = fs::remove_file(&orders_part);
            let _ = fs::remove_file(&items_part);
            Error::Io(e)
        })?;
        fs::rename(&items_part, &paths.items).map_err(|e| {
            let _ = fs::remove_file(&paths.orders);
            let _ = fs::remove_file(&items_part);
            Error::Io(e)
        })?;

        info!(
            "Wrote {} order rows to {} and {} item rows to {}",
            orders.num_rows(),
            paths.orders.display(),
            items.num_rows(),
            paths.items.display()
        );

        Ok(paths)
    }

    fn write_batch(&self, path: &Path, batch: &RecordBatch) -> Result<()> {
        let file = File::create(path)?;
        let props = self.config.build_properties();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(batch)?;
        writer.close()?;
        Ok(())
    }
}
