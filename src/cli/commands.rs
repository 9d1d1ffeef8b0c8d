//! CLI commands and argument parsing

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Daily orders extraction pipeline
#[derive(Parser, Debug)]
#[command(name = "orders-etl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Override the upstream API base URL (default from API_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the output directory (default from OUTPUT_DIR)
    #[arg(long, global = true)]
    pub output_dir: Option<String>,

    /// Override the per-request result cap (default from ORDERS_FETCH_LIMIT)
    #[arg(long, global = true)]
    pub limit: Option<u32>,

    /// Override the target order status (default from TARGET_STATUS)
    #[arg(long, global = true)]
    pub status: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract one day's orders and write the dated parquet files
    Extract {
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },

    /// Extract, then run the downstream dbt transformation layer
    Run {
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// dbt target environment (default from DBT_TARGET)
        #[arg(long)]
        dbt_target: Option<String>,

        /// Also run `dbt test` after the models (failures are logged only)
        #[arg(long)]
        with_tests: bool,
    },

    /// Print the day's summary metrics as JSON; writes nothing
    Metrics {
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
}
