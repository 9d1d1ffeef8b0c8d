//! CLI runner - executes commands

use crate::cli::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::dbt::DbtRunner;
use crate::error::Result;
use crate::pipeline::Pipeline;
use tracing::info;

/// Wires configuration, pipeline and dbt together for one invocation.
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the parsed CLI
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the selected command.
    pub async fn run(self) -> Result<()> {
        let config = self.build_config()?;
        let pipeline = Pipeline::new(&config)?;

        match self.cli.command {
            Commands::Extract { date } => {
                let summary = pipeline.run_for_date(date).await?;
                info!(
                    "Extraction complete: {} orders, {} items -> {}",
                    summary.orders_written,
                    summary.items_written,
                    summary.paths.orders.display()
                );
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Commands::Run {
                date,
                dbt_target,
                with_tests,
            } => {
                let mut config = config;
                if let Some(target) = dbt_target {
                    config = config.with_dbt_target(target);
                }
                if with_tests {
                    config = config.with_dbt_tests(true);
                }

                let summary = pipeline.run_for_date(date).await?;
                info!(
                    "Extraction complete: {} orders, {} items",
                    summary.orders_written, summary.items_written
                );

                // Output is durably committed; the dbt stage is a separate
                // failure domain from extraction.
                let dbt = DbtRunner::new(&config);
                dbt.run().await?;
                if config.run_dbt_tests {
                    dbt.test().await;
                }

                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Commands::Metrics { date } => {
                let metrics = pipeline.metrics_for_date(date).await?;
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            }
        }

        Ok(())
    }

    fn build_config(&self) -> Result<PipelineConfig> {
        let mut config = PipelineConfig::from_env()?;
        if let Some(url) = &self.cli.base_url {
            config = config.with_base_url(url);
        }
        if let Some(dir) = &self.cli.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(limit) = self.cli.limit {
            config = config.with_fetch_limit(limit);
        }
        if let Some(status) = &self.cli.status {
            config = config.with_target_status(status);
        }
        Ok(config)
    }
}
