//! Downstream dbt invocation
//!
//! After extraction output is durably on disk, the SQL transformation layer
//! is run as a child process. `dbt run` failures are pipeline failures;
//! `dbt test` failures are a data-quality signal and are only logged.

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::Output;
use tokio::process::Command;
use tracing::{error, info, warn};

/// Runs the downstream dbt project.
#[derive(Debug, Clone)]
pub struct DbtRunner {
    command: String,
    project_dir: PathBuf,
    target: String,
}

impl DbtRunner {
    /// Create a runner from the pipeline configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            command: "dbt".to_string(),
            project_dir: PathBuf::from(&config.dbt_project_dir),
            target: config.dbt_target.clone(),
        }
    }

    /// Override the executable name. Tests use this to substitute a stub.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Run the transformation models (`dbt run`).
    ///
    /// A non-zero exit (or a failure to spawn) is [`Error::Downstream`] and
    /// fails the pipeline. This is a later failure domain than extraction:
    /// the parquet files are already committed when this runs.
    pub async fn run(&self) -> Result<()> {
        let output = self.invoke("run").await?;
        if !output.status.success() {
            return Err(Error::downstream(
                format!("{} run", self.command),
                output.status.code(),
            ));
        }
        info!("dbt run succeeded (target {})", self.target);
        Ok(())
    }

    /// Run the data-quality tests (`dbt test`).
    ///
    /// Soft-failure by design: a failing test suite is logged at WARN and
    /// never propagated, distinguishing "transformation broke" from
    /// "data-quality test failed".
    pub async fn test(&self) {
        match self.invoke("test").await {
            Ok(output) if output.status.success() => {
                info!("dbt test passed (target {})", self.target);
            }
            Ok(output) => {
                warn!(
                    "dbt test failed with exit code {:?}; continuing",
                    output.status.code()
                );
            }
            Err(e) => {
                warn!("could not run dbt test: {e}; continuing");
            }
        }
    }

    async fn invoke(&self, subcommand: &str) -> Result<Output> {
        info!(
            "Running '{} {subcommand} --target {}' in {}",
            self.command,
            self.target,
            self.project_dir.display()
        );

        let output = Command::new(&self.command)
            .arg(subcommand)
            .arg("--target")
            .arg(&self.target)
            .current_dir(&self.project_dir)
            .output()
            .await
            .map_err(|e| {
                error!("failed to spawn '{} {subcommand}': {e}", self.command);
                Error::downstream(format!("{} {subcommand}", self.command), None)
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            info!("{subcommand} output:\n{}", stdout.trim_end());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            warn!("{subcommand} stderr:\n{}", stderr.trim_end());
        }

        Ok(output)
    }
}
