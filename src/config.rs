//! Pipeline configuration
//!
//! All configuration is read from the environment exactly once, at process
//! start, into an explicit [`PipelineConfig`] that is passed by reference
//! into each component. No other module reads environment variables.

use crate::error::{Error, Result};
use std::time::Duration;

/// Default upstream API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default per-request result cap.
pub const DEFAULT_FETCH_LIMIT: u32 = 20;

/// Lifecycle status selecting finalized orders.
pub const DEFAULT_TARGET_STATUS: &str = "delivered";

/// Default directory for parquet output.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Default dbt project directory.
pub const DEFAULT_DBT_PROJECT_DIR: &str = "ordenes_analytics";

/// Default dbt target environment.
pub const DEFAULT_DBT_TARGET: &str = "dev";

/// Fixed timeout for the single upstream request.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Complete configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base URL of the upstream orders API
    pub base_url: String,

    /// Maximum number of orders requested per run
    pub fetch_limit: u32,

    /// Order status that marks a finalized order
    pub target_status: String,

    /// Directory the dated parquet files are written to
    pub output_dir: String,

    /// Request timeout for the upstream API call
    pub http_timeout: Duration,

    /// Directory of the downstream dbt project
    pub dbt_project_dir: String,

    /// dbt target environment (`--target`)
    pub dbt_target: String,

    /// Whether to run `dbt test` after `dbt run`
    pub run_dbt_tests: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            target_status: DEFAULT_TARGET_STATUS.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            http_timeout: HTTP_TIMEOUT,
            dbt_project_dir: DEFAULT_DBT_PROJECT_DIR.to_string(),
            dbt_target: DEFAULT_DBT_TARGET.to_string(),
            run_dbt_tests: false,
        }
    }
}

impl PipelineConfig {
    /// Build the configuration from process environment variables.
    ///
    /// Recognized variables: `API_BASE_URL`, `ORDERS_FETCH_LIMIT`,
    /// `TARGET_STATUS`, `OUTPUT_DIR`, `DBT_PROJECT_DIR`, `DBT_TARGET`,
    /// `DBT_RUN_TESTS`. Unset variables fall back to the documented
    /// defaults; unparseable values are an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a closure over a map so they
    /// never have to mutate process-wide environment state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("API_BASE_URL").unwrap_or(defaults.base_url);
        url::Url::parse(&base_url)
            .map_err(|e| Error::invalid_config("API_BASE_URL", e.to_string()))?;

        let fetch_limit = match lookup("ORDERS_FETCH_LIMIT") {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|e| Error::invalid_config("ORDERS_FETCH_LIMIT", e.to_string()))?,
            None => defaults.fetch_limit,
        };

        let run_dbt_tests = match lookup("DBT_RUN_TESTS") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| Error::invalid_config("DBT_RUN_TESTS", format!("not a boolean: {raw}")))?,
            None => defaults.run_dbt_tests,
        };

        Ok(Self {
            base_url,
            fetch_limit,
            target_status: lookup("TARGET_STATUS").unwrap_or(defaults.target_status),
            output_dir: lookup("OUTPUT_DIR").unwrap_or(defaults.output_dir),
            http_timeout: defaults.http_timeout,
            dbt_project_dir: lookup("DBT_PROJECT_DIR").unwrap_or(defaults.dbt_project_dir),
            dbt_target: lookup("DBT_TARGET").unwrap_or(defaults.dbt_target),
            run_dbt_tests,
        })
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the fetch limit
    #[must_use]
    pub fn with_fetch_limit(mut self, limit: u32) -> Self {
        self.fetch_limit = limit;
        self
    }

    /// Set the target status
    #[must_use]
    pub fn with_target_status(mut self, status: impl Into<String>) -> Self {
        self.target_status = status.into();
        self
    }

    /// Set the output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<String>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the dbt project directory
    #[must_use]
    pub fn with_dbt_project_dir(mut self, dir: impl Into<String>) -> Self {
        self.dbt_project_dir = dir.into();
        self
    }

    /// Set the dbt target environment
    #[must_use]
    pub fn with_dbt_target(mut self, target: impl Into<String>) -> Self {
        self.dbt_target = target.into();
        self
    }

    /// Enable or disable the dbt test step
    #[must_use]
    pub fn with_dbt_tests(mut self, enabled: bool) -> Self {
        self.run_dbt_tests = enabled;
        self
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|v| (*v).to_string())
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.fetch_limit, 20);
        assert_eq!(config.target_status, "delivered");
        assert_eq!(config.output_dir, "data");
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.dbt_target, "dev");
        assert!(!config.run_dbt_tests);
    }

    #[test]
    fn test_from_lookup_empty_env_is_defaults() {
        let config = PipelineConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.base_url, PipelineConfig::default().base_url);
        assert_eq!(config.fetch_limit, DEFAULT_FETCH_LIMIT);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let pairs = [
            ("API_BASE_URL", "http://orders.internal:9000"),
            ("ORDERS_FETCH_LIMIT", "50"),
            ("TARGET_STATUS", "pending"),
            ("OUTPUT_DIR", "/var/data"),
            ("DBT_TARGET", "prod"),
            ("DBT_RUN_TESTS", "true"),
        ];
        let config = PipelineConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.base_url, "http://orders.internal:9000");
        assert_eq!(config.fetch_limit, 50);
        assert_eq!(config.target_status, "pending");
        assert_eq!(config.output_dir, "/var/data");
        assert_eq!(config.dbt_target, "prod");
        assert!(config.run_dbt_tests);
    }

    #[test]
    fn test_from_lookup_bad_limit() {
        let pairs = [("ORDERS_FETCH_LIMIT", "twenty")];
        let err = PipelineConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("ORDERS_FETCH_LIMIT"));
    }

    #[test]
    fn test_from_lookup_bad_url() {
        let pairs = [("API_BASE_URL", "not a url")];
        let err = PipelineConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("API_BASE_URL"));
    }

    #[test]
    fn test_from_lookup_bad_bool() {
        let pairs = [("DBT_RUN_TESTS", "maybe")];
        let err = PipelineConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("DBT_RUN_TESTS"));
    }

    #[test]
    fn test_builder_setters() {
        let config = PipelineConfig::default()
            .with_base_url("http://api:8000")
            .with_fetch_limit(5)
            .with_target_status("cancelled")
            .with_output_dir("/tmp/out")
            .with_dbt_target("staging")
            .with_dbt_tests(true);

        assert_eq!(config.base_url, "http://api:8000");
        assert_eq!(config.fetch_limit, 5);
        assert_eq!(config.target_status, "cancelled");
        assert_eq!(config.output_dir, "/tmp/out");
        assert_eq!(config.dbt_target, "staging");
        assert!(config.run_dbt_tests);
    }

    #[test]
    fn test_parse_bool_variants() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
