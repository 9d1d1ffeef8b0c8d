//! Error types for the orders pipeline
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the orders pipeline
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    // ============================================================================
    // Upstream API Errors
    // ============================================================================
    /// Network-level failure: connect error, timeout, TLS, etc.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The response body is not the expected JSON envelope.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // Record Errors
    // ============================================================================
    /// A required field is missing or has the wrong type. Fatal for the
    /// whole batch: no partial output is ever written.
    #[error("Schema error in {context}: field '{field}' is missing or invalid")]
    Schema { field: String, context: String },

    #[error("Failed to parse date '{value}': {message}")]
    DateParse { value: String, message: String },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Downstream Errors
    // ============================================================================
    /// The downstream SQL transformation process exited non-zero (or could
    /// not be spawned, in which case `code` is None).
    #[error("Downstream command '{command}' failed with exit code {code:?}")]
    Downstream { command: String, code: Option<i32> },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid-config-value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an upstream status error
    pub fn upstream_status(status: u16, body: impl Into<String>) -> Self {
        Self::UpstreamStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a malformed-response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a schema error for a field within a record
    pub fn schema(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Schema {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create a date parse error
    pub fn date_parse(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DateParse {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a downstream failure error
    pub fn downstream(command: impl Into<String>, code: Option<i32>) -> Self {
        Self::Downstream {
            command: command.into(),
            code,
        }
    }

    /// Whether this error came from the upstream API (transport or status),
    /// i.e. the failure domain the orchestrator's single retry covers.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::UpstreamStatus { .. })
    }
}

/// Result type alias for the orders pipeline
pub type Result<T> = std::result::Result<T, Error>;
