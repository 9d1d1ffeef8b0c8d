//! HTTP client for the orders API

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// The parsed top-level JSON envelope returned by the orders API.
///
/// Records are kept as raw JSON values; field validation and renaming
/// happen in the record mapper, not here.
#[derive(Debug, Clone)]
pub struct RawEnvelope {
    /// Total count reported by the API (falls back to the array length)
    pub total_count: u64,
    /// One raw JSON object per order
    pub orders: Vec<Value>,
}

impl RawEnvelope {
    /// Validate a parsed JSON body as an orders envelope.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(obj) = value else {
            return Err(Error::malformed("top-level JSON is not an object"));
        };

        let orders = match obj.get("orders") {
            Some(Value::Array(arr)) => arr.clone(),
            Some(_) => return Err(Error::malformed("'orders' is not an array")),
            None => return Err(Error::malformed("missing top-level 'orders' array")),
        };

        let total_count = obj
            .get("total_count")
            .and_then(Value::as_u64)
            .unwrap_or(orders.len() as u64);

        Ok(Self {
            total_count,
            orders,
        })
    }
}

/// Client for the upstream orders API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    fetch_limit: u32,
}

impl ApiClient {
    /// Create a client from the pipeline configuration.
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(format!("orders-etl/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fetch_limit: config.fetch_limit,
        })
    }

    /// Fetch one day's worth of orders.
    ///
    /// `GET {base_url}/orders?fecha=<YYYY-MM-DD>&limit=<fetch_limit>`, one
    /// synchronous call bounded by the configured timeout. Non-2xx answers
    /// become [`Error::UpstreamStatus`] with the response body attached;
    /// network failures become [`Error::Transport`].
    pub async fn fetch_orders(&self, date: NaiveDate) -> Result<RawEnvelope> {
        let url = format!("{}/orders", self.base_url);
        let fecha = date.format("%Y-%m-%d").to_string();
        let limit = self.fetch_limit.to_string();

        debug!("GET {url}?fecha={fecha}&limit={limit}");

        let response = self
            .client
            .get(&url)
            .query(&[("fecha", fecha.as_str()), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream_status(status.as_u16(), body));
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|e| Error::malformed(format!("body is not valid JSON: {e}")))?;

        let envelope = RawEnvelope::from_value(value)?;
        debug!(
            "Fetched {} orders for {fecha} (reported total {})",
            envelope.orders.len(),
            envelope.total_count
        );

        Ok(envelope)
    }
}
