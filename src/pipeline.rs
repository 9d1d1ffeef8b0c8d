//! End-to-end run orchestration
//!
//! One dated run is a straight line: fetch, map, transform, filter,
//! aggregate, persist. Each stage is pure except the fetch at the front
//! and the file commit at the end, so a failure anywhere leaves no output.

use crate::client::ApiClient;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::metrics::{aggregate, OrderMetrics};
use crate::output::{items_to_batch, orders_to_batch, DatasetWriter, RunPaths};
use crate::records::{map_envelope, ItemRecord, OrderRecord};
use crate::transform::{filter_by_status, transform, EnrichedOrder};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

/// What one completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub date: NaiveDate,
    pub orders_written: usize,
    pub items_written: usize,
    #[serde(skip)]
    pub paths: RunPaths,
    pub metrics: OrderMetrics,
}

/// The extraction pipeline for a single target date.
pub struct Pipeline {
    client: ApiClient,
    writer: DatasetWriter,
    target_status: String,
}

impl Pipeline {
    /// Build the pipeline from configuration.
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(config)?,
            writer: DatasetWriter::new(&config.output_dir),
            target_status: config.target_status.clone(),
        })
    }

    /// Execute a full run for `date` and persist both datasets.
    pub async fn run_for_date(&self, date: NaiveDate) -> Result<RunSummary> {
        info!("Starting extraction for {date}");

        let (orders, items) = self.extract(date).await?;
        let metrics = aggregate(&orders);
        info!(
            "Metrics for {date}: revenue {:.2}, {} orders, {} items sold",
            metrics.total_revenue, metrics.order_count, metrics.total_items_sold
        );

        let orders_batch = orders_to_batch(&orders)?;
        let items_batch = items_to_batch(&items)?;
        let paths = self.writer.write_run(date, &orders_batch, &items_batch)?;

        Ok(RunSummary {
            date,
            orders_written: orders.len(),
            items_written: items.len(),
            paths,
            metrics,
        })
    }

    /// Fetch, transform and filter without persisting anything.
    pub async fn metrics_for_date(&self, date: NaiveDate) -> Result<OrderMetrics> {
        let (orders, _) = self.extract(date).await?;
        Ok(aggregate(&orders))
    }

    async fn extract(&self, date: NaiveDate) -> Result<(Vec<EnrichedOrder>, Vec<ItemRecord>)> {
        let envelope = self.client.fetch_orders(date).await?;
        let (orders, items) = map_envelope(&envelope)?;
        info!("Mapped {} orders and {} items", orders.len(), items.len());

        check_items_count(&orders, &items);

        let enriched = transform(&orders)?;
        let (kept, kept_items) = filter_by_status(enriched, items, &self.target_status);
        info!(
            "{} of {} orders have status '{}'",
            kept.len(),
            orders.len(),
            self.target_status
        );

        Ok((kept, kept_items))
    }
}

/// The header's `items_count` must match the actual item rows before any
/// filtering. A mismatch is upstream data drift, not a reason to abort.
fn check_items_count(orders: &[OrderRecord], items: &[ItemRecord]) {
    for order in orders {
        let actual = items
            .iter()
            .filter(|i| i.order_id == order.order_id)
            .count() as i64;
        if actual != order.items_count {
            warn!(
                "order '{}' reports items_count {} but has {} item rows",
                order.order_id, order.items_count, actual
            );
        }
    }
}
