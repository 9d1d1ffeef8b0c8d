//! Summary metrics over a set of enriched orders

use crate::transform::EnrichedOrder;
use serde::Serialize;

/// Fixed-key summary statistics for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderMetrics {
    /// Sum of `total_amount`
    pub total_revenue: f64,
    /// Mean of `total_amount`; 0.0 for an empty input
    pub average_order_value: f64,
    /// Sum of `items_count`
    pub total_items_sold: i64,
    /// Sum of `discount_total`
    pub total_discount: f64,
    /// Number of orders
    pub order_count: usize,
}

/// Aggregate summary metrics.
///
/// Pure and deterministic. The empty-input mean is pinned to 0.0 so the
/// metrics stay plain JSON-serializable numbers.
pub fn aggregate(orders: &[EnrichedOrder]) -> OrderMetrics {
    let order_count = orders.len();
    let total_revenue: f64 = orders.iter().map(|o| o.total_amount).sum();
    let total_items_sold: i64 = orders.iter().map(|o| o.items_count).sum();
    let total_discount: f64 = orders.iter().map(|o| o.discount_total).sum();

    let average_order_value = if order_count == 0 {
        0.0
    } else {
        total_revenue / order_count as f64
    };

    OrderMetrics {
        total_revenue,
        average_order_value,
        total_items_sold,
        total_discount,
        order_count,
    }
}
