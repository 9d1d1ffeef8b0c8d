//! Derived-column computation over mapped orders

use crate::error::{Error, Result};
use crate::records::OrderRecord;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Substituted for a missing composite shipping address.
///
/// The unaccented spelling is pinned so output is identical regardless of
/// the consumer's encoding handling.
pub const NO_ADDRESS_PLACEHOLDER: &str = "Sin direccion";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// An order with parsed dates, a normalized address, and derived columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedOrder {
    pub order_id: String,
    pub customer_id: String,
    pub order_date: NaiveDate,
    pub order_timestamp: Option<NaiveDateTime>,
    pub status: String,
    pub payment_method: String,
    pub shipping_street: String,
    pub shipping_city: String,
    pub shipping_province: String,
    pub shipping_postal_code: String,
    /// Always present: missing addresses become [`NO_ADDRESS_PLACEHOLDER`]
    pub shipping_address: String,
    pub subtotal: f64,
    pub discount_total: f64,
    pub tax_total: f64,
    pub shipping_cost: f64,
    pub total_amount: f64,
    pub items_count: i64,
    /// `discount_total / subtotal * 100`, 2 decimals; 0.0 when subtotal is 0
    pub discount_percentage: f64,
    /// `total_amount / items_count`, 2 decimals; 0.0 when items_count is 0
    pub average_item_price: f64,
}

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute derived columns for every order.
///
/// Returns a new record set; the input is untouched. An unparseable
/// `order_date` or `order_timestamp` fails the whole batch with
/// [`Error::DateParse`] rather than dropping rows.
///
/// Zero denominators (subtotal or items_count of 0) yield a derived value
/// of 0.0 instead of propagating infinities into the output files.
pub fn transform(orders: &[OrderRecord]) -> Result<Vec<EnrichedOrder>> {
    orders.iter().map(enrich).collect()
}

fn enrich(order: &OrderRecord) -> Result<EnrichedOrder> {
    let order_date = NaiveDate::parse_from_str(&order.order_date, DATE_FORMAT)
        .map_err(|e| Error::date_parse(&order.order_date, e.to_string()))?;

    let order_timestamp = order
        .order_timestamp
        .as_deref()
        .map(|raw| {
            NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
                .map_err(|e| Error::date_parse(raw, e.to_string()))
        })
        .transpose()?;

    let discount_percentage = if order.subtotal == 0.0 {
        0.0
    } else {
        round2(order.discount_total / order.subtotal * 100.0)
    };

    let average_item_price = if order.items_count == 0 {
        0.0
    } else {
        round2(order.total_amount / order.items_count as f64)
    };

    let shipping_address = order
        .shipping_address
        .clone()
        .unwrap_or_else(|| NO_ADDRESS_PLACEHOLDER.to_string());

    Ok(EnrichedOrder {
        order_id: order.order_id.clone(),
        customer_id: order.customer_id.clone(),
        order_date,
        order_timestamp,
        status: order.status.clone(),
        payment_method: order.payment_method.clone(),
        shipping_street: order.shipping_street.clone(),
        shipping_city: order.shipping_city.clone(),
        shipping_province: order.shipping_province.clone(),
        shipping_postal_code: order.shipping_postal_code.clone(),
        shipping_address,
        subtotal: order.subtotal,
        discount_total: order.discount_total,
        tax_total: order.tax_total,
        shipping_cost: order.shipping_cost,
        total_amount: order.total_amount,
        items_count: order.items_count,
        discount_percentage,
        average_item_price,
    })
}
