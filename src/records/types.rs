//! Flat record types produced by the mapper

use serde::Serialize;

/// One order header, as extracted from the API (no derived columns yet).
///
/// `order_date` and `order_timestamp` are kept as the raw strings the API
/// sent; parsing them is the transform engine's job so an unparseable date
/// fails in one well-defined place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub customer_id: String,
    pub order_date: String,
    pub order_timestamp: Option<String>,
    pub status: String,
    pub payment_method: String,
    pub shipping_street: String,
    pub shipping_city: String,
    pub shipping_province: String,
    pub shipping_postal_code: String,
    /// Composite address; absent for some orders, normalized downstream.
    pub shipping_address: Option<String>,
    pub subtotal: f64,
    pub discount_total: f64,
    pub tax_total: f64,
    pub shipping_cost: f64,
    pub total_amount: f64,
    pub items_count: i64,
}

/// One order line-item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRecord {
    /// Foreign key to [`OrderRecord::order_id`]
    pub order_id: String,
    pub item_id: String,
    pub product_code: String,
    pub product_name: String,
    pub category: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub discount_percentage: f64,
    pub discount_amount: f64,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}
