//! Envelope to record mapping
//!
//! Pure function over the raw envelope: one pass over the `orders` array,
//! one `OrderRecord` per element plus one `ItemRecord` per nested item.
//! Missing required fields fail the whole batch; nothing is defaulted
//! silently.

use crate::client::RawEnvelope;
use crate::error::{Error, Result};
use crate::records::{ItemRecord, OrderRecord};
use serde_json::{Map, Value};

/// Map the raw envelope into flat order and item record sets.
///
/// Input order is preserved in both outputs. The only optional fields are
/// `order_timestamp` and `shipping_address`; every other absence (or wrong
/// JSON type) is a [`Error::Schema`] naming the offending field.
pub fn map_envelope(envelope: &RawEnvelope) -> Result<(Vec<OrderRecord>, Vec<ItemRecord>)> {
    let mut orders = Vec::with_capacity(envelope.orders.len());
    let mut items = Vec::new();

    for (index, raw) in envelope.orders.iter().enumerate() {
        let context = format!("order at index {index}");
        let obj = as_object(raw, &context)?;

        let order_id = require_str(obj, "order_id", &context)?;

        orders.push(OrderRecord {
            order_id: order_id.clone(),
            customer_id: require_str(obj, "customer_id", &context)?,
            order_date: require_str(obj, "order_date", &context)?,
            order_timestamp: optional_str(obj, "order_timestamp", &context)?,
            status: require_str(obj, "status", &context)?,
            payment_method: require_str(obj, "payment_method", &context)?,
            shipping_street: require_str(obj, "shipping_street", &context)?,
            shipping_city: require_str(obj, "shipping_city", &context)?,
            shipping_province: require_str(obj, "shipping_province", &context)?,
            shipping_postal_code: require_str(obj, "shipping_postal_code", &context)?,
            shipping_address: optional_str(obj, "shipping_address", &context)?,
            subtotal: require_f64(obj, "subtotal", &context)?,
            discount_total: require_f64(obj, "discount_total", &context)?,
            tax_total: require_f64(obj, "tax_total", &context)?,
            shipping_cost: require_f64(obj, "shipping_cost", &context)?,
            total_amount: require_f64(obj, "total_amount", &context)?,
            items_count: require_i64(obj, "items_count", &context)?,
        });

        let raw_items = match obj.get("items") {
            Some(Value::Array(arr)) => arr,
            _ => return Err(Error::schema("items", context)),
        };

        for (item_index, raw_item) in raw_items.iter().enumerate() {
            let item_context = format!("item {item_index} of order '{order_id}'");
            let item = as_object(raw_item, &item_context)?;

            items.push(ItemRecord {
                order_id: order_id.clone(),
                item_id: require_str(item, "item_id", &item_context)?,
                product_code: require_str(item, "product_code", &item_context)?,
                product_name: require_str(item, "product_name", &item_context)?,
                category: require_str(item, "category", &item_context)?,
                quantity: require_i64(item, "quantity", &item_context)?,
                unit_price: require_f64(item, "unit_price", &item_context)?,
                discount_percentage: require_f64(item, "discount_percentage", &item_context)?,
                discount_amount: require_f64(item, "discount_amount", &item_context)?,
                subtotal: require_f64(item, "subtotal", &item_context)?,
                tax_amount: require_f64(item, "tax_amount", &item_context)?,
                total: require_f64(item, "total", &item_context)?,
            });
        }
    }

    Ok((orders, items))
}

fn as_object<'a>(value: &'a Value, context: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::schema("(record)", context))
}

fn require_str(obj: &Map<String, Value>, field: &str, context: &str) -> Result<String> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| Error::schema(field, context))
}

fn optional_str(obj: &Map<String, Value>, field: &str, context: &str) -> Result<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(Error::schema(field, context)),
    }
}

fn require_f64(obj: &Map<String, Value>, field: &str, context: &str) -> Result<f64> {
    obj.get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::schema(field, context))
}

fn require_i64(obj: &Map<String, Value>, field: &str, context: &str) -> Result<i64> {
    obj.get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::schema(field, context))
}
