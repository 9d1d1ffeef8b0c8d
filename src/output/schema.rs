//! Fixed Arrow schemas and record to RecordBatch conversion
//!
//! Both dataset schemas are pinned, not inferred: downstream SQL models
//! depend on stable column names and types, so an empty day still produces
//! files with the full schema.

use crate::error::Result;
use crate::records::ItemRecord;
use crate::transform::EnrichedOrder;
use arrow::array::{
    ArrayRef, Date32Array, Float64Array, Int64Array, StringArray, TimestampMicrosecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use std::sync::Arc;

/// Days-from-CE of 1970-01-01, the Date32 epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Schema of the orders dataset.
pub fn orders_schema() -> Schema {
    Schema::new(vec![
        Field::new("order_id", DataType::Utf8, false),
        Field::new("customer_id", DataType::Utf8, false),
        Field::new("order_date", DataType::Date32, false),
        Field::new(
            "order_timestamp",
            DataType::Timestamp(TimeUnit::Microsecond, None),
            true,
        ),
        Field::new("status", DataType::Utf8, false),
        Field::new("payment_method", DataType::Utf8, false),
        Field::new("shipping_street", DataType::Utf8, false),
        Field::new("shipping_city", DataType::Utf8, false),
        Field::new("shipping_province", DataType::Utf8, false),
        Field::new("shipping_postal_code", DataType::Utf8, false),
        Field::new("shipping_address", DataType::Utf8, false),
        Field::new("subtotal", DataType::Float64, false),
        Field::new("discount_total", DataType::Float64, false),
        Field::new("tax_total", DataType::Float64, false),
        Field::new("shipping_cost", DataType::Float64, false),
        Field::new("total_amount", DataType::Float64, false),
        Field::new("items_count", DataType::Int64, false),
        Field::new("discount_percentage", DataType::Float64, false),
        Field::new("average_item_price", DataType::Float64, false),
    ])
}

/// Schema of the items dataset.
pub fn items_schema() -> Schema {
    Schema::new(vec![
        Field::new("order_id", DataType::Utf8, false),
        Field::new("item_id", DataType::Utf8, false),
        Field::new("product_code", DataType::Utf8, false),
        Field::new("product_name", DataType::Utf8, false),
        Field::new("category", DataType::Utf8, false),
        Field::new("quantity", DataType::Int64, false),
        Field::new("unit_price", DataType::Float64, false),
        Field::new("discount_percentage", DataType::Float64, false),
        Field::new("discount_amount", DataType::Float64, false),
        Field::new("subtotal", DataType::Float64, false),
        Field::new("tax_amount", DataType::Float64, false),
        Field::new("total", DataType::Float64, false),
    ])
}

fn date32(date: NaiveDate) -> i32 {
    use chrono::Datelike;
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn string_column<'a, I: Iterator<Item = &'a str>>(values: I) -> ArrayRef {
    Arc::new(StringArray::from(values.collect::<Vec<_>>()))
}

/// Convert enriched orders into a RecordBatch of [`orders_schema`].
///
/// An empty slice yields a zero-row batch carrying the full schema.
pub fn orders_to_batch(orders: &[EnrichedOrder]) -> Result<RecordBatch> {
    let timestamps: Vec<Option<i64>> = orders
        .iter()
        .map(|o| o.order_timestamp.map(|ts| ts.and_utc().timestamp_micros()))
        .collect();

    let columns: Vec<ArrayRef> = vec![
        string_column(orders.iter().map(|o| o.order_id.as_str())),
        string_column(orders.iter().map(|o| o.customer_id.as_str())),
        Arc::new(Date32Array::from(
            orders.iter().map(|o| date32(o.order_date)).collect::<Vec<_>>(),
        )),
        Arc::new(TimestampMicrosecondArray::from(timestamps)),
        string_column(orders.iter().map(|o| o.status.as_str())),
        string_column(orders.iter().map(|o| o.payment_method.as_str())),
        string_column(orders.iter().map(|o| o.shipping_street.as_str())),
        string_column(orders.iter().map(|o| o.shipping_city.as_str())),
        string_column(orders.iter().map(|o| o.shipping_province.as_str())),
        string_column(orders.iter().map(|o| o.shipping_postal_code.as_str())),
        string_column(orders.iter().map(|o| o.shipping_address.as_str())),
        Arc::new(Float64Array::from(
            orders.iter().map(|o| o.subtotal).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            orders.iter().map(|o| o.discount_total).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            orders.iter().map(|o| o.tax_total).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            orders.iter().map(|o| o.shipping_cost).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            orders.iter().map(|o| o.total_amount).collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from(
            orders.iter().map(|o| o.items_count).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            orders
                .iter()
                .map(|o| o.discount_percentage)
                .collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            orders
                .iter()
                .map(|o| o.average_item_price)
                .collect::<Vec<_>>(),
        )),
    ];

    Ok(RecordBatch::try_new(Arc::new(orders_schema()), columns)?)
}

/// Convert item records into a RecordBatch of [`items_schema`].
pub fn items_to_batch(items: &[ItemRecord]) -> Result<RecordBatch> {
    let columns: Vec<ArrayRef> = vec![
        string_column(items.iter().map(|i| i.order_id.as_str())),
        string_column(items.iter().map(|i| i.item_id.as_str())),
        string_column(items.iter().map(|i| i.product_code.as_str())),
        string_column(items.iter().map(|i| i.product_name.as_str())),
        string_column(items.iter().map(|i| i.category.as_str())),
        Arc::new(Int64Array::from(
            items.iter().map(|i| i.quantity).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            items.iter().map(|i| i.unit_price).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            items
                .iter()
                .map(|i| i.discount_percentage)
                .collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            items.iter().map(|i| i.discount_amount).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            items.iter().map(|i| i.subtotal).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            items.iter().map(|i| i.tax_amount).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            items.iter().map(|i| i.total).collect::<Vec<_>>(),
        )),
    ];

    Ok(RecordBatch::try_new(Arc::new(items_schema()), columns)?)
}
