//! Tests for the output module

use super::*;
use crate::records::ItemRecord;
use crate::records::OrderRecord;
use crate::transform::{transform, EnrichedOrder};
use arrow::array::{Date32Array, Float64Array, StringArray};
use arrow::datatypes::DataType;
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use pretty_assertions::assert_eq;
use std::fs::File;
use tempfile::tempdir;

fn enriched(id: &str) -> EnrichedOrder {
    let order = OrderRecord {
        order_id: id.to_string(),
        customer_id: "CUST-001".to_string(),
        order_date: "2025-11-15".to_string(),
        order_timestamp: Some("2025-11-15T10:00:00".to_string()),
        status: "delivered".to_string(),
        payment_method: "credit_card".to_string(),
        shipping_street: "Av. Corrientes 1234".to_string(),
        shipping_city: "Palermo".to_string(),
        shipping_province: "CABA".to_string(),
        shipping_postal_code: "1425".to_string(),
        shipping_address: None,
        subtotal: 100.0,
        discount_total: 10.0,
        tax_total: 18.9,
        shipping_cost: 50.0,
        total_amount: 158.9,
        items_count: 1,
    };
    transform(&[order]).unwrap().remove(0)
}

fn item(order_id: &str) -> ItemRecord {
    ItemRecord {
        order_id: order_id.to_string(),
        item_id: format!("{order_id}-I0"),
        product_code: "SKU-1".to_string(),
        product_name: "Yerba Mate 1kg".to_string(),
        category: "almacen".to_string(),
        quantity: 2,
        unit_price: 50.0,
        discount_percentage: 0.0,
        discount_amount: 0.0,
        subtotal: 100.0,
        tax_amount: 21.0,
        total: 121.0,
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ============================================================================
// Schema Tests
// ============================================================================

#[test]
fn test_orders_schema_shape() {
    let schema = orders_schema();
    assert_eq!(schema.fields().len(), 19);

    let order_date = schema.field_with_name("order_date").unwrap();
    assert_eq!(order_date.data_type(), &DataType::Date32);
    assert!(!order_date.is_nullable());

    let ts = schema.field_with_name("order_timestamp").unwrap();
    assert!(ts.is_nullable());

    let derived = schema.field_with_name("discount_percentage").unwrap();
    assert_eq!(derived.data_type(), &DataType::Float64);
}

#[test]
fn test_items_schema_shape() {
    let schema = items_schema();
    assert_eq!(schema.fields().len(), 12);
    assert_eq!(
        schema.field_with_name("quantity").unwrap().data_type(),
        &DataType::Int64
    );
    assert_eq!(
        schema.field_with_name("order_id").unwrap().data_type(),
        &DataType::Utf8
    );
}

// ============================================================================
// Batch Conversion Tests
// ============================================================================

#[test]
fn test_orders_to_batch_values() {
    let batch = orders_to_batch(&[enriched("ORD-001")]).unwrap();
    assert_eq!(batch.num_rows(), 1);
    assert_eq!(batch.num_columns(), 19);

    let schema = batch.schema();
    let ids = batch
        .column(schema.index_of("order_id").unwrap())
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(ids.value(0), "ORD-001");

    let addresses = batch
        .column(schema.index_of("shipping_address").unwrap())
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(addresses.value(0), "Sin direccion");

    let dates = batch
        .column(schema.index_of("order_date").unwrap())
        .as_any()
        .downcast_ref::<Date32Array>()
        .unwrap();
    // 2025-11-15 in days since 1970-01-01
    assert_eq!(
        dates.value(0),
        (date("2025-11-15") - date("1970-01-01")).num_days() as i32
    );

    let derived = batch
        .column(schema.index_of("average_item_price").unwrap())
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert_eq!(derived.value(0), 158.9);
}

#[test]
fn test_items_to_batch_values() {
    let batch = items_to_batch(&[item("ORD-001"), item("ORD-002")]).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 12);
}

#[test]
fn test_empty_batches_keep_schema() {
    let orders = orders_to_batch(&[]).unwrap();
    assert_eq!(orders.num_rows(), 0);
    assert_eq!(orders.schema().fields().len(), 19);

    let items = items_to_batch(&[]).unwrap();
    assert_eq!(items.num_rows(), 0);
    assert_eq!(items.schema().fields().len(), 12);
}

// ============================================================================
// Dataset Writer Tests
// ============================================================================

#[test]
fn test_write_run_creates_both_files() {
    let dir = tempdir().unwrap();
    let writer = DatasetWriter::new(dir.path());

    let run_date = date("2025-11-15");
    let orders = orders_to_batch(&[enriched("ORD-001")]).unwrap();
    let items = items_to_batch(&[item("ORD-001")]).unwrap();

    let paths = writer.write_run(run_date, &orders, &items).unwrap();

    assert_eq!(paths.orders, dir.path().join("orders_2025-11-15.parquet"));
    assert_eq!(paths.items, dir.path().join("items_2025-11-15.parquet"));
    assert!(paths.orders.exists());
    assert!(paths.items.exists());

    // No temp files left behind.
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "part"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_write_run_round_trip() {
    let dir = tempdir().unwrap();
    let writer = DatasetWriter::new(dir.path());

    let run_date = date("2025-11-15");
    let orders = orders_to_batch(&[enriched("ORD-001"), enriched("ORD-002")]).unwrap();
    let items = items_to_batch(&[item("ORD-001")]).unwrap();
    let paths = writer.write_run(run_date, &orders, &items).unwrap();

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&paths.orders).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let batches: Vec<_> = reader.map(|b| b.unwrap()).collect();
    let total_rows: usize = batches.iter().map(arrow::record_batch::RecordBatch::num_rows).sum();
    assert_eq!(total_rows, 2);

    let ids = batches[0]
        .column(batches[0].schema().index_of("order_id").unwrap())
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap()
        .iter()
        .map(|v| v.unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["ORD-001", "ORD-002"]);
}

#[test]
fn test_write_run_is_byte_identical() {
    let dir = tempdir().unwrap();
    let writer = DatasetWriter::new(dir.path());

    let run_date = date("2025-11-15");
    let orders = orders_to_batch(&[enriched("ORD-001")]).unwrap();
    let items = items_to_batch(&[item("ORD-001")]).unwrap();

    let paths = writer.write_run(run_date, &orders, &items).unwrap();
    let first_orders = std::fs::read(&paths.orders).unwrap();
    let first_items = std::fs::read(&paths.items).unwrap();

    let paths = writer.write_run(run_date, &orders, &items).unwrap();
    assert_eq!(std::fs::read(&paths.orders).unwrap(), first_orders);
    assert_eq!(std::fs::read(&paths.items).unwrap(), first_items);
}

#[test]
fn test_write_run_empty_datasets() {
    let dir = tempdir().unwrap();
    let writer = DatasetWriter::new(dir.path());

    let run_date = date("2025-11-16");
    let orders = orders_to_batch(&[]).unwrap();
    let items = items_to_batch(&[]).unwrap();
    let paths = writer.write_run(run_date, &orders, &items).unwrap();

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&paths.orders).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let total_rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
    assert_eq!(total_rows, 0);
}

#[test]
fn test_writer_config_builder() {
    let config = ParquetWriterConfig::new()
        .uncompressed()
        .with_row_group_size(128);
    let writer = DatasetWriter::new("/tmp/out").with_config(config);

    let run_date = date("2025-01-01");
    assert_eq!(
        writer.orders_path(run_date),
        std::path::Path::new("/tmp/out/orders_2025-01-01.parquet")
    );
    assert_eq!(
        writer.items_path(run_date),
        std::path::Path::new("/tmp/out/items_2025-01-01.parquet")
    );
}
