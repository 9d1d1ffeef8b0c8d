//! Record types and envelope mapping
//!
//! Flattens the raw nested JSON envelope (order header + nested item list)
//! into two independent flat record sets: orders and items.

mod mapper;
mod types;

pub use mapper::map_envelope;
pub use types::{ItemRecord, OrderRecord};
