//! Derived-column transforms and the status filter
//!
//! # Overview
//!
//! - [`transform`] enriches mapped orders with derived columns and parsed
//!   dates, returning a new record set.
//! - [`filter_by_status`] keeps finalized orders and semi-joins the item
//!   set down to the survivors.

mod engine;
mod filter;

pub use engine::{round2, transform, EnrichedOrder, NO_ADDRESS_PLACEHOLDER};
pub use filter::filter_by_status;
