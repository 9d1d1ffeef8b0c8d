//! Status filter with item semi-join

use crate::records::ItemRecord;
use crate::transform::EnrichedOrder;
use std::collections::HashSet;

/// Keep orders whose status equals `target` (exact, case-sensitive) and
/// restrict items to the surviving orders' ids.
///
/// Both filters are stable: surviving rows keep their original relative
/// order. The item filter is a semi-join on `order_id`, never a predicate
/// on item fields. Empty input yields empty output.
pub fn filter_by_status(
    orders: Vec<EnrichedOrder>,
    items: Vec<ItemRecord>,
    target: &str,
) -> (Vec<EnrichedOrder>, Vec<ItemRecord>) {
    let kept: Vec<EnrichedOrder> = orders.into_iter().filter(|o| o.status == target).collect();

    let kept_items = {
        let ids: HashSet<&str> = kept.iter().map(|o| o.order_id.as_str()).collect();
        items
            .into_iter()
            .filter(|item| ids.contains(item.order_id.as_str()))
            .collect()
    };

    (kept, kept_items)
}
