//! Client-side report aggregation: inventory value, category distribution
//! and low-stock alerts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockroom_core::ItemId;

use crate::policy::StockPolicy;
use crate::record::InventoryRecord;
use crate::status::StockStatus;

/// Label for records without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One slice of the inventory distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub name: String,
    pub items: usize,
    pub units: u64,
    /// Stock value in minor currency units.
    pub value: u64,
}

/// A record needing restock attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
    pub min_quantity: i64,
    pub status: StockStatus,
    /// Critical-band check applied to every alert, out-of-stock included.
    ///
    /// `InventorySummary::critical_stock` counts only low-stock records, so
    /// the number of critical alerts can exceed it.
    pub critical: bool,
}

fn units(record: &InventoryRecord) -> u64 {
    u64::try_from(record.quantity()).unwrap_or(0)
}

/// Total stock value (`price * quantity`) in minor units.
pub fn inventory_value(records: &[InventoryRecord]) -> u64 {
    records
        .iter()
        .map(|r| r.price().times(units(r)))
        .fold(0u64, u64::saturating_add)
}

/// Per-category item count, units and value; largest first.
pub fn category_distribution(records: &[InventoryRecord]) -> Vec<CategorySlice> {
    let mut by_name: BTreeMap<&str, CategorySlice> = BTreeMap::new();

    for record in records {
        let name = record.category().unwrap_or(UNCATEGORIZED);
        let slice = by_name.entry(name).or_insert_with(|| CategorySlice {
            name: name.to_string(),
            items: 0,
            units: 0,
            value: 0,
        });
        slice.items += 1;
        slice.units = slice.units.saturating_add(units(record));
        slice.value = slice.value.saturating_add(record.price().times(units(record)));
    }

    // BTreeMap yields names in order, so the stable sort breaks ties by name.
    let mut slices: Vec<CategorySlice> = by_name.into_values().collect();
    slices.sort_by(|a, b| b.units.cmp(&a.units));
    slices
}

/// Low-stock alerts under the default policy.
pub fn low_stock_alerts(records: &[InventoryRecord]) -> Vec<StockAlert> {
    low_stock_alerts_with(records, &StockPolicy::default())
}

/// Out-of-stock and low-stock records: critical first, then lowest quantity.
pub fn low_stock_alerts_with(records: &[InventoryRecord], policy: &StockPolicy) -> Vec<StockAlert> {
    let mut alerts: Vec<StockAlert> = records
        .iter()
        .filter_map(|record| {
            let status = policy.status_of(record);
            if status == StockStatus::InStock {
                return None;
            }
            Some(StockAlert {
                id: record.item_id(),
                name: record.name().to_string(),
                quantity: record.quantity(),
                min_quantity: policy.min_quantity_for(record),
                status,
                critical: policy.is_critical(record),
            })
        })
        .collect();

    alerts.sort_by(|a, b| {
        b.critical
            .cmp(&a.critical)
            .then(a.quantity.cmp(&b.quantity))
            .then(a.id.cmp(&b.id))
    });
    alerts
}
