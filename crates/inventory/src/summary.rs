//! Aggregate stock counts for the dashboard metric cards.

use serde::{Deserialize, Serialize};

use crate::policy::StockPolicy;
use crate::record::InventoryRecord;
use crate::status::StockStatus;

/// Counts over a record collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total: usize,
    pub low_stock: usize,
    /// Low-stock records inside the critical band.
    pub critical_stock: usize,
    pub out_of_stock: usize,
}

/// Summarize under the default policy.
pub fn summarize(records: &[InventoryRecord]) -> InventorySummary {
    summarize_with(records, &StockPolicy::default())
}

/// Single pass over `records`; every status is re-derived, never read from
/// a stored field.
pub fn summarize_with(records: &[InventoryRecord], policy: &StockPolicy) -> InventorySummary {
    records
        .iter()
        .fold(InventorySummary::default(), |mut acc, record| {
            acc.total += 1;
            match policy.status_of(record) {
                StockStatus::OutOfStock => acc.out_of_stock += 1,
                StockStatus::LowStock => {
                    acc.low_stock += 1;
                    if policy.is_critical(record) {
                        acc.critical_stock += 1;
                    }
                }
                StockStatus::InStock => {}
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use stockroom_core::ItemId;

    use crate::record::ItemFields;

    fn record(id: u64, quantity: i64, min_quantity: i64) -> InventoryRecord {
        InventoryRecord::new(
            ItemId::new(id),
            ItemFields {
                quantity,
                min_quantity: Some(min_quantity),
                ..ItemFields::named(format!("Item {id}"))
            },
        )
        .unwrap()
    }

    #[test]
    fn empty_collection_reports_zero() {
        assert_eq!(summarize(&[]), InventorySummary::default());
    }

    #[test]
    fn mixed_collection_counts_each_band() {
        let records = vec![record(1, 0, 5), record(2, 3, 5), record(2, 10, 5)];
        assert_eq!(
            summarize(&records),
            InventorySummary {
                total: 3,
                low_stock: 1,
                critical_stock: 0,
                out_of_stock: 1,
            }
        );
    }

    #[test]
    fn critical_counts_low_stock_records_in_band() {
        let records = vec![record(1, 1, 5), record(2, 2, 10), record(3, 3, 10), record(4, 0, 10)];
        let summary = summarize(&records);
        assert_eq!(summary.low_stock, 3);
        assert_eq!(summary.critical_stock, 2);
        assert_eq!(summary.out_of_stock, 1);
    }

    #[test]
    fn policy_changes_critical_band() {
        let records = vec![record(1, 3, 10)];
        let wide = StockPolicy {
            critical_percent: 50,
            ..StockPolicy::default()
        };
        assert_eq!(summarize(&records).critical_stock, 0);
        assert_eq!(summarize_with(&records, &wide).critical_stock, 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: summarizing twice yields the same counts, and the bands
        /// never exceed the total.
        #[test]
        fn summarize_is_idempotent(levels in prop::collection::vec((0i64..50, 0i64..20), 0..40)) {
            let records: Vec<InventoryRecord> = levels
                .iter()
                .enumerate()
                .map(|(i, (q, m))| record(i as u64, *q, *m))
                .collect();

            let first = summarize(&records);
            prop_assert_eq!(first, summarize(&records));
            prop_assert_eq!(first.total, records.len());
            prop_assert!(first.low_stock + first.out_of_stock <= first.total);
            prop_assert!(first.critical_stock <= first.low_stock);
        }
    }
}
