//! Stock policy: the configurable thresholds behind status derivation.

use serde::Serialize;

use crate::record::InventoryRecord;
use crate::status::{
    DEFAULT_CRITICAL_PERCENT, DEFAULT_MIN_QUANTITY, StockStatus, classify, in_critical_band,
};

/// Environment variable overriding [`StockPolicy::default_min_quantity`].
pub const ENV_DEFAULT_MIN_QUANTITY: &str = "STOCKROOM_DEFAULT_MIN_QUANTITY";
/// Environment variable overriding [`StockPolicy::critical_percent`].
pub const ENV_CRITICAL_PERCENT: &str = "STOCKROOM_CRITICAL_PERCENT";

/// Thresholds used when classifying records.
///
/// Built from defaults or through [`StockPolicy::from_lookup`], which
/// rejects a negative threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPolicy {
    /// Threshold for records without their own `min_quantity`.
    pub default_min_quantity: i64,
    /// Critical band as a percentage of a record's threshold.
    pub critical_percent: u32,
}

impl Default for StockPolicy {
    fn default() -> Self {
        Self {
            default_min_quantity: DEFAULT_MIN_QUANTITY,
            critical_percent: DEFAULT_CRITICAL_PERCENT,
        }
    }
}

impl StockPolicy {
    /// Load overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load overrides through an arbitrary key lookup.
    ///
    /// Unparsable or negative values are logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut policy = Self::default();

        if let Some(raw) = lookup(ENV_DEFAULT_MIN_QUANTITY) {
            match raw.trim().parse::<i64>() {
                Ok(v) if v >= 0 => policy.default_min_quantity = v,
                _ => tracing::warn!(
                    key = ENV_DEFAULT_MIN_QUANTITY,
                    value = %raw,
                    default = DEFAULT_MIN_QUANTITY,
                    "ignoring invalid stock policy value"
                ),
            }
        }

        if let Some(raw) = lookup(ENV_CRITICAL_PERCENT) {
            match raw.trim().parse::<u32>() {
                Ok(v) => policy.critical_percent = v,
                Err(_) => tracing::warn!(
                    key = ENV_CRITICAL_PERCENT,
                    value = %raw,
                    default = DEFAULT_CRITICAL_PERCENT,
                    "ignoring invalid stock policy value"
                ),
            }
        }

        policy
    }

    /// Effective threshold for a record.
    pub fn min_quantity_for(&self, record: &InventoryRecord) -> i64 {
        record.min_quantity().unwrap_or(self.default_min_quantity)
    }

    /// Derived status of a record.
    pub fn status_of(&self, record: &InventoryRecord) -> StockStatus {
        // Records validate non-negative quantity/threshold on construction.
        classify(record.quantity(), self.min_quantity_for(record))
    }

    /// Whether a record's quantity lies in the critical band.
    pub fn is_critical(&self, record: &InventoryRecord) -> bool {
        in_critical_band(
            record.quantity(),
            self.min_quantity_for(record),
            self.critical_percent,
        )
    }
}
