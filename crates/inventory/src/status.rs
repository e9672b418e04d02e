//! Stock status derivation.
//!
//! Status is never stored independently: it is always a function of
//! `(quantity, min_quantity)`.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult};

/// Threshold applied when a record carries no `min_quantity`.
pub const DEFAULT_MIN_QUANTITY: i64 = 5;

/// Critical band as a percentage of the threshold (`min_quantity * 0.2`).
pub const DEFAULT_CRITICAL_PERCENT: u32 = 20;

/// Stock level classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 3] = [Self::InStock, Self::LowStock, Self::OutOfStock];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-stock" => Ok(StockStatus::InStock),
            "low-stock" => Ok(StockStatus::LowStock),
            "out-of-stock" => Ok(StockStatus::OutOfStock),
            other => Err(DomainError::validation(format!("unknown stock status: {other}"))),
        }
    }
}

/// Classify a stock level.
///
/// `quantity == min_quantity` is low-stock; `min_quantity == 0` makes every
/// positive quantity in-stock. Negative inputs are rejected.
pub fn derive_status(quantity: i64, min_quantity: i64) -> DomainResult<StockStatus> {
    ensure_non_negative("quantity", quantity)?;
    ensure_non_negative("min_quantity", min_quantity)?;
    Ok(classify(quantity, min_quantity))
}

/// Whether a stock level falls in the critical band (`quantity <= min_quantity * 0.2`).
///
/// Always `false` when `min_quantity == 0`.
pub fn is_critical(quantity: i64, min_quantity: i64) -> DomainResult<bool> {
    ensure_non_negative("quantity", quantity)?;
    ensure_non_negative("min_quantity", min_quantity)?;
    Ok(in_critical_band(quantity, min_quantity, DEFAULT_CRITICAL_PERCENT))
}

pub(crate) fn ensure_non_negative(field: &str, value: i64) -> DomainResult<()> {
    if value < 0 {
        return Err(DomainError::invalid_argument(format!(
            "{field} must be >= 0 (got {value})"
        )));
    }
    Ok(())
}

/// Infallible classification for values already known to be non-negative.
pub(crate) fn classify(quantity: i64, min_quantity: i64) -> StockStatus {
    if quantity == 0 {
        StockStatus::OutOfStock
    } else if quantity <= min_quantity {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

/// `quantity <= min_quantity * percent / 100`, evaluated exactly in integers.
pub(crate) fn in_critical_band(quantity: i64, min_quantity: i64, percent: u32) -> bool {
    if min_quantity == 0 {
        return false;
    }
    i128::from(quantity) * 100 <= i128::from(min_quantity) * i128::from(percent)
}
