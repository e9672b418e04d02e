//! Stock movements (stock history) and their effect on a record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemId, MovementId};

use crate::record::InventoryRecord;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    In,
    Out,
}

/// One row of an item's stock history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: MovementId,
    pub item_id: ItemId,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    /// Units moved; always positive, direction comes from `kind`.
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StockMovement {
    /// Signed change to the stock count.
    pub fn delta(&self) -> i64 {
        match self.kind {
            MovementKind::In => self.quantity,
            MovementKind::Out => -self.quantity,
        }
    }
}

/// Apply a movement, returning the updated record.
pub fn apply_movement(
    record: &InventoryRecord,
    movement: &StockMovement,
) -> DomainResult<InventoryRecord> {
    if movement.item_id != record.item_id() {
        return Err(DomainError::validation(format!(
            "movement {} targets item {}, not {}",
            movement.id,
            movement.item_id,
            record.item_id()
        )));
    }
    if movement.quantity <= 0 {
        return Err(DomainError::invalid_argument(format!(
            "movement quantity must be > 0 (got {})",
            movement.quantity
        )));
    }

    let new_quantity = record
        .quantity()
        .checked_add(movement.delta())
        .ok_or_else(|| DomainError::invalid_argument("movement overflows stock count"))?;
    if new_quantity < 0 {
        return Err(DomainError::conflict(format!(
            "stock cannot go negative (have {}, moving out {})",
            record.quantity(),
            movement.quantity
        )));
    }

    record.clone().with_quantity(new_quantity)
}

/// Movements of one item, oldest first.
pub fn history_for(item_id: ItemId, movements: &[StockMovement]) -> Vec<StockMovement> {
    let mut history: Vec<StockMovement> = movements
        .iter()
        .filter(|m| m.item_id == item_id)
        .cloned()
        .collect();
    history.sort_by_key(|m| m.date);
    history
}
