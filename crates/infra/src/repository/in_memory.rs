use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::Utc;

use stockroom_core::{ItemId, MovementId};
use stockroom_inventory::{
    InventoryRecord, InventoryRepository, ItemFields, RepositoryError, StockMovement,
    apply_movement, history_for,
};

#[derive(Debug, Default)]
struct State {
    items: BTreeMap<ItemId, InventoryRecord>,
    movements: Vec<StockMovement>,
    last_item_id: u64,
    last_movement_id: u64,
}

/// In-memory inventory table plus stock history.
///
/// Intended for tests/dev. Ids are assigned sequentially from 1 and listing
/// is id-ordered.
#[derive(Debug, Default)]
pub struct InMemoryInventoryRepository {
    state: RwLock<State>,
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("lock poisoned".to_string())
}

impl InMemoryInventoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a repository from existing records, keeping their ids.
    pub fn with_records(records: impl IntoIterator<Item = InventoryRecord>) -> Self {
        let mut state = State::default();
        for record in records {
            state.last_item_id = state.last_item_id.max(record.item_id().get());
            state.items.insert(record.item_id(), record);
        }
        Self {
            state: RwLock::new(state),
        }
    }

    /// Move stock in or out of an item and append the movement to its history.
    ///
    /// The movement's `id` is replaced by the next sequential movement id.
    pub fn adjust_stock(&self, movement: StockMovement) -> Result<InventoryRecord, RepositoryError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;

        let current = state
            .items
            .get(&movement.item_id)
            .ok_or(RepositoryError::NotFound(movement.item_id))?;
        let updated = apply_movement(current, &movement)?
            .with_timestamps(current.created_at(), Some(Utc::now()));

        state.last_movement_id += 1;
        let movement = StockMovement {
            id: MovementId::new(state.last_movement_id),
            ..movement
        };

        tracing::info!(
            item_id = %movement.item_id,
            movement_id = %movement.id,
            delta = movement.delta(),
            quantity = updated.quantity(),
            status = %updated.status(),
            "stock adjusted"
        );

        state.items.insert(updated.item_id(), updated.clone());
        state.movements.push(movement);
        Ok(updated)
    }

    /// Stock history of one item, oldest first.
    pub fn stock_history(&self, item_id: ItemId) -> Result<Vec<StockMovement>, RepositoryError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(history_for(item_id, &state.movements))
    }
}

impl InventoryRepository for InMemoryInventoryRepository {
    fn list_inventory(&self) -> Result<Vec<InventoryRecord>, RepositoryError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.items.values().cloned().collect())
    }

    fn create_item(&self, fields: ItemFields) -> Result<InventoryRecord, RepositoryError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;

        let id = ItemId::new(state.last_item_id + 1);
        let now = Utc::now();
        let record = InventoryRecord::new(id, fields)?.with_timestamps(Some(now), Some(now));
        state.last_item_id = id.get();

        tracing::info!(item_id = %id, name = record.name(), status = %record.status(), "inventory item created");

        state.items.insert(id, record.clone());
        Ok(record)
    }

    fn update_item(&self, id: ItemId, fields: ItemFields) -> Result<InventoryRecord, RepositoryError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;

        let current = state.items.get(&id).ok_or(RepositoryError::NotFound(id))?;
        let created_at = current.created_at();
        let updated = current
            .clone()
            .with_fields(fields)?
            .with_timestamps(created_at, Some(Utc::now()));

        tracing::info!(item_id = %id, status = %updated.status(), "inventory item updated");

        state.items.insert(id, updated.clone());
        Ok(updated)
    }

    fn delete_item(&self, id: ItemId) -> Result<(), RepositoryError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        if state.items.remove(&id).is_none() {
            return Err(RepositoryError::NotFound(id));
        }
        tracing::info!(item_id = %id, "inventory item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    use stockroom_core::DomainError;
    use stockroom_inventory::{MovementKind, StockStatus};

    fn fields(name: &str, quantity: i64) -> ItemFields {
        ItemFields {
            quantity,
            min_quantity: Some(10),
            ..ItemFields::named(name)
        }
    }

    fn movement(item_id: ItemId, kind: MovementKind, quantity: i64) -> StockMovement {
        StockMovement {
            id: MovementId::new(0),
            item_id,
            date: DateTime::<Utc>::UNIX_EPOCH,
            kind,
            quantity,
            notes: Some("cycle count".to_string()),
        }
    }

    #[test]
    fn create_assigns_sequential_ids_and_timestamps() {
        let repo = InMemoryInventoryRepository::new();
        let a = repo.create_item(fields("Product A", 50)).unwrap();
        let b = repo.create_item(fields("Product B", 5)).unwrap();

        assert_eq!(a.item_id(), ItemId::new(1));
        assert_eq!(b.item_id(), ItemId::new(2));
        assert!(a.created_at().is_some());
        assert_eq!(b.status(), StockStatus::LowStock);

        let listed = repo.list_inventory().unwrap();
        assert_eq!(listed, vec![a, b]);
    }

    #[test]
    fn create_rejects_invalid_fields() {
        let repo = InMemoryInventoryRepository::new();
        let err = repo.create_item(fields("", 1)).unwrap_err();
        assert!(matches!(err, RepositoryError::Domain(DomainError::Validation(_))));
        assert!(repo.list_inventory().unwrap().is_empty());
    }

    #[test]
    fn update_rederives_status_and_keeps_created_at() {
        let repo = InMemoryInventoryRepository::new();
        let created = repo.create_item(fields("Product A", 50)).unwrap();

        let updated = repo.update_item(created.item_id(), fields("Product A", 0)).unwrap();
        assert_eq!(updated.status(), StockStatus::OutOfStock);
        assert_eq!(updated.created_at(), created.created_at());
    }

    #[test]
    fn update_and_delete_unknown_item_are_not_found() {
        let repo = InMemoryInventoryRepository::new();
        let missing = ItemId::new(99);
        assert_eq!(
            repo.update_item(missing, fields("X", 1)).unwrap_err(),
            RepositoryError::NotFound(missing)
        );
        assert_eq!(repo.delete_item(missing).unwrap_err(), RepositoryError::NotFound(missing));
    }

    #[test]
    fn delete_removes_item() {
        let repo = InMemoryInventoryRepository::new();
        let item = repo.create_item(fields("Product A", 50)).unwrap();
        repo.delete_item(item.item_id()).unwrap();
        assert!(repo.list_inventory().unwrap().is_empty());
    }

    #[test]
    fn seeded_repository_continues_id_sequence() {
        let seed = InventoryRecord::new(ItemId::new(7), fields("Seeded", 1)).unwrap();
        let repo = InMemoryInventoryRepository::with_records([seed]);
        let next = repo.create_item(fields("Next", 1)).unwrap();
        assert_eq!(next.item_id(), ItemId::new(8));
    }

    #[test]
    fn adjust_stock_updates_item_and_history() {
        let repo = InMemoryInventoryRepository::new();
        let item = repo.create_item(fields("Product A", 12)).unwrap();
        let id = item.item_id();

        let after = repo.adjust_stock(movement(id, MovementKind::Out, 4)).unwrap();
        assert_eq!(after.quantity(), 8);
        assert_eq!(after.status(), StockStatus::LowStock);

        repo.adjust_stock(movement(id, MovementKind::In, 20)).unwrap();

        let history = repo.stock_history(id).unwrap();
        let ids: Vec<u64> = history.iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(repo.list_inventory().unwrap()[0].quantity(), 28);
    }

    #[test]
    fn adjust_stock_rejects_overdraw_without_recording() {
        let repo = InMemoryInventoryRepository::new();
        let item = repo.create_item(fields("Product A", 2)).unwrap();
        let id = item.item_id();

        let err = repo.adjust_stock(movement(id, MovementKind::Out, 3)).unwrap_err();
        assert!(matches!(err, RepositoryError::Domain(DomainError::Conflict(_))));
        assert!(repo.stock_history(id).unwrap().is_empty());
        assert_eq!(repo.list_inventory().unwrap()[0].quantity(), 2);
    }

    #[test]
    fn adjust_stock_for_unknown_item_is_not_found() {
        let repo = InMemoryInventoryRepository::new();
        let err = repo
            .adjust_stock(movement(ItemId::new(3), MovementKind::In, 1))
            .unwrap_err();
        assert_eq!(err, RepositoryError::NotFound(ItemId::new(3)));
    }
}
