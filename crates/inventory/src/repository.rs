//! Data-access boundary for inventory records.
//!
//! Persistence lives behind this trait; the classifier and query engine
//! only ever see the output of [`InventoryRepository::list_inventory`].

use std::sync::Arc;

use thiserror::Error;

use stockroom_core::{DomainError, ItemId};

use crate::record::{InventoryRecord, ItemFields};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("inventory item {0} not found")]
    NotFound(ItemId),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Backend could not be reached or refused the request.
    #[error("inventory backend unavailable: {0}")]
    Unavailable(String),
}

/// CRUD access to inventory records.
pub trait InventoryRepository: Send + Sync {
    fn list_inventory(&self) -> Result<Vec<InventoryRecord>, RepositoryError>;
    fn create_item(&self, fields: ItemFields) -> Result<InventoryRecord, RepositoryError>;
    fn update_item(&self, id: ItemId, fields: ItemFields) -> Result<InventoryRecord, RepositoryError>;
    fn delete_item(&self, id: ItemId) -> Result<(), RepositoryError>;
}

impl<R> InventoryRepository for Arc<R>
where
    R: InventoryRepository + ?Sized,
{
    fn list_inventory(&self) -> Result<Vec<InventoryRecord>, RepositoryError> {
        (**self).list_inventory()
    }

    fn create_item(&self, fields: ItemFields) -> Result<InventoryRecord, RepositoryError> {
        (**self).create_item(fields)
    }

    fn update_item(&self, id: ItemId, fields: ItemFields) -> Result<InventoryRecord, RepositoryError> {
        (**self).update_item(id, fields)
    }

    fn delete_item(&self, id: ItemId) -> Result<(), RepositoryError> {
        (**self).delete_item(id)
    }
}
