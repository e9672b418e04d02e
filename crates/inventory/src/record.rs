//! Inventory record: the typed row the dashboard lists, filters and summarizes.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ItemId, OwnerId};

use crate::policy::StockPolicy;
use crate::price::Price;
use crate::status::{StockStatus, ensure_non_negative};

/// Create/update payload for an inventory item.
///
/// Everything except `id`, `status` and the timestamps. Validated by
/// [`InventoryRecord::new`] and [`InventoryRecord::with_fields`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFields {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub price: Price,
    #[serde(default, alias = "min_quantity")]
    pub min_quantity: Option<i64>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, rename = "user_id")]
    pub owner: Option<OwnerId>,
}

impl ItemFields {
    /// Fields for a named item with zero stock and no optional attributes.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            quantity: 0,
            price: Price::ZERO,
            min_quantity: None,
            tags: BTreeSet::new(),
            sku: None,
            description: None,
            image_url: None,
            owner: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        ensure_non_negative("quantity", self.quantity)?;
        if let Some(min) = self.min_quantity {
            ensure_non_negative("min_quantity", min)?;
        }
        Ok(())
    }
}

/// A validated inventory record.
///
/// Status is not a field: it is derived from quantity and threshold on every
/// read, so it can never go stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordRow", into = "RecordRow")]
pub struct InventoryRecord {
    id: ItemId,
    fields: ItemFields,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl InventoryRecord {
    pub fn new(id: ItemId, fields: ItemFields) -> DomainResult<Self> {
        fields.validate()?;
        Ok(Self {
            id,
            fields,
            created_at: None,
            updated_at: None,
        })
    }

    /// Replace all editable fields, keeping identity and timestamps.
    pub fn with_fields(mut self, fields: ItemFields) -> DomainResult<Self> {
        fields.validate()?;
        self.fields = fields;
        Ok(self)
    }

    /// Set a new stock count.
    pub fn with_quantity(mut self, quantity: i64) -> DomainResult<Self> {
        ensure_non_negative("quantity", quantity)?;
        self.fields.quantity = quantity;
        Ok(self)
    }

    pub fn with_timestamps(
        mut self,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn item_id(&self) -> ItemId {
        self.id
    }

    pub fn fields(&self) -> &ItemFields {
        &self.fields
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn category(&self) -> Option<&str> {
        self.fields.category.as_deref()
    }

    pub fn quantity(&self) -> i64 {
        self.fields.quantity
    }

    pub fn price(&self) -> Price {
        self.fields.price
    }

    /// Threshold as stored; `None` means the policy default applies.
    pub fn min_quantity(&self) -> Option<i64> {
        self.fields.min_quantity
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.fields.tags
    }

    pub fn sku(&self) -> Option<&str> {
        self.fields.sku.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.fields.description.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.fields.image_url.as_deref()
    }

    pub fn owner(&self) -> Option<OwnerId> {
        self.fields.owner
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Derived status under the default policy.
    pub fn status(&self) -> StockStatus {
        StockPolicy::default().status_of(self)
    }

    /// Critical-band check under the default policy.
    pub fn is_critical(&self) -> bool {
        StockPolicy::default().is_critical(self)
    }
}

impl Entity for InventoryRecord {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Wire shape of a backend row.
///
/// Key names follow the backend table as-is: camelCase for the item
/// attributes (`minQuantity`, `imageUrl`), snake_case for the row metadata
/// (`user_id`, `created_at`, `updated_at`).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecordRow {
    id: ItemId,
    #[serde(flatten)]
    fields: ItemFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<StockStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<RecordRow> for InventoryRecord {
    type Error = DomainError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let record = InventoryRecord::new(row.id, row.fields)?
            .with_timestamps(row.created_at, row.updated_at);

        if let Some(stored) = row.status {
            let derived = record.status();
            if stored != derived {
                tracing::debug!(
                    item_id = %record.id,
                    %stored,
                    %derived,
                    "ignoring stale stored status"
                );
            }
        }

        Ok(record)
    }
}

impl From<InventoryRecord> for RecordRow {
    fn from(record: InventoryRecord) -> Self {
        let status = Some(record.status());
        RecordRow {
            id: record.id,
            fields: record.fields,
            status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
