//! Inventory domain module: stock classification and query engine.
//!
//! Pure, deterministic logic over in-memory inventory records (no IO, no
//! HTTP, no storage). Callers own the record collection and the current
//! filter criteria and re-invoke these functions on every query.

pub mod filter;
pub mod movement;
pub mod policy;
pub mod price;
pub mod record;
pub mod report;
pub mod repository;
pub mod status;
pub mod summary;

pub use filter::{FilterCriteria, filter_and_search, filter_and_search_with, matches, matches_with};
pub use movement::{MovementKind, StockMovement, apply_movement, history_for};
pub use policy::StockPolicy;
pub use price::Price;
pub use record::{InventoryRecord, ItemFields};
pub use report::{
    CategorySlice, StockAlert, UNCATEGORIZED, category_distribution, inventory_value,
    low_stock_alerts, low_stock_alerts_with,
};
pub use repository::{InventoryRepository, RepositoryError};
pub use status::{
    DEFAULT_CRITICAL_PERCENT, DEFAULT_MIN_QUANTITY, StockStatus, derive_status, is_critical,
};
pub use summary::{InventorySummary, summarize, summarize_with};
