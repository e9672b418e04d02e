//! Dashboard read service: fetch fresh records, then run the pure
//! classifier/query engine over them.

use serde::Serialize;

use stockroom_inventory::{
    CategorySlice, FilterCriteria, InventoryRecord, InventoryRepository, InventorySummary,
    RepositoryError, StockAlert, StockPolicy, category_distribution, filter_and_search_with,
    inventory_value, low_stock_alerts_with, summarize_with,
};

/// Everything the inventory page renders for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Counts over the full collection, independent of the filter.
    pub summary: InventorySummary,
    /// Filtered records, in repository order.
    pub items: Vec<InventoryRecord>,
    pub alerts: Vec<StockAlert>,
    pub distribution: Vec<CategorySlice>,
    /// Total stock value in minor currency units.
    pub total_value: u64,
}

/// Stateless between calls apart from its repository handle and policy.
#[derive(Debug)]
pub struct InventoryDashboard<R> {
    repository: R,
    policy: StockPolicy,
}

impl<R> InventoryDashboard<R>
where
    R: InventoryRepository,
{
    pub fn new(repository: R) -> Self {
        Self::with_policy(repository, StockPolicy::default())
    }

    pub fn with_policy(repository: R, policy: StockPolicy) -> Self {
        Self { repository, policy }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn policy(&self) -> &StockPolicy {
        &self.policy
    }

    /// Build the view for `criteria` from a fresh listing.
    #[tracing::instrument(level = "debug", skip(self, criteria), fields(search = %criteria.search_term))]
    pub fn view(&self, criteria: &FilterCriteria) -> Result<DashboardView, RepositoryError> {
        let records = self.repository.list_inventory()?;

        let view = DashboardView {
            summary: summarize_with(&records, &self.policy),
            items: filter_and_search_with(&records, criteria, &self.policy),
            alerts: low_stock_alerts_with(&records, &self.policy),
            distribution: category_distribution(&records),
            total_value: inventory_value(&records),
        };

        tracing::debug!(
            total = view.summary.total,
            matched = view.items.len(),
            low_stock = view.summary.low_stock,
            out_of_stock = view.summary.out_of_stock,
            "dashboard view built"
        );

        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use stockroom_core::ItemId;
    use stockroom_inventory::{ItemFields, Price, StockStatus};

    use crate::repository::InMemoryInventoryRepository;

    /// Backend that is always down.
    struct Offline;

    impl InventoryRepository for Offline {
        fn list_inventory(&self) -> Result<Vec<InventoryRecord>, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".to_string()))
        }

        fn create_item(&self, _: ItemFields) -> Result<InventoryRecord, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".to_string()))
        }

        fn update_item(&self, _: ItemId, _: ItemFields) -> Result<InventoryRecord, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".to_string()))
        }

        fn delete_item(&self, _: ItemId) -> Result<(), RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".to_string()))
        }
    }

    fn seeded() -> Arc<InMemoryInventoryRepository> {
        let repo = Arc::new(InMemoryInventoryRepository::new());
        repo.create_item(ItemFields {
            category: Some("Electronics".to_string()),
            quantity: 50,
            price: Price::from_minor(100_000),
            min_quantity: Some(10),
            sku: Some("PROD-A-001".to_string()),
            ..ItemFields::named("Product A")
        })
        .unwrap();
        repo.create_item(ItemFields {
            category: Some("Accessories".to_string()),
            quantity: 5,
            price: Price::from_minor(50_000),
            min_quantity: Some(10),
            sku: Some("PROD-B-001".to_string()),
            ..ItemFields::named("Product B")
        })
        .unwrap();
        repo
    }

    #[test]
    fn view_combines_summary_and_filtered_items() {
        let dashboard = InventoryDashboard::new(seeded());
        let view = dashboard
            .view(&FilterCriteria::new().status(StockStatus::LowStock))
            .unwrap();

        assert_eq!(view.summary.total, 2);
        assert_eq!(view.summary.low_stock, 1);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].name(), "Product B");
        assert_eq!(view.alerts.len(), 1);
        assert_eq!(view.distribution.len(), 2);
        assert_eq!(view.total_value, 50 * 100_000 + 5 * 50_000);
    }

    #[test]
    fn view_reflects_writes_made_between_calls() {
        let repo = seeded();
        let dashboard = InventoryDashboard::new(Arc::clone(&repo));
        let criteria = FilterCriteria::new().search("prod");

        assert_eq!(dashboard.view(&criteria).unwrap().items.len(), 2);

        repo.delete_item(ItemId::new(1)).unwrap();
        let view = dashboard.view(&criteria).unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.summary.total, 1);
    }

    #[test]
    fn policy_is_applied_to_every_derivation() {
        let repo = Arc::new(InMemoryInventoryRepository::new());
        repo.create_item(ItemFields {
            quantity: 8,
            ..ItemFields::named("No threshold")
        })
        .unwrap();

        let default_view = InventoryDashboard::new(Arc::clone(&repo))
            .view(&FilterCriteria::new())
            .unwrap();
        assert_eq!(default_view.summary.low_stock, 0);

        let strict = StockPolicy {
            default_min_quantity: 10,
            ..StockPolicy::default()
        };
        let strict_view = InventoryDashboard::with_policy(repo, strict)
            .view(&FilterCriteria::new().status(StockStatus::LowStock))
            .unwrap();
        assert_eq!(strict_view.summary.low_stock, 1);
        assert_eq!(strict_view.items.len(), 1);
        assert_eq!(strict_view.alerts[0].min_quantity, 10);
    }

    #[test]
    fn empty_repository_yields_zeroed_view() {
        let dashboard = InventoryDashboard::new(InMemoryInventoryRepository::new());
        let view = dashboard.view(&FilterCriteria::new()).unwrap();
        assert_eq!(view.summary, InventorySummary::default());
        assert!(view.items.is_empty());
        assert_eq!(view.total_value, 0);
    }

    #[test]
    fn backend_failure_propagates() {
        let dashboard = InventoryDashboard::new(Offline);
        let err = dashboard.view(&FilterCriteria::new()).unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));
    }
}
