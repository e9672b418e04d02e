//! Infrastructure layer: data-access adapters and the dashboard read service.

pub mod dashboard;
pub mod repository;

pub use dashboard::{DashboardView, InventoryDashboard};
pub use repository::InMemoryInventoryRepository;
