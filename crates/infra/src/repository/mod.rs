//! Data-access adapters implementing `InventoryRepository`.
//!
//! Only an in-memory adapter lives here; a hosted backend client would sit
//! beside it behind the same trait.

pub mod in_memory;

pub use in_memory::InMemoryInventoryRepository;
