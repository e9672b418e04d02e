//! Tracing/logging setup shared by every binary and test harness.

pub mod tracing;

pub use tracing::{LogFormat, ObservabilityConfig};

/// Initialize process-wide observability from the environment.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&ObservabilityConfig::from_env());
}
