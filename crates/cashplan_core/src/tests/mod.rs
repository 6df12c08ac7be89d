//! Integration tests for the cashplan projection engine
//!
//! Tests are organized by topic:
//! - `basic` - Core monthly loop mechanics and end-to-end scenarios
//! - `instruments` - Asset and liability invariants under random operations
//! - `cash_waterfall` - Cash strategies driven through the monthly loop
//! - `builder_dsl` - Builder DSL and serialized scenario configs
//! - `output` - Output lookups and chart packaging

mod cash_waterfall;

use tracing_subscriber::EnvFilter;

/// Route engine logs to the test harness. Set `RUST_LOG=cashplan_core=trace`
/// to see every settled month.
pub(crate) fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cashplan_core=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
