//! Household cash-flow projection library
//!
//! This crate projects a household's finances forward one month at a time.
//! It supports:
//! - Incomes and expenses over date ranges with annual growth, or one-off
//! - Assets that compound monthly and never go negative
//! - Amortizing liabilities with fixed minimum payments
//! - Cash strategies that route each month's surplus or deficit into assets
//!   (single account, capped account, or a waterfall of both)
//! - A cash buffer that absorbs what the strategy can't place, including
//!   overdrafts repaid from later surpluses
//!
//! Results come back as series aligned to the simulated months, ready for an
//! external charting or reporting layer.
//!
//! # Builder DSL
//!
//! ```ignore
//! use cashplan_core::config::{AssetBuilder, LiabilityBuilder, ScenarioBuilder, SourceBuilder};
//! use cashplan_core::model::CashStrategy;
//!
//! let mut scenario = ScenarioBuilder::new()
//!     .start(2025, 1, 1)
//!     .years(10)
//!     .income(SourceBuilder::monthly("Salary", 6_000.0).growth(0.03))
//!     .expense(SourceBuilder::monthly("Rent", 2_200.0).growth(0.04))
//!     .liability(LiabilityBuilder::new("Car Loan", 18_000.0).rate(0.059).years(5))
//!     .asset(AssetBuilder::new("Savings").rate(0.04))
//!     .cash_handler(CashStrategy::basic("Savings"))
//!     .build_scenario()?;
//!
//! let output = scenario.run()?;
//! println!("net worth after 10 years: {:?}", output.final_net_worth());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod date_math;
pub mod error;
pub mod metrics;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{
    AssetBuilder, LiabilityBuilder, Scenario, ScenarioBuilder, ScenarioConfig, SourceBuilder,
};
pub use error::{Error, Result};
pub use simulation::{Plan, simulate, simulate_with_metrics};
