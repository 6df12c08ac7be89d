//! Scenario configuration
//!
//! [`ScenarioConfig`] is the plain, serializable description of a projection:
//! the month range plus named sources, instruments and a cash strategy, with
//! rates as raw ratios. [`Scenario::from_config`] validates it and builds the
//! runtime [`Plan`] that [`simulate`](crate::simulation::simulate) consumes.
//!
//! # Builder DSL
//!
//! ```ignore
//! use cashplan_core::config::{AssetBuilder, LiabilityBuilder, ScenarioBuilder, SourceBuilder};
//! use cashplan_core::model::CashStrategy;
//!
//! let config = ScenarioBuilder::new()
//!     .start(2025, 1, 1)
//!     .months(360)
//!     .income(SourceBuilder::monthly("Salary", 8_000.0).growth(0.03))
//!     .expense(SourceBuilder::monthly("Living", 4_500.0))
//!     .liability(LiabilityBuilder::new("Mortgage", 350_000.0).rate(0.065).months(360))
//!     .asset(AssetBuilder::new("Emergency Fund"))
//!     .asset(AssetBuilder::new("Brokerage").value(25_000.0).rate(0.06))
//!     .cash_handler(CashStrategy::sequential([
//!         CashStrategy::max_value("Emergency Fund", 30_000.0),
//!         CashStrategy::basic("Brokerage"),
//!     ]))
//!     .build()?;
//!
//! let output = Scenario::from_config(&config)?.run()?;
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

pub mod builder;
pub mod instrument_builder;
pub mod source_builder;

pub use builder::ScenarioBuilder;
pub use instrument_builder::{AssetBuilder, LiabilityBuilder};
pub use source_builder::SourceBuilder;

use crate::date_math::monthly_date_range;
use crate::error::{Error, Result};
use crate::metrics::SimulationMetrics;
use crate::model::{
    AnnualFixedRate, Asset, CashFlowSource, CashStrategy, DateRangeSource, Liability, NamedMap,
    OneTimeSource, Output,
};
use crate::simulation::{Plan, simulate, simulate_with_metrics};

/// How a named source produces its amounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceKind {
    /// Recurring monthly amount between `start` and optional `end`
    DateRange {
        amount: f64,
        start: Date,
        #[serde(default)]
        end: Option<Date>,
        #[serde(default)]
        growth: f64,
    },
    /// A single amount on a first-of-month `date`
    OneTime { amount: f64, date: Date },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    #[serde(flatten)]
    pub kind: SourceKind,
}

impl SourceConfig {
    fn to_source(&self) -> Result<CashFlowSource> {
        let source = match &self.kind {
            SourceKind::DateRange {
                amount,
                start,
                end,
                growth,
            } => {
                let mut source = DateRangeSource::new(*amount, *start)
                    .with_growth(AnnualFixedRate::new(*growth)?);
                source.end = *end;
                CashFlowSource::DateRange(source)
            }
            SourceKind::OneTime { amount, date } => {
                CashFlowSource::OneTime(OneTimeSource::new(*amount, *date)?)
            }
        };
        Ok(source)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub name: String,
    #[serde(default)]
    pub value: f64,
    pub start: Date,
    #[serde(default)]
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiabilityConfig {
    pub name: String,
    /// Outstanding balance, negative
    pub value: f64,
    pub start: Date,
    pub duration_months: u32,
    #[serde(default)]
    pub rate: f64,
}

/// Complete description of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// First simulated month (first of month)
    pub start: Date,
    /// Last simulated month, inclusive (first of month)
    pub end: Date,
    #[serde(default)]
    pub incomes: Vec<SourceConfig>,
    #[serde(default)]
    pub expenses: Vec<SourceConfig>,
    #[serde(default)]
    pub liabilities: Vec<LiabilityConfig>,
    #[serde(default)]
    pub assets: Vec<AssetConfig>,
    #[serde(default)]
    pub cash_handler: Option<CashStrategy>,
}

fn insert_unique<T>(map: &mut NamedMap<T>, group: &str, name: &str, value: T) -> Result<()> {
    if map.insert(name, value).is_some() {
        return Err(Error::InvalidConfiguration(format!(
            "duplicate {group} name '{name}'"
        )));
    }
    Ok(())
}

/// A validated, runnable projection: the month sequence and the plan.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub dates: Vec<Date>,
    pub plan: Plan,
}

impl Scenario {
    pub fn from_config(config: &ScenarioConfig) -> Result<Self> {
        let dates = monthly_date_range(config.start, config.end)?;
        let mut plan = Plan::new();

        for income in &config.incomes {
            insert_unique(&mut plan.incomes, "income", &income.name, income.to_source()?)?;
        }
        for expense in &config.expenses {
            insert_unique(
                &mut plan.expenses,
                "expense",
                &expense.name,
                expense.to_source()?,
            )?;
        }
        for loan in &config.liabilities {
            let liability = Liability::new(
                loan.value,
                loan.start,
                loan.duration_months,
                AnnualFixedRate::new(loan.rate)?,
            )?;
            insert_unique(&mut plan.liabilities, "liability", &loan.name, liability)?;
        }
        for asset in &config.assets {
            let instrument =
                Asset::new(asset.value, asset.start, AnnualFixedRate::new(asset.rate)?)?;
            insert_unique(&mut plan.assets, "asset", &asset.name, instrument)?;
        }
        plan.cash_handler = config.cash_handler.clone();

        plan.validate(&dates)?;
        tracing::debug!(
            months = dates.len(),
            start = %config.start,
            end = %config.end,
            "scenario built"
        );

        Ok(Self { dates, plan })
    }

    pub fn run(&mut self) -> Result<Output> {
        simulate(&self.dates, &mut self.plan)
    }

    pub fn run_with_metrics(&mut self) -> Result<(Output, SimulationMetrics)> {
        simulate_with_metrics(&self.dates, &mut self.plan)
    }
}
