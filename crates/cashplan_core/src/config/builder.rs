//! Scenario Builder
//!
//! Fluent API for assembling a [`ScenarioConfig`]. Entries that don't set
//! their own start date begin with the scenario; expenses are written as
//! positive amounts and stored as outflows.

use jiff::civil::Date;

use super::instrument_builder::{AssetBuilder, LiabilityBuilder};
use super::source_builder::SourceBuilder;
use super::{Scenario, ScenarioConfig};
use crate::date_math::add_months;
use crate::error::{Error, Result};
use crate::model::CashStrategy;

const DEFAULT_DURATION_MONTHS: u32 = 30 * 12;

#[derive(Debug, Clone, Copy)]
enum Horizon {
    Months(u32),
    Until(Date),
}

/// Builder for creating scenarios with name-based wiring
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    start: Option<Date>,
    horizon: Horizon,
    incomes: Vec<SourceBuilder>,
    expenses: Vec<SourceBuilder>,
    liabilities: Vec<LiabilityBuilder>,
    assets: Vec<AssetBuilder>,
    cash_handler: Option<CashStrategy>,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: None,
            horizon: Horizon::Months(DEFAULT_DURATION_MONTHS),
            incomes: Vec::new(),
            expenses: Vec::new(),
            liabilities: Vec::new(),
            assets: Vec::new(),
            cash_handler: None,
        }
    }

    // =========================================================================
    // Time range
    // =========================================================================

    /// First simulated month. Defaults to the current month.
    #[must_use]
    pub fn start(self, year: i16, month: i8, day: i8) -> Self {
        self.start_date(jiff::civil::date(year, month, day))
    }

    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        self.start = Some(date);
        self
    }

    /// Last simulated month, inclusive.
    #[must_use]
    pub fn end(self, year: i16, month: i8, day: i8) -> Self {
        self.end_date(jiff::civil::date(year, month, day))
    }

    #[must_use]
    pub fn end_date(mut self, date: Date) -> Self {
        self.horizon = Horizon::Until(date);
        self
    }

    /// Number of months to simulate, counting the first.
    #[must_use]
    pub fn months(mut self, months: u32) -> Self {
        self.horizon = Horizon::Months(months);
        self
    }

    #[must_use]
    pub fn years(self, years: u32) -> Self {
        self.months(years.saturating_mul(12))
    }

    // =========================================================================
    // Entries
    // =========================================================================

    #[must_use]
    pub fn income(mut self, source: SourceBuilder) -> Self {
        self.incomes.push(source);
        self
    }

    #[must_use]
    pub fn expense(mut self, source: SourceBuilder) -> Self {
        self.expenses.push(source);
        self
    }

    #[must_use]
    pub fn liability(mut self, liability: LiabilityBuilder) -> Self {
        self.liabilities.push(liability);
        self
    }

    #[must_use]
    pub fn asset(mut self, asset: AssetBuilder) -> Self {
        self.assets.push(asset);
        self
    }

    #[must_use]
    pub fn cash_handler(mut self, handler: CashStrategy) -> Self {
        self.cash_handler = Some(handler);
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    fn default_start() -> Date {
        jiff::Zoned::now().date().first_of_month()
    }

    pub fn build(self) -> Result<ScenarioConfig> {
        let start = self.start.unwrap_or_else(Self::default_start);
        let end = match self.horizon {
            Horizon::Until(end) => end,
            Horizon::Months(months) => i32::try_from(months)
                .ok()
                .and_then(|months| add_months(start, months - 1))
                .ok_or_else(|| {
                    Error::InvalidConfiguration(format!(
                        "{months} months from {start} runs past the supported calendar"
                    ))
                })?,
        };

        Ok(ScenarioConfig {
            start,
            end,
            incomes: self
                .incomes
                .into_iter()
                .map(|source| source.into_config(start, None))
                .collect(),
            expenses: self
                .expenses
                .into_iter()
                .map(|source| source.into_config(start, Some(-1.0)))
                .collect(),
            liabilities: self
                .liabilities
                .into_iter()
                .map(|loan| loan.into_config(start))
                .collect(),
            assets: self
                .assets
                .into_iter()
                .map(|asset| asset.into_config(start))
                .collect(),
            cash_handler: self.cash_handler,
        })
    }

    /// Build and validate in one step.
    pub fn build_scenario(self) -> Result<Scenario> {
        Scenario::from_config(&self.build()?)
    }
}
