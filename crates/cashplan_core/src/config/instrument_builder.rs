//! Asset and Liability Builder DSL
//!
//! ```ignore
//! AssetBuilder::new("Brokerage").value(25_000.0).rate(0.06)
//!
//! // Balances owed are given as positive amounts
//! LiabilityBuilder::new("Car Loan", 18_000.0).rate(0.059).years(5)
//! ```

use jiff::civil::Date;

use super::{AssetConfig, LiabilityConfig};

/// Builder for an asset account
#[derive(Debug, Clone)]
pub struct AssetBuilder {
    name: String,
    value: f64,
    rate: f64,
    start: Option<Date>,
}

impl AssetBuilder {
    /// An empty, non-growing asset opened with the scenario.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0.0,
            rate: 0.0,
            start: None,
        }
    }

    #[must_use]
    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Annual growth ratio
    #[must_use]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    #[must_use]
    pub fn opened(self, year: i16, month: i8, day: i8) -> Self {
        self.start_date(jiff::civil::date(year, month, day))
    }

    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        self.start = Some(date);
        self
    }

    pub(crate) fn into_config(self, default_start: Date) -> AssetConfig {
        AssetConfig {
            name: self.name,
            value: self.value,
            start: self.start.unwrap_or(default_start),
            rate: self.rate,
        }
    }
}

/// Builder for an amortizing loan
#[derive(Debug, Clone)]
pub struct LiabilityBuilder {
    name: String,
    balance: f64,
    rate: f64,
    duration_months: u32,
    start: Option<Date>,
}

impl LiabilityBuilder {
    /// A loan with `balance` outstanding. Defaults to 0% over 12 months.
    #[must_use]
    pub fn new(name: impl Into<String>, balance: f64) -> Self {
        Self {
            name: name.into(),
            balance,
            rate: 0.0,
            duration_months: 12,
            start: None,
        }
    }

    /// Annual interest ratio
    #[must_use]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    #[must_use]
    pub fn months(mut self, months: u32) -> Self {
        self.duration_months = months;
        self
    }

    #[must_use]
    pub fn years(self, years: u32) -> Self {
        self.months(years.saturating_mul(12))
    }

    #[must_use]
    pub fn starting(self, year: i16, month: i8, day: i8) -> Self {
        self.start_date(jiff::civil::date(year, month, day))
    }

    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        self.start = Some(date);
        self
    }

    pub(crate) fn into_config(self, default_start: Date) -> LiabilityConfig {
        LiabilityConfig {
            name: self.name,
            value: -self.balance.abs(),
            start: self.start.unwrap_or(default_start),
            duration_months: self.duration_months,
            rate: self.rate,
        }
    }
}
