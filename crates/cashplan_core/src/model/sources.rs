//! Income and expense generators
//!
//! A [`Source`] yields a signed cash amount for a given month. Incomes are
//! expected to be non-negative and expenses non-positive; the orchestrator
//! enforces those signs, not the sources themselves.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::rate::AnnualFixedRate;
use crate::date_math::is_first_of_month;
use crate::error::{Error, Result};

pub trait Source {
    /// Signed cash amount produced in the month starting at `date`.
    fn monthly_amount(&self, date: Date) -> f64;
}

/// A recurring amount active between `start` and an optional `end`
/// (both inclusive), growing at `growth` from `start` onward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRangeSource {
    pub initial_monthly: f64,
    pub start: Date,
    #[serde(default)]
    pub end: Option<Date>,
    #[serde(default)]
    pub growth: AnnualFixedRate,
}

impl DateRangeSource {
    #[must_use]
    pub fn new(initial_monthly: f64, start: Date) -> Self {
        Self {
            initial_monthly,
            start,
            end: None,
            growth: AnnualFixedRate::ZERO,
        }
    }

    #[must_use]
    pub fn until(mut self, end: Date) -> Self {
        self.end = Some(end);
        self
    }

    #[must_use]
    pub fn with_growth(mut self, growth: AnnualFixedRate) -> Self {
        self.growth = growth;
        self
    }

    fn is_active(&self, date: Date) -> bool {
        date >= self.start && self.end.is_none_or(|end| date <= end)
    }
}

impl Source for DateRangeSource {
    fn monthly_amount(&self, date: Date) -> f64 {
        if !self.is_active(date) {
            return 0.0;
        }
        self.initial_monthly * self.growth.multiplier(self.start, date)
    }
}

/// A single amount landing in exactly one month.
#[derive(Debug, Clone, PartialEq)]
pub struct OneTimeSource {
    amount: f64,
    date: Date,
}

impl OneTimeSource {
    pub fn new(amount: f64, date: Date) -> Result<Self> {
        if !is_first_of_month(date) {
            return Err(Error::InvalidDateAlignment {
                date,
                context: "one-time source",
            });
        }
        Ok(Self { amount, date })
    }

    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }
}

impl Source for OneTimeSource {
    fn monthly_amount(&self, date: Date) -> f64 {
        if date == self.date { self.amount } else { 0.0 }
    }
}

/// The built-in source variants behind one concrete type.
#[derive(Debug, Clone, PartialEq)]
pub enum CashFlowSource {
    DateRange(DateRangeSource),
    OneTime(OneTimeSource),
}

impl Source for CashFlowSource {
    fn monthly_amount(&self, date: Date) -> f64 {
        match self {
            CashFlowSource::DateRange(source) => source.monthly_amount(date),
            CashFlowSource::OneTime(source) => source.monthly_amount(date),
        }
    }
}

impl From<DateRangeSource> for CashFlowSource {
    fn from(source: DateRangeSource) -> Self {
        CashFlowSource::DateRange(source)
    }
}

impl From<OneTimeSource> for CashFlowSource {
    fn from(source: OneTimeSource) -> Self {
        CashFlowSource::OneTime(source)
    }
}
