//! Source Builder DSL
//!
//! ```ignore
//! SourceBuilder::monthly("Salary", 8_000.0)
//!     .starting(2025, 1, 1)
//!     .until(2045, 6, 1)
//!     .growth(0.03)
//!
//! SourceBuilder::one_time("Inheritance", 50_000.0, 2031, 4, 1)
//! ```

use jiff::civil::Date;

use super::{SourceConfig, SourceKind};

#[derive(Debug, Clone)]
enum Timing {
    Recurring {
        start: Option<Date>,
        end: Option<Date>,
        growth: f64,
    },
    Once(Date),
}

/// Builder for an income or expense source
#[derive(Debug, Clone)]
pub struct SourceBuilder {
    name: String,
    amount: f64,
    timing: Timing,
}

impl SourceBuilder {
    /// A recurring monthly amount. Starts with the scenario unless
    /// [`starting`](Self::starting) says otherwise.
    #[must_use]
    pub fn monthly(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            timing: Timing::Recurring {
                start: None,
                end: None,
                growth: 0.0,
            },
        }
    }

    /// An annual amount spread evenly over twelve months.
    #[must_use]
    pub fn yearly(name: impl Into<String>, amount: f64) -> Self {
        Self::monthly(name, amount / 12.0)
    }

    /// A single amount in the month starting at the given date.
    #[must_use]
    pub fn one_time(name: impl Into<String>, amount: f64, year: i16, month: i8, day: i8) -> Self {
        Self::one_time_on(name, amount, jiff::civil::date(year, month, day))
    }

    #[must_use]
    pub fn one_time_on(name: impl Into<String>, amount: f64, date: Date) -> Self {
        Self {
            name: name.into(),
            amount,
            timing: Timing::Once(date),
        }
    }

    #[must_use]
    pub fn starting(self, year: i16, month: i8, day: i8) -> Self {
        self.start_date(jiff::civil::date(year, month, day))
    }

    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        if let Timing::Recurring { start, .. } = &mut self.timing {
            *start = Some(date);
        }
        self
    }

    /// Last month the amount is paid (inclusive).
    #[must_use]
    pub fn until(self, year: i16, month: i8, day: i8) -> Self {
        self.end_date(jiff::civil::date(year, month, day))
    }

    #[must_use]
    pub fn end_date(mut self, date: Date) -> Self {
        if let Timing::Recurring { end, .. } = &mut self.timing {
            *end = Some(date);
        }
        self
    }

    /// Annual growth ratio, e.g. `0.03` for raises or inflation.
    #[must_use]
    pub fn growth(mut self, rate: f64) -> Self {
        if let Timing::Recurring { growth, .. } = &mut self.timing {
            *growth = rate;
        }
        self
    }

    /// Resolve into a config entry, with the amount's sign forced to `sign`
    /// when one is given.
    pub(crate) fn into_config(self, default_start: Date, sign: Option<f64>) -> SourceConfig {
        let amount = match sign {
            Some(sign) => self.amount.abs().copysign(sign),
            None => self.amount,
        };
        let kind = match self.timing {
            Timing::Recurring { start, end, growth } => SourceKind::DateRange {
                amount,
                start: start.unwrap_or(default_start),
                end,
                growth,
            },
            Timing::Once(date) => SourceKind::OneTime { amount, date },
        };
        SourceConfig {
            name: self.name,
            kind,
        }
    }
}
