//! Assets and liabilities
//!
//! Both wrap an [`Instrument`]: a value that compounds at a fixed annual rate
//! between queries. The instrument keeps a cursor (`as_of`) recording the last
//! date it was settled at; queries may only move that cursor forward until the
//! instrument is reset.
//!
//! An instrument instance belongs to one running simulation at a time. The
//! simulation entry points take `&mut` access and reset every instrument
//! before their first month, so reuse across runs only needs a fresh call.

use jiff::civil::Date;

use super::rate::AnnualFixedRate;
use crate::date_math::add_months;
use crate::error::{Error, FlowKind, Result};

/// Value of an instrument settled at a given date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstrumentState {
    pub value: f64,
    pub as_of: Date,
}

/// Compounding value with a forward-only query cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    initial: InstrumentState,
    live: InstrumentState,
    rate: AnnualFixedRate,
}

impl Instrument {
    fn new(value: f64, start_date: Date, rate: AnnualFixedRate) -> Self {
        let initial = InstrumentState {
            value,
            as_of: start_date,
        };
        Self {
            initial,
            live: initial,
            rate,
        }
    }

    pub fn start_date(&self) -> Date {
        self.initial.as_of
    }

    pub fn start_value(&self) -> f64 {
        self.initial.value
    }

    pub fn rate(&self) -> AnnualFixedRate {
        self.rate
    }

    /// The last settled state.
    pub fn state(&self) -> InstrumentState {
        self.live
    }

    pub fn reset(&mut self) {
        self.live = self.initial;
    }

    /// Value at `date`, compounded from the last settled state. Pure read.
    pub fn value(&self, date: Date) -> Result<f64> {
        if date < self.initial.as_of {
            return Ok(0.0);
        }
        if date < self.live.as_of {
            return Err(Error::NonMonotonicQuery {
                requested: date,
                last: self.live.as_of,
            });
        }
        if date == self.live.as_of {
            return Ok(self.live.value);
        }
        Ok(self.live.value * self.rate.multiplier(self.live.as_of, date))
    }

    /// Settle at `date`, apply a signed amount and move the cursor.
    fn transact(&mut self, amount: f64, date: Date) -> Result<()> {
        let value = self.value(date)?;
        self.live = InstrumentState {
            value: value + amount,
            as_of: date,
        };
        Ok(())
    }
}

/// Something the household owns. Its value never drops below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    instrument: Instrument,
}

impl Asset {
    pub fn new(value: f64, start_date: Date, rate: AnnualFixedRate) -> Result<Self> {
        if !(value >= 0.0) {
            return Err(Error::InvalidInstrumentState {
                kind: FlowKind::Asset,
                value,
                reason: "assets must start with a non-negative value",
            });
        }
        Ok(Self {
            instrument: Instrument::new(value, start_date, rate),
        })
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn start_date(&self) -> Date {
        self.instrument.start_date()
    }

    pub fn value(&self, date: Date) -> Result<f64> {
        self.instrument.value(date)
    }

    pub fn reset(&mut self) {
        self.instrument.reset();
    }

    /// Deposit (`amount >= 0`) or withdraw (`amount < 0`).
    ///
    /// Withdrawals are capped at the current value. Returns the part of a
    /// withdrawal that could not be covered (zero or negative).
    pub fn transact(&mut self, amount: f64, date: Date) -> Result<f64> {
        let mut applied = amount;
        let mut remainder = 0.0;
        if amount < 0.0 {
            let value = self.instrument.value(date)?;
            applied = amount.max(-value);
            remainder = amount - applied;
        }
        self.instrument.transact(applied, date)?;
        Ok(remainder)
    }
}

/// Monthly payment that retires `principal` over `intervals` periods at
/// `interval_rate` per period. `principal` is the (negative) balance owed.
pub fn minimum_payment(principal: f64, interval_rate: f64, intervals: u32) -> f64 {
    let owed = -principal;
    let growth = (1.0 + interval_rate).powi(intervals as i32);
    // Rates too small to move `growth` off 1.0 amortize linearly
    if growth - 1.0 <= 0.0 {
        return owed / intervals as f64;
    }
    owed * interval_rate * growth / (growth - 1.0)
}

/// An amortizing debt, stored as a negative value.
#[derive(Debug, Clone, PartialEq)]
pub struct Liability {
    instrument: Instrument,
    end_date: Date,
    minimum_monthly: f64,
}

impl Liability {
    pub fn new(
        value: f64,
        start_date: Date,
        duration_months: u32,
        rate: AnnualFixedRate,
    ) -> Result<Self> {
        if !(value < 0.0) {
            return Err(Error::InvalidInstrumentState {
                kind: FlowKind::Liability,
                value,
                reason: "liabilities must start with a negative value",
            });
        }
        if duration_months == 0 {
            return Err(Error::InvalidInstrumentState {
                kind: FlowKind::Liability,
                value,
                reason: "loan duration must be at least one month",
            });
        }
        let end_date = i32::try_from(duration_months)
            .ok()
            .and_then(|months| add_months(start_date, months))
            .ok_or_else(|| {
                Error::InvalidConfiguration(format!(
                    "loan of {duration_months} months from {start_date} ends outside the supported calendar"
                ))
            })?;

        Ok(Self {
            instrument: Instrument::new(value, start_date, rate),
            end_date,
            minimum_monthly: minimum_payment(value, rate.interval_rate(), duration_months),
        })
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn start_date(&self) -> Date {
        self.instrument.start_date()
    }

    /// Scheduled payoff date.
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Amortized payment fixed at origination.
    pub fn fixed_minimum_monthly(&self) -> f64 {
        self.minimum_monthly
    }

    pub fn value(&self, date: Date) -> Result<f64> {
        self.instrument.value(date)
    }

    pub fn reset(&mut self) {
        self.instrument.reset();
    }

    /// Payment due at `date`, never more than the outstanding balance.
    pub fn minimum_monthly(&self, date: Date) -> Result<f64> {
        Ok(self.minimum_monthly.min(-self.value(date)?))
    }

    /// Pay down the balance. Returns whatever part of `payment` was not
    /// needed: all of it before the loan starts, the excess past payoff after.
    pub fn make_payment(&mut self, payment: f64, date: Date) -> Result<f64> {
        if !(payment >= 0.0) {
            return Err(Error::InvalidPayment { payment });
        }
        if date < self.instrument.start_date() {
            return Ok(payment);
        }
        let owed = -self.instrument.value(date)?;
        let actual = owed.min(payment);
        self.instrument.transact(actual, date)?;
        Ok(payment - actual)
    }
}
