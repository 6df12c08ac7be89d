//! Run metrics for inspecting how a projection's cash waterfall behaved
//!
//! These are collected alongside the [`Output`](crate::model::Output) by
//! [`simulate_with_metrics`](crate::simulation::simulate_with_metrics) and
//! summarize things that are tedious to recover from the raw series, such as
//! how often the household ran an overdraft or when each loan was retired.

use jiff::civil::Date;
use rustc_hash::FxHashMap;

/// Metrics collected during simulation execution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationMetrics {
    /// Months processed by the loop
    pub months: u64,
    /// Months that ended with a negative cash balance
    pub overdraft_months: u64,
    /// Lowest cash balance seen at any month end
    pub min_cash_balance: f64,
    /// Positive cashflow spent paying down an earlier overdraft
    pub overdraft_recovered: f64,
    /// Surplus the cash handler could not place (deposit caps)
    pub handler_overflow: f64,
    /// Deficit the cash handler could not cover (empty assets), as a
    /// negative total
    pub handler_shortfall: f64,
    /// First month each liability reached a zero balance
    pub payoff_dates: FxHashMap<String, Date>,
}

impl SimulationMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_month(&mut self, cash_balance: f64) {
        self.months += 1;
        if cash_balance < 0.0 {
            self.overdraft_months += 1;
        }
        if cash_balance < self.min_cash_balance {
            self.min_cash_balance = cash_balance;
        }
    }

    pub fn record_recovery(&mut self, applied: f64) {
        self.overdraft_recovered += applied;
    }

    /// Record cash handed back by the cash handler.
    pub fn record_unhandled(&mut self, remainder: f64) {
        if remainder > 0.0 {
            self.handler_overflow += remainder;
        } else {
            self.handler_shortfall += remainder;
        }
    }

    /// Remember the payoff date the first time a liability is cleared.
    /// Returns true when this call recorded it.
    pub fn record_payoff(&mut self, name: &str, date: Date) -> bool {
        if self.payoff_dates.contains_key(name) {
            return false;
        }
        self.payoff_dates.insert(name.to_string(), date);
        true
    }

    #[must_use]
    pub fn had_overdraft(&self) -> bool {
        self.overdraft_months > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_basic() {
        let mut metrics = SimulationMetrics::new();

        metrics.record_month(100.0);
        metrics.record_month(-250.0);
        metrics.record_month(-50.0);
        metrics.record_recovery(200.0);
        metrics.record_unhandled(30.0);
        metrics.record_unhandled(-40.0);

        assert_eq!(metrics.months, 3);
        assert_eq!(metrics.overdraft_months, 2);
        assert_eq!(metrics.min_cash_balance, -250.0);
        assert_eq!(metrics.overdraft_recovered, 200.0);
        assert_eq!(metrics.handler_overflow, 30.0);
        assert_eq!(metrics.handler_shortfall, -40.0);
        assert!(metrics.had_overdraft());
    }

    #[test]
    fn test_payoff_recorded_once() {
        let mut metrics = SimulationMetrics::new();
        let first = jiff::civil::date(2026, 1, 1);

        assert!(metrics.record_payoff("Car Loan", first));
        assert!(!metrics.record_payoff("Car Loan", jiff::civil::date(2026, 2, 1)));
        assert_eq!(metrics.payoff_dates.get("Car Loan"), Some(&first));
    }
}
