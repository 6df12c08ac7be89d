use std::fmt;

use jiff::civil::Date;

/// Which side of the household ledger a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Income,
    Expense,
    Liability,
    Asset,
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlowKind::Income => "income",
            FlowKind::Expense => "expense",
            FlowKind::Liability => "liability",
            FlowKind::Asset => "asset",
        };
        f.write_str(label)
    }
}

/// Errors raised while configuring or running a projection.
///
/// Every variant signals a misconfiguration rather than a transient fault,
/// so callers are expected to fix their inputs and re-run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("rate {rate} is outside [0, 1] (it is a ratio, not a percentage)")]
    InvalidRate { rate: f64 },

    #[error("invalid {kind} state (value={value}): {reason}")]
    InvalidInstrumentState {
        kind: FlowKind,
        value: f64,
        reason: &'static str,
    },

    #[error("cannot query value at {requested}, instrument was last queried at {last}")]
    NonMonotonicQuery { requested: Date, last: Date },

    #[error("{context} date {date} must fall on the first of a month")]
    InvalidDateAlignment { date: Date, context: &'static str },

    #[error("{flow} '{name}' has amount {amount} at {date}, which has the wrong sign")]
    SignInvariantViolation {
        flow: FlowKind,
        name: String,
        date: Date,
        amount: f64,
    },

    #[error("payment {payment} must be non-negative")]
    InvalidPayment { payment: f64 },

    #[error("asset '{name}' not found")]
    UnknownAsset { name: String },

    #[error("configuration error: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
