//! Annual rates compounded monthly

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::{MONTHS_IN_YEAR, months_between};
use crate::error::{Error, Result};

/// A fixed annual rate expressed as a ratio in `[0, 1]`, compounded monthly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AnnualFixedRate {
    rate: f64,
}

impl AnnualFixedRate {
    pub const ZERO: AnnualFixedRate = AnnualFixedRate { rate: 0.0 };

    pub fn new(rate: f64) -> Result<Self> {
        // NaN fails both comparisons
        if !(0.0..=1.0).contains(&rate) {
            return Err(Error::InvalidRate { rate });
        }
        Ok(Self { rate })
    }

    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Per-month rate used for amortization and compounding.
    #[must_use]
    pub fn interval_rate(&self) -> f64 {
        self.rate / MONTHS_IN_YEAR
    }

    /// Growth factor accumulated between `anchor` and `date`.
    ///
    /// Dates before the anchor never accrue: the rate drops to zero for that
    /// span, so the factor is exactly 1.
    #[must_use]
    pub fn multiplier(&self, anchor: Date, date: Date) -> f64 {
        let rate = if date >= anchor { self.rate } else { 0.0 };
        let months = months_between(anchor, date);
        (1.0 + rate / MONTHS_IN_YEAR).powf(months)
    }
}

impl Default for AnnualFixedRate {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f64> for AnnualFixedRate {
    type Error = Error;

    fn try_from(rate: f64) -> Result<Self> {
        Self::new(rate)
    }
}

impl From<AnnualFixedRate> for f64 {
    fn from(rate: AnnualFixedRate) -> Self {
        rate.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            AnnualFixedRate::new(-0.01),
            Err(Error::InvalidRate { rate: -0.01 })
        );
        assert!(AnnualFixedRate::new(1.5).is_err());
        assert!(AnnualFixedRate::new(f64::NAN).is_err());
        assert!(AnnualFixedRate::new(0.0).is_ok());
        assert!(AnnualFixedRate::new(1.0).is_ok());
    }

    #[test]
    fn test_one_year_compounds_monthly() {
        let rate = AnnualFixedRate::new(0.12).unwrap();
        let m = rate.multiplier(date(2025, 1, 1), date(2026, 1, 1));
        assert!((m - 1.01_f64.powi(12)).abs() < 1e-12, "got {m}");
    }

    #[test]
    fn test_same_date_is_identity() {
        let rate = AnnualFixedRate::new(0.07).unwrap();
        assert_eq!(rate.multiplier(date(2025, 5, 1), date(2025, 5, 1)), 1.0);
    }

    #[test]
    fn test_before_anchor_does_not_accrue() {
        let rate = AnnualFixedRate::new(0.5).unwrap();
        assert_eq!(rate.multiplier(date(2025, 5, 1), date(2024, 1, 1)), 1.0);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: AnnualFixedRate = serde_json::from_str("0.05").unwrap();
        assert_eq!(ok.rate(), 0.05);
        assert!(serde_json::from_str::<AnnualFixedRate>("5.0").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "0.05");
    }

    fn date_strategy() -> impl Strategy<Value = Date> {
        (1990i16..2080, 1i8..=12, 1i8..=28).prop_map(|(y, m, d)| date(y, m, d))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_zero_rate_is_always_one(a in date_strategy(), b in date_strategy()) {
            prop_assert_eq!(AnnualFixedRate::ZERO.multiplier(a, b), 1.0);
        }

        #[test]
        fn prop_multiplier_monotone_in_time(
            rate in 0.001f64..=1.0,
            anchor in date_strategy(),
            d1 in date_strategy(),
            d2 in date_strategy(),
        ) {
            let rate = AnnualFixedRate::new(rate).unwrap();
            let (early, late) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            prop_assert!(rate.multiplier(anchor, early) <= rate.multiplier(anchor, late));
        }
    }
}
