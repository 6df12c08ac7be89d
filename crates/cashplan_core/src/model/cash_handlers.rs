//! Strategies for routing a month's surplus or deficit into assets
//!
//! A handler receives the cash left after incomes, expenses and loan
//! payments (positive surplus or negative deficit) and returns whatever it
//! could not place. Handlers refer to assets by name and are handed the
//! plan's asset book on every call.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::instruments::Asset;
use super::named::NamedMap;
use crate::error::{Error, Result};

pub trait CashHandler {
    /// Route `cash` and return the unhandled remainder.
    fn handle_cash(&self, cash: f64, date: Date, assets: &mut NamedMap<Asset>) -> Result<f64>;
}

fn asset_mut<'a>(assets: &'a mut NamedMap<Asset>, name: &str) -> Result<&'a mut Asset> {
    assets.get_mut(name).ok_or_else(|| Error::UnknownAsset {
        name: name.to_string(),
    })
}

/// Sends everything to one asset. Only withdrawal shortfalls come back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicCashHandler {
    pub asset: String,
}

impl CashHandler for BasicCashHandler {
    fn handle_cash(&self, cash: f64, date: Date, assets: &mut NamedMap<Asset>) -> Result<f64> {
        asset_mut(assets, &self.asset)?.transact(cash, date)
    }
}

/// Tops an asset up to `max_value` and passes the rest on.
///
/// Deficits are withdrawn from the asset without any limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxValueCashHandler {
    pub asset: String,
    pub max_value: f64,
}

impl CashHandler for MaxValueCashHandler {
    fn handle_cash(&self, cash: f64, date: Date, assets: &mut NamedMap<Asset>) -> Result<f64> {
        let asset = asset_mut(assets, &self.asset)?;
        let mut deposit = cash;
        let mut overflow = 0.0;
        if cash > 0.0 {
            let room = (self.max_value - asset.value(date)?).max(0.0);
            deposit = cash.min(room);
            overflow = cash - deposit;
        }
        Ok(asset.transact(deposit, date)? + overflow)
    }
}

/// A waterfall: each handler gets what the previous one left over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequentialCashHandler {
    pub handlers: Vec<CashStrategy>,
}

impl CashHandler for SequentialCashHandler {
    fn handle_cash(&self, cash: f64, date: Date, assets: &mut NamedMap<Asset>) -> Result<f64> {
        self.handlers
            .iter()
            .try_fold(cash, |remaining, handler| {
                handler.handle_cash(remaining, date, assets)
            })
    }
}

/// The built-in handlers as one serializable type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CashStrategy {
    Basic(BasicCashHandler),
    MaxValue(MaxValueCashHandler),
    Sequential(SequentialCashHandler),
}

impl CashStrategy {
    #[must_use]
    pub fn basic(asset: impl Into<String>) -> Self {
        CashStrategy::Basic(BasicCashHandler {
            asset: asset.into(),
        })
    }

    #[must_use]
    pub fn max_value(asset: impl Into<String>, max_value: f64) -> Self {
        CashStrategy::MaxValue(MaxValueCashHandler {
            asset: asset.into(),
            max_value,
        })
    }

    #[must_use]
    pub fn sequential(handlers: impl IntoIterator<Item = CashStrategy>) -> Self {
        CashStrategy::Sequential(SequentialCashHandler {
            handlers: handlers.into_iter().collect(),
        })
    }

    /// Every asset name this strategy routes cash to, in waterfall order.
    pub fn asset_names(&self) -> Vec<&str> {
        match self {
            CashStrategy::Basic(h) => vec![h.asset.as_str()],
            CashStrategy::MaxValue(h) => vec![h.asset.as_str()],
            CashStrategy::Sequential(h) => h
                .handlers
                .iter()
                .flat_map(CashStrategy::asset_names)
                .collect(),
        }
    }
}

impl CashHandler for CashStrategy {
    fn handle_cash(&self, cash: f64, date: Date, assets: &mut NamedMap<Asset>) -> Result<f64> {
        match self {
            CashStrategy::Basic(h) => h.handle_cash(cash, date, assets),
            CashStrategy::MaxValue(h) => h.handle_cash(cash, date, assets),
            CashStrategy::Sequential(h) => h.handle_cash(cash, date, assets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnnualFixedRate;
    use jiff::civil::date;

    fn book(entries: &[(&str, f64)]) -> NamedMap<Asset> {
        entries
            .iter()
            .map(|&(name, value)| {
                let asset = Asset::new(value, date(2025, 1, 1), AnnualFixedRate::ZERO).unwrap();
                (name, asset)
            })
            .collect()
    }

    fn value_of(assets: &NamedMap<Asset>, name: &str) -> f64 {
        assets.get(name).unwrap().value(date(2025, 2, 1)).unwrap()
    }

    #[test]
    fn test_basic_takes_everything() {
        let mut assets = book(&[("Savings", 0.0)]);
        let handler = CashStrategy::basic("Savings");
        let left = handler.handle_cash(1_000.0, date(2025, 2, 1), &mut assets).unwrap();
        assert_eq!(left, 0.0);
        assert_eq!(value_of(&assets, "Savings"), 1_000.0);
    }

    #[test]
    fn test_basic_reports_withdrawal_shortfall() {
        let mut assets = book(&[("Savings", 200.0)]);
        let handler = CashStrategy::basic("Savings");
        let left = handler.handle_cash(-500.0, date(2025, 2, 1), &mut assets).unwrap();
        assert_eq!(left, -300.0);
        assert_eq!(value_of(&assets, "Savings"), 0.0);
    }

    #[test]
    fn test_max_value_caps_deposit() {
        let mut assets = book(&[("Emergency", 9_000.0)]);
        let handler = CashStrategy::max_value("Emergency", 10_000.0);
        let left = handler.handle_cash(2_500.0, date(2025, 2, 1), &mut assets).unwrap();
        assert_eq!(left, 1_500.0);
        assert_eq!(value_of(&assets, "Emergency"), 10_000.0);
    }

    #[test]
    fn test_max_value_already_above_ceiling() {
        let mut assets = book(&[("Emergency", 12_000.0)]);
        let handler = CashStrategy::max_value("Emergency", 10_000.0);
        let left = handler.handle_cash(800.0, date(2025, 2, 1), &mut assets).unwrap();
        assert_eq!(left, 800.0);
        assert_eq!(value_of(&assets, "Emergency"), 12_000.0);
    }

    #[test]
    fn test_max_value_withdrawal_passes_through() {
        let mut assets = book(&[("Emergency", 12_000.0)]);
        let handler = CashStrategy::max_value("Emergency", 10_000.0);
        let left = handler.handle_cash(-13_000.0, date(2025, 2, 1), &mut assets).unwrap();
        assert_eq!(left, -1_000.0);
        assert_eq!(value_of(&assets, "Emergency"), 0.0);
    }

    #[test]
    fn test_sequential_waterfall() {
        let mut assets = book(&[("Emergency", 0.0), ("Brokerage", 0.0)]);
        let handler = CashStrategy::sequential([
            CashStrategy::max_value("Emergency", 1_000.0),
            CashStrategy::basic("Brokerage"),
        ]);
        let left = handler.handle_cash(1_500.0, date(2025, 2, 1), &mut assets).unwrap();
        assert_eq!(left, 0.0);
        assert_eq!(value_of(&assets, "Emergency"), 1_000.0);
        assert_eq!(value_of(&assets, "Brokerage"), 500.0);
    }

    #[test]
    fn test_sequential_deficit_drains_in_order() {
        let mut assets = book(&[("Emergency", 300.0), ("Brokerage", 1_000.0)]);
        let handler = CashStrategy::sequential([
            CashStrategy::basic("Emergency"),
            CashStrategy::basic("Brokerage"),
        ]);
        let left = handler.handle_cash(-500.0, date(2025, 2, 1), &mut assets).unwrap();
        assert_eq!(left, 0.0);
        assert_eq!(value_of(&assets, "Emergency"), 0.0);
        assert_eq!(value_of(&assets, "Brokerage"), 800.0);
    }

    #[test]
    fn test_unknown_asset() {
        let mut assets = book(&[]);
        let err = CashStrategy::basic("Nowhere")
            .handle_cash(1.0, date(2025, 2, 1), &mut assets)
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnknownAsset {
                name: "Nowhere".to_string()
            }
        );
    }

    #[test]
    fn test_strategy_serde_shape() {
        let handler = CashStrategy::sequential([
            CashStrategy::max_value("Emergency", 1_000.0),
            CashStrategy::basic("Brokerage"),
        ]);
        let json = serde_json::to_value(&handler).unwrap();
        assert_eq!(json["kind"], "sequential");
        assert_eq!(json["handlers"][0]["kind"], "max_value");
        let back: CashStrategy = serde_json::from_value(json).unwrap();
        assert_eq!(back, handler);
        assert_eq!(back.asset_names(), vec!["Emergency", "Brokerage"]);
    }
}
