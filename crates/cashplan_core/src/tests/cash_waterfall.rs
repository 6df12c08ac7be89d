//! Tests for cash strategies inside the monthly loop
//!
//! These tests verify:
//! - Surpluses fill a capped account before spilling into the next
//! - Deficits drain accounts in order, with shortfalls landing in cash
//! - Idle assets still compound between months

use jiff::civil::{Date, date};

use super::init_logging;
use crate::date_math::monthly_date_range;
use crate::model::{AnnualFixedRate, Asset, CashStrategy, DateRangeSource, OneTimeSource};
use crate::simulation::{Plan, simulate, simulate_with_metrics};

fn months(n: u32) -> Vec<Date> {
    let start = date(2025, 1, 1);
    let end = crate::date_math::add_months(start, n as i32 - 1).unwrap();
    monthly_date_range(start, end).unwrap()
}

fn empty_asset() -> Asset {
    Asset::new(0.0, date(2025, 1, 1), AnnualFixedRate::ZERO).unwrap()
}

fn emergency_then_brokerage(cap: f64) -> CashStrategy {
    CashStrategy::sequential([
        CashStrategy::max_value("Emergency", cap),
        CashStrategy::basic("Brokerage"),
    ])
}

#[test]
fn test_surplus_fills_cap_then_spills() {
    init_logging();
    let mut plan = Plan::new();
    plan.incomes.insert(
        "Salary",
        DateRangeSource::new(3_000.0, date(2025, 1, 1)).into(),
    );
    plan.expenses.insert(
        "Living",
        DateRangeSource::new(-1_000.0, date(2025, 1, 1)).into(),
    );
    plan.assets.insert("Emergency", empty_asset());
    plan.assets.insert("Brokerage", empty_asset());
    plan.cash_handler = Some(emergency_then_brokerage(5_000.0));

    let output = simulate(&months(3), &mut plan).unwrap();

    assert_eq!(
        output.assets.get("Emergency").unwrap(),
        &vec![2_000.0, 4_000.0, 5_000.0]
    );
    assert_eq!(
        output.assets.get("Brokerage").unwrap(),
        &vec![0.0, 0.0, 1_000.0]
    );
    assert_eq!(output.cash_balance, vec![0.0, 0.0, 0.0]);
    assert_eq!(output.assets_total, vec![2_000.0, 4_000.0, 6_000.0]);
    assert_eq!(output.net_worth, output.assets_total);
}

#[test]
fn test_overflow_without_fallback_stays_in_cash() {
    let mut plan = Plan::new();
    plan.incomes.insert(
        "Salary",
        DateRangeSource::new(1_000.0, date(2025, 1, 1)).into(),
    );
    plan.assets.insert("Emergency", empty_asset());
    plan.cash_handler = Some(CashStrategy::max_value("Emergency", 1_500.0));

    let (output, metrics) = simulate_with_metrics(&months(3), &mut plan).unwrap();

    assert_eq!(
        output.assets.get("Emergency").unwrap(),
        &vec![1_000.0, 1_500.0, 1_500.0]
    );
    assert_eq!(output.cash_balance, vec![0.0, 500.0, 1_500.0]);
    assert_eq!(metrics.handler_overflow, 1_500.0);
    assert_eq!(metrics.handler_shortfall, 0.0);
}

#[test]
fn test_deficit_drains_in_order_then_overdraws() {
    let mut plan = Plan::new();
    plan.expenses.insert(
        "Medical",
        DateRangeSource::new(-1_000.0, date(2025, 1, 1)).into(),
    );
    plan.assets.insert(
        "Emergency",
        Asset::new(1_500.0, date(2025, 1, 1), AnnualFixedRate::ZERO).unwrap(),
    );
    plan.assets.insert(
        "Brokerage",
        Asset::new(1_000.0, date(2025, 1, 1), AnnualFixedRate::ZERO).unwrap(),
    );
    plan.cash_handler = Some(emergency_then_brokerage(10_000.0));

    let (output, metrics) = simulate_with_metrics(&months(4), &mut plan).unwrap();

    assert_eq!(
        output.assets.get("Emergency").unwrap(),
        &vec![500.0, 0.0, 0.0, 0.0]
    );
    assert_eq!(
        output.assets.get("Brokerage").unwrap(),
        &vec![1_000.0, 500.0, 0.0, 0.0]
    );
    assert_eq!(output.cash_balance, vec![0.0, 0.0, -500.0, -1_500.0]);
    assert_eq!(metrics.handler_shortfall, -1_500.0);
    assert_eq!(metrics.overdraft_months, 2);
}

#[test]
fn test_idle_asset_compounds_monthly() {
    let rate = AnnualFixedRate::new(0.12).unwrap();
    let mut plan = Plan::new();
    plan.assets.insert(
        "Brokerage",
        Asset::new(10_000.0, date(2025, 1, 1), rate).unwrap(),
    );
    plan.cash_handler = Some(CashStrategy::basic("Brokerage"));

    let output = simulate(&months(13), &mut plan).unwrap();

    let values = output.assets.get("Brokerage").unwrap();
    assert_eq!(values[0], 10_000.0);
    let expected = 10_000.0 * 1.01_f64.powi(12);
    assert!(
        (values[12] - expected).abs() < 1e-6,
        "expected {expected:.6}, got {:.6}",
        values[12]
    );
}

#[test]
fn test_asset_opened_later_holds_nothing_before_start() {
    let mut plan = Plan::new();
    plan.incomes.insert(
        "Inheritance",
        OneTimeSource::new(20_000.0, date(2025, 3, 1)).unwrap().into(),
    );
    plan.assets.insert(
        "Trust",
        Asset::new(5_000.0, date(2025, 2, 1), AnnualFixedRate::ZERO).unwrap(),
    );

    let output = simulate(&months(3), &mut plan).unwrap();

    assert_eq!(output.assets.get("Trust").unwrap(), &vec![0.0, 5_000.0, 5_000.0]);
    assert_eq!(output.net_worth, vec![0.0, 5_000.0, 25_000.0]);
}
