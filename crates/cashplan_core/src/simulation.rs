//! The monthly projection loop
//!
//! For each month the loop collects incomes and expenses, makes every loan's
//! minimum payment, applies the net cash to any outstanding overdraft, routes
//! the rest through the cash handler and finally reads back instrument values
//! to compute net worth. Sign rules are checked as values are produced and a
//! violation aborts the run.

use jiff::civil::Date;

use crate::error::{Error, FlowKind, Result};
use crate::metrics::SimulationMetrics;
use crate::model::{
    Asset, CashFlowSource, CashHandler, CashStrategy, Liability, NamedMap, Output, Source,
};

/// Everything that feeds a projection, keyed by display name.
///
/// Instruments are reset at the start of every run, so the same plan can be
/// simulated repeatedly and yields identical output each time.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub incomes: NamedMap<CashFlowSource>,
    pub expenses: NamedMap<CashFlowSource>,
    pub liabilities: NamedMap<Liability>,
    pub assets: NamedMap<Asset>,
    pub cash_handler: Option<CashStrategy>,
}

impl Plan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore every asset and liability to its opening state.
    pub fn reset(&mut self) {
        for loan in self.liabilities.values_mut() {
            loan.reset();
        }
        for asset in self.assets.values_mut() {
            asset.reset();
        }
    }

    /// Check the plan can be simulated over `dates` without running it.
    pub fn validate(&self, dates: &[Date]) -> Result<()> {
        if let Some(pair) = dates.windows(2).find(|pair| pair[1] < pair[0]) {
            return Err(Error::InvalidConfiguration(format!(
                "dates must be ascending, found {} after {}",
                pair[1], pair[0]
            )));
        }

        // Loan payments are reported alongside expenses under the loan's name
        if let Some(name) = self
            .liabilities
            .names()
            .find(|name| self.expenses.contains(name))
        {
            return Err(Error::InvalidConfiguration(format!(
                "'{name}' is used for both an expense and a liability"
            )));
        }

        if let Some(handler) = &self.cash_handler
            && let Some(name) = handler
                .asset_names()
                .into_iter()
                .find(|name| !self.assets.contains(name))
        {
            return Err(Error::UnknownAsset {
                name: name.to_string(),
            });
        }

        Ok(())
    }
}

fn check_sign(flow: FlowKind, name: &str, date: Date, amount: f64) -> Result<f64> {
    let valid = match flow {
        FlowKind::Income | FlowKind::Asset => amount >= 0.0,
        FlowKind::Expense | FlowKind::Liability => amount <= 0.0,
    };
    if !valid {
        return Err(Error::SignInvariantViolation {
            flow,
            name: name.to_string(),
            date,
            amount,
        });
    }
    Ok(amount)
}

/// Project `plan` over `dates`, one entry per date in every output series.
pub fn simulate(dates: &[Date], plan: &mut Plan) -> Result<Output> {
    simulate_with_metrics(dates, plan).map(|(output, _)| output)
}

/// Like [`simulate`], also returning metrics about the cash waterfall.
pub fn simulate_with_metrics(
    dates: &[Date],
    plan: &mut Plan,
) -> Result<(Output, SimulationMetrics)> {
    plan.validate(dates)?;
    plan.reset();

    let span = tracing::debug_span!(
        "simulate",
        months = dates.len(),
        incomes = plan.incomes.len(),
        expenses = plan.expenses.len(),
        liabilities = plan.liabilities.len(),
        assets = plan.assets.len(),
    );
    let _guard = span.enter();

    let mut output = Output::with_categories(
        dates.len(),
        plan.incomes.names(),
        plan.expenses.names(),
        plan.liabilities.names(),
        plan.assets.names(),
    );
    let mut metrics = SimulationMetrics::new();
    let mut cash_balance = 0.0;

    for &date in dates {
        let mut cash = 0.0;

        let mut incomes_total = 0.0;
        for ((name, source), series) in plan.incomes.iter().zip(output.incomes.values_mut()) {
            let amount = check_sign(FlowKind::Income, name, date, source.monthly_amount(date))?;
            series.push(amount);
            cash += amount;
            incomes_total += amount;
        }
        output.incomes_total.push(incomes_total);

        // Expense sources come first in the expense series, then one per loan
        let mut expense_series = output.expenses.values_mut();
        let mut expenses_total = 0.0;
        for ((name, source), series) in plan.expenses.iter().zip(expense_series.by_ref()) {
            let amount = check_sign(FlowKind::Expense, name, date, source.monthly_amount(date))?;
            series.push(amount);
            cash += amount;
            expenses_total += amount;
        }

        // Minimum payments are made whether or not the month can afford them
        for ((name, loan), series) in plan.liabilities.iter_mut().zip(expense_series) {
            let target = loan.minimum_monthly(date)?;
            let remainder = loan.make_payment(target, date)?;
            let payment = target - remainder;
            series.push(-payment);
            cash -= payment;
            expenses_total -= payment;

            if payment > 0.0 && loan.value(date)? == 0.0 && metrics.record_payoff(name, date) {
                tracing::debug!(liability = name, %date, "liability paid off");
            }
        }
        output.expenses_total.push(expenses_total);
        output.cashflow.push(cash);

        let mut remaining = cash;
        if remaining > 0.0 && cash_balance < 0.0 {
            let leftover = (cash + cash_balance).max(0.0);
            let applied = remaining - leftover;
            cash_balance += applied;
            remaining = leftover;
            metrics.record_recovery(applied);
            if cash_balance >= 0.0 {
                tracing::debug!(%date, applied, "overdraft cleared");
            }
        }

        if let Some(handler) = &plan.cash_handler {
            remaining = handler.handle_cash(remaining, date, &mut plan.assets)?;
            if remaining != 0.0 {
                metrics.record_unhandled(remaining);
            }
        }

        let was_overdrawn = cash_balance < 0.0;
        cash_balance += remaining;
        if !was_overdrawn && cash_balance < 0.0 {
            tracing::debug!(%date, cash_balance, "cash balance overdrawn");
        }
        output.cash_balance.push(cash_balance);

        let mut liabilities_total = 0.0;
        for ((name, loan), series) in plan
            .liabilities
            .iter()
            .zip(output.liabilities.values_mut())
        {
            let value = check_sign(FlowKind::Liability, name, date, loan.value(date)?)?;
            series.push(value);
            liabilities_total += value;
        }
        output.liabilities_total.push(liabilities_total);

        let mut assets_total = 0.0;
        for ((name, asset), series) in plan.assets.iter().zip(output.assets.values_mut()) {
            let value = check_sign(FlowKind::Asset, name, date, asset.value(date)?)?;
            series.push(value);
            assets_total += value;
        }
        output.assets_total.push(assets_total);

        let net_worth = assets_total + liabilities_total + cash_balance;
        output.net_worth.push(net_worth);
        output.dates.push(date);
        metrics.record_month(cash_balance);

        tracing::trace!(
            %date,
            cashflow = cash,
            cash_balance,
            net_worth,
            "month settled"
        );
    }

    Ok((output, metrics))
}
