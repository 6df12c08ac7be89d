//! Simulation output
//!
//! Every series in an [`Output`] is aligned index-for-index with
//! `Output::dates`. Per-category series are created up front for every
//! configured name, so each one has exactly one entry per month.

use jiff::civil::Date;
use serde::Serialize;

use super::named::NamedMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Output {
    pub dates: Vec<Date>,

    pub incomes: NamedMap<Vec<f64>>,
    pub incomes_total: Vec<f64>,
    /// Expense sources followed by loan payments (both non-positive)
    pub expenses: NamedMap<Vec<f64>>,
    pub expenses_total: Vec<f64>,
    pub liabilities: NamedMap<Vec<f64>>,
    pub liabilities_total: Vec<f64>,
    pub assets: NamedMap<Vec<f64>>,
    pub assets_total: Vec<f64>,

    /// Net cash produced in the month, before any routing
    pub cashflow: Vec<f64>,
    /// Uninvested cash carried between months; negative means overdraft
    pub cash_balance: Vec<f64>,
    pub net_worth: Vec<f64>,
}

fn series_for<'a>(names: impl Iterator<Item = &'a str>, capacity: usize) -> NamedMap<Vec<f64>> {
    names
        .map(|name| (name, Vec::with_capacity(capacity)))
        .collect()
}

impl Output {
    /// Empty output with one series per known category name.
    pub(crate) fn with_categories<'a>(
        capacity: usize,
        incomes: impl Iterator<Item = &'a str>,
        expenses: impl Iterator<Item = &'a str>,
        liabilities: impl Iterator<Item = &'a str> + Clone,
        assets: impl Iterator<Item = &'a str>,
    ) -> Self {
        Self {
            dates: Vec::with_capacity(capacity),
            incomes: series_for(incomes, capacity),
            expenses: series_for(expenses.chain(liabilities.clone()), capacity),
            liabilities: series_for(liabilities, capacity),
            assets: series_for(assets, capacity),
            incomes_total: Vec::with_capacity(capacity),
            expenses_total: Vec::with_capacity(capacity),
            liabilities_total: Vec::with_capacity(capacity),
            assets_total: Vec::with_capacity(capacity),
            cashflow: Vec::with_capacity(capacity),
            cash_balance: Vec::with_capacity(capacity),
            net_worth: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn final_net_worth(&self) -> Option<f64> {
        self.net_worth.last().copied()
    }

    pub fn final_cash_balance(&self) -> Option<f64> {
        self.cash_balance.last().copied()
    }

    /// Position of the first month equal to `date`, if it was simulated.
    pub fn index_of(&self, date: Date) -> Option<usize> {
        let i = self.dates.partition_point(|&d| d < date);
        (self.dates.get(i) == Some(&date)).then_some(i)
    }

    pub fn net_worth_at(&self, date: Date) -> Option<f64> {
        self.index_of(date).map(|i| self.net_worth[i])
    }

    pub fn group(&self, group: SeriesGroup) -> &NamedMap<Vec<f64>> {
        match group {
            SeriesGroup::Incomes => &self.incomes,
            SeriesGroup::Expenses => &self.expenses,
            SeriesGroup::Liabilities => &self.liabilities,
            SeriesGroup::Assets => &self.assets,
        }
    }

    /// Value of the `name` series in `group` at `date`.
    ///
    /// A loan appears twice: its payments under [`SeriesGroup::Expenses`]
    /// and its balance under [`SeriesGroup::Liabilities`].
    pub fn value_at(&self, group: SeriesGroup, name: &str, date: Date) -> Option<f64> {
        let i = self.index_of(date)?;
        self.group(group).get(name)?.get(i).copied()
    }

    fn aggregates(&self) -> [(&'static str, &Vec<f64>); 7] {
        [
            ("Incomes", &self.incomes_total),
            ("Expenses", &self.expenses_total),
            ("Liabilities", &self.liabilities_total),
            ("Assets", &self.assets_total),
            ("Cashflow", &self.cashflow),
            ("Cash Balance", &self.cash_balance),
            ("Net Worth", &self.net_worth),
        ]
    }

    /// Package a subset of series with the dates for an external renderer.
    pub fn chart(&self, title: impl Into<String>, selection: ChartSelection) -> Chart {
        let from_group = |group: &NamedMap<Vec<f64>>| -> Vec<Series> {
            group
                .iter()
                .map(|(name, values)| Series::new(name, values))
                .collect()
        };

        let series = match selection {
            ChartSelection::Incomes => from_group(&self.incomes),
            ChartSelection::Expenses => from_group(&self.expenses),
            ChartSelection::Liabilities => from_group(&self.liabilities),
            ChartSelection::Assets => from_group(&self.assets),
            ChartSelection::Totals => self
                .aggregates()
                .into_iter()
                .map(|(name, values)| Series::new(name, values))
                .collect(),
            ChartSelection::NetWorth => vec![Series::new("Net Worth", &self.net_worth)],
            ChartSelection::Named(keys) => keys
                .iter()
                .filter_map(|key| match key {
                    SeriesKey::Category(group, name) => self
                        .group(*group)
                        .get(name)
                        .map(|values| Series::new(name, values)),
                    SeriesKey::Total(label) => self
                        .aggregates()
                        .into_iter()
                        .find(|(name, _)| *name == label.as_str())
                        .map(|(name, values)| Series::new(name, values)),
                })
                .collect(),
        };

        Chart {
            title: title.into(),
            dates: self.dates.clone(),
            series,
        }
    }
}

/// Which series a [`Chart`] should carry
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSelection {
    Incomes,
    Expenses,
    Liabilities,
    Assets,
    /// The seven aggregate series
    Totals,
    NetWorth,
    /// Specific series in the given order; unknown names are skipped
    Named(Vec<SeriesKey>),
}

/// The per-category groups of an [`Output`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesGroup {
    Incomes,
    Expenses,
    Liabilities,
    Assets,
}

/// Names one series for [`ChartSelection::Named`]
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesKey {
    Category(SeriesGroup, String),
    /// An aggregate by label, e.g. "Net Worth" or "Cash Balance"
    Total(String),
}

impl SeriesKey {
    #[must_use]
    pub fn category(group: SeriesGroup, name: impl Into<String>) -> Self {
        SeriesKey::Category(group, name.into())
    }

    #[must_use]
    pub fn total(label: impl Into<String>) -> Self {
        SeriesKey::Total(label.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    fn new(name: &str, values: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            values: values.to_vec(),
        }
    }
}

/// Renderer-facing bundle: a title, the x axis, and named y series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub dates: Vec<Date>,
    pub series: Vec<Series>,
}
