mod cash_handlers;
mod instruments;
mod named;
mod rate;
mod results;
mod sources;

pub use cash_handlers::{
    BasicCashHandler, CashHandler, CashStrategy, MaxValueCashHandler, SequentialCashHandler,
};
pub use instruments::{Asset, Instrument, InstrumentState, Liability, minimum_payment};
pub use named::NamedMap;
pub use rate::AnnualFixedRate;
pub use results::{Chart, ChartSelection, Output, Series, SeriesGroup, SeriesKey};
pub use sources::{CashFlowSource, DateRangeSource, OneTimeSource, Source};
