//! Domain types — price bars, signals, trades, summaries.

pub mod bar;
pub mod signal;
pub mod trade;

pub use bar::{PriceBar, PriceSeries, SeriesError};
pub use signal::Signal;
pub use trade::{BacktestResult, HorizonValue, Summary, Trade};
