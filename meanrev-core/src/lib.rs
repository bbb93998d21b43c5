//! MeanRev Core — mean-reversion signal detection and horizon backtesting.
//!
//! The engine operates on a single-security daily close series in two
//! sequential stages:
//! 1. Signal generation — a rolling-mean threshold scan with a cooldown
//!    constraint between signals
//! 2. Horizon backtesting — forward returns at fixed bar or calendar-day
//!    offsets after each signal, aggregated into per-horizon means
//!
//! The crate is pure: no I/O, no hidden state, no clock. Identical
//! (series, params) inputs always produce identical output. Ingestion and
//! presentation live in `meanrev-cli`.

pub mod backtest;
pub mod domain;
pub mod indicators;
pub mod params;
pub mod signals;

pub use backtest::run;
pub use domain::{
    BacktestResult, HorizonValue, PriceBar, PriceSeries, SeriesError, Signal, Summary, Trade,
};
pub use params::{Horizon, HorizonMode, ParamsError, StrategyParams};
