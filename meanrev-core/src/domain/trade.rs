//! Trade and Summary — per-signal horizon outcomes and their aggregation.

use serde::{Deserialize, Serialize};

use super::signal::Signal;
use crate::params::Horizon;

/// Outcome of one horizon lookup for one trade.
///
/// `InsufficientData` means the series does not extend far enough to price
/// the horizon. `InvalidEntry` flags a non-positive entry price, a per-trade
/// data error. Both are explicit tagged markers, never coerced to 0 or NaN,
/// and neither contributes to a summary mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HorizonValue {
    /// Percentage return, rounded to two fractional digits.
    Return(f64),
    InsufficientData,
    InvalidEntry,
}

impl HorizonValue {
    /// The numeric return, if one was computed.
    pub fn as_return(&self) -> Option<f64> {
        match self {
            Self::Return(r) => Some(*r),
            _ => None,
        }
    }
}

/// One trade: the entry signal plus one outcome per configured horizon.
///
/// `outcomes[k]` corresponds to `horizons[k]` of the `BacktestResult` that
/// owns the trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub signal: Signal,
    pub outcomes: Vec<HorizonValue>,
}

/// Aggregate statistics across the whole trade log.
///
/// `averages[k]` is the mean of the available returns for `horizons[k]`,
/// or `InsufficientData` when no trade has a value for that horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub trade_count: usize,
    pub averages: Vec<HorizonValue>,
}

/// Full engine output: the configured horizons, the trade log, the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub horizons: Vec<Horizon>,
    pub trades: Vec<Trade>,
    pub summary: Summary,
}
