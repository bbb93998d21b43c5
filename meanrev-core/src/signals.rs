//! Signal generation — the mean-reversion entry scan.
//!
//! A bar fires when its close sits `percentage_offset` percent below the
//! rolling mean and at least `cooldown_bars` bars have passed since the
//! previous signal. The scan is a single left-to-right pass carrying the
//! last emitted index as its only state.

use crate::domain::{PriceSeries, Signal};
use crate::indicators::{rolling_mean, threshold};
use crate::params::StrategyParams;

/// Scan the series and emit buy signals in strictly increasing bar order.
///
/// The first possible signal sits at `ma_length - 1`, the first bar with a
/// full rolling window; a series shorter than `ma_length` yields no signals
/// (an empty result, not an error). The cooldown is strict and measured in
/// bars: after a signal at `i`, the next eligible bar is
/// `i + cooldown_bars + 1`. The first eligible bar is never blocked.
pub fn generate(series: &PriceSeries, params: &StrategyParams) -> Vec<Signal> {
    if series.is_empty() || series.len() < params.ma_length {
        return Vec::new();
    }

    let closes = series.closes();
    let ma = rolling_mean(&closes, params.ma_length);

    let mut signals = Vec::new();
    let mut last_signal: Option<usize> = None;

    for i in (params.ma_length - 1)..series.len() {
        if ma[i].is_nan() {
            continue;
        }
        let buy_below = threshold(ma[i], params.percentage_offset);
        let cooled = match last_signal {
            Some(last) => i - last > params.cooldown_bars,
            None => true,
        };
        if closes[i] < buy_below && cooled {
            let bar = &series.bars()[i];
            signals.push(Signal {
                bar_index: i,
                date: bar.date,
                entry_price: bar.close,
            });
            last_signal = Some(i);
        }
    }
    signals
}
