//! Horizon backtester — forward-return measurement and aggregation.
//!
//! Maps every signal to a `Trade` by pricing each configured horizon, then
//! reduces the trade log into a per-horizon `Summary`. Trades have no data
//! dependency on each other, so the map runs on the rayon pool; indexed
//! collect keeps output order identical to the serial pass.

use chrono::Duration;
use rayon::prelude::*;

use crate::domain::{BacktestResult, HorizonValue, PriceSeries, Signal, Summary, Trade};
use crate::params::{Horizon, ParamsError, StrategyParams};
use crate::signals;

/// Round to two fractional digits (percentage returns and their means).
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Price one horizon for one signal.
///
/// A non-positive entry price is a per-trade data error, flagged rather
/// than allowed to produce an infinite or NaN return. A horizon target
/// beyond the end of the series is not an error — the series just does not
/// extend far enough yet.
fn resolve(series: &PriceSeries, signal: &Signal, horizon: Horizon) -> HorizonValue {
    if signal.entry_price <= 0.0 {
        return HorizonValue::InvalidEntry;
    }

    let future = match horizon {
        Horizon::Bars(h) => signal
            .bar_index
            .checked_add(h)
            .and_then(|target| series.get(target))
            .map(|bar| bar.close),
        Horizon::Days(h) => {
            // Next trading day on or after the calendar target — markets
            // are not open every calendar day.
            let target = signal.date + Duration::days(h);
            series
                .first_index_at_or_after(target)
                .map(|i| series.bars()[i].close)
        }
    };

    match future {
        Some(close) => {
            HorizonValue::Return(round2((close - signal.entry_price) / signal.entry_price * 100.0))
        }
        None => HorizonValue::InsufficientData,
    }
}

/// Build the trade log: one trade per signal, one outcome per horizon.
pub fn evaluate_trades(
    series: &PriceSeries,
    signals: &[Signal],
    horizons: &[Horizon],
) -> Vec<Trade> {
    signals
        .par_iter()
        .map(|signal| Trade {
            signal: *signal,
            outcomes: horizons
                .iter()
                .map(|&horizon| resolve(series, signal, horizon))
                .collect(),
        })
        .collect()
}

/// Per-horizon mean of the available returns across the trade log.
///
/// A horizon's mean is computed only from trades carrying a numeric value
/// for it; with zero contributors the average is `InsufficientData`, never
/// zero and never a division-by-zero.
pub fn summarize(trades: &[Trade], horizons: &[Horizon]) -> Summary {
    let averages = (0..horizons.len())
        .map(|k| {
            let available: Vec<f64> = trades
                .iter()
                .filter_map(|trade| trade.outcomes[k].as_return())
                .collect();
            if available.is_empty() {
                HorizonValue::InsufficientData
            } else {
                HorizonValue::Return(round2(
                    available.iter().sum::<f64>() / available.len() as f64,
                ))
            }
        })
        .collect();

    Summary {
        trade_count: trades.len(),
        averages,
    }
}

/// Run the full engine: validate params, scan for signals, price every
/// horizon per signal, aggregate the summary.
pub fn run(series: &PriceSeries, params: &StrategyParams) -> Result<BacktestResult, ParamsError> {
    params.validate()?;
    let signals = signals::generate(series, params);
    let trades = evaluate_trades(series, &signals, &params.horizons);
    let summary = summarize(&trades, &params.horizons);
    Ok(BacktestResult {
        horizons: params.horizons.clone(),
        trades,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_series;
    use chrono::NaiveDate;

    fn signal_at(series: &PriceSeries, bar_index: usize) -> Signal {
        let bar = series.bars()[bar_index];
        Signal {
            bar_index,
            date: bar.date,
            entry_price: bar.close,
        }
    }

    #[test]
    fn round2_behavior() {
        assert_eq!(round2(10.0), 10.0);
        assert_eq!(round2(16.666_666), 16.67);
        assert_eq!(round2(-3.125), -3.13);
    }

    #[test]
    fn bar_horizon_within_series() {
        let series = make_series(&[100.0, 50.0, 55.0]);
        let signal = signal_at(&series, 1);
        assert_eq!(
            resolve(&series, &signal, Horizon::Bars(1)),
            HorizonValue::Return(10.0)
        );
    }

    #[test]
    fn bar_horizon_past_end_is_insufficient() {
        let series = make_series(&[100.0, 50.0, 55.0]);
        let signal = signal_at(&series, 1);
        assert_eq!(
            resolve(&series, &signal, Horizon::Bars(2)),
            HorizonValue::InsufficientData
        );
    }

    #[test]
    fn day_horizon_takes_next_available_bar() {
        // Thu, Fri, then Monday — a weekend gap.
        let base = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        let bars = vec![
            crate::domain::PriceBar { date: base, close: 100.0 },
            crate::domain::PriceBar {
                date: base + Duration::days(1),
                close: 60.0,
            },
            crate::domain::PriceBar {
                date: base + Duration::days(4),
                close: 70.0,
            },
        ];
        let series = PriceSeries::new(bars).unwrap();
        let signal = signal_at(&series, 1);

        // Target Saturday resolves to Monday's close.
        assert_eq!(
            resolve(&series, &signal, Horizon::Days(1)),
            HorizonValue::Return(16.67)
        );
        // Target exactly on Monday resolves to Monday as well.
        assert_eq!(
            resolve(&series, &signal, Horizon::Days(3)),
            HorizonValue::Return(16.67)
        );
        // Target past the last bar: no future bar exists.
        assert_eq!(
            resolve(&series, &signal, Horizon::Days(4)),
            HorizonValue::InsufficientData
        );
    }

    #[test]
    fn non_positive_entry_is_flagged() {
        let series = make_series(&[1.0, 0.0, 0.5]);
        let signal = signal_at(&series, 1);
        assert_eq!(
            resolve(&series, &signal, Horizon::Bars(1)),
            HorizonValue::InvalidEntry
        );
    }

    #[test]
    fn summary_excludes_markers_from_means() {
        let series = make_series(&[100.0, 50.0, 55.0, 60.0]);
        let horizons = [Horizon::Bars(1), Horizon::Bars(90)];
        let signals = [signal_at(&series, 1), signal_at(&series, 2)];
        let trades = evaluate_trades(&series, &signals, &horizons);

        // T+1: 50→55 = 10.00, 55→60 = 9.09; the mean 9.545 sits just below
        // the half in floating point and rounds to 9.54.
        let summary = summarize(&trades, &horizons);
        assert_eq!(summary.trade_count, 2);
        assert_eq!(summary.averages[0], HorizonValue::Return(9.54));
        // T+90 has no contributors at all.
        assert_eq!(summary.averages[1], HorizonValue::InsufficientData);
    }

    #[test]
    fn summary_of_empty_trade_log() {
        let horizons = [Horizon::Bars(90), Horizon::Bars(180)];
        let summary = summarize(&[], &horizons);
        assert_eq!(summary.trade_count, 0);
        assert!(summary
            .averages
            .iter()
            .all(|avg| *avg == HorizonValue::InsufficientData));
    }

    #[test]
    fn run_rejects_invalid_params() {
        let series = make_series(&[100.0; 10]);
        let mut params = StrategyParams::default();
        params.ma_length = 0;
        assert_eq!(
            run(&series, &params),
            Err(ParamsError::MaLengthTooSmall(0))
        );
    }
}
