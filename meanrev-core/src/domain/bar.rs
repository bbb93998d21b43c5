//! PriceBar and PriceSeries — the single-security daily close series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One daily close for the security under test.
///
/// The ingestion layer rounds `close` to one fractional digit before the
/// series is constructed; the engine never re-rounds entry prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Errors from series construction.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("bars not date-ascending at index {index}: {prev_date} followed by {date}")]
    OutOfOrder {
        index: usize,
        prev_date: NaiveDate,
        date: NaiveDate,
    },
}

/// Chronologically ordered price series, indexed 0..n-1.
///
/// The positional index is the addressing scheme for bars-ahead horizons;
/// the date column is the addressing scheme for calendar-days-ahead
/// horizons. Immutable once constructed for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Construct from bars already sorted by the caller.
    ///
    /// Dates must be non-decreasing; duplicate dates are permitted and not
    /// deduplicated. An empty series is valid — it simply produces no
    /// signals downstream.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        for i in 1..bars.len() {
            if bars[i].date < bars[i - 1].date {
                return Err(SeriesError::OutOfOrder {
                    index: i,
                    prev_date: bars[i - 1].date,
                    date: bars[i].date,
                });
            }
        }
        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn get(&self, index: usize) -> Option<&PriceBar> {
        self.bars.get(index)
    }

    /// Close column as a contiguous vector for indicator input.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Index of the first bar dated on or after `target`.
    ///
    /// Binary search over the non-decreasing date column — the "next trading
    /// day on or after" lookup used by calendar-day horizons. Returns None
    /// when every bar precedes `target`.
    pub fn first_index_at_or_after(&self, target: NaiveDate) -> Option<usize> {
        let idx = self.bars.partition_point(|b| b.date < target);
        (idx < self.bars.len()).then_some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bar(y: i32, m: u32, d: u32, close: f64) -> PriceBar {
        PriceBar {
            date: date(y, m, d),
            close,
        }
    }

    #[test]
    fn accepts_ascending_dates() {
        let series = PriceSeries::new(vec![
            bar(2024, 1, 2, 100.0),
            bar(2024, 1, 3, 101.5),
            bar(2024, 1, 4, 99.8),
        ])
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.get(1).unwrap().close, 101.5);
    }

    #[test]
    fn accepts_duplicate_dates() {
        let series = PriceSeries::new(vec![
            bar(2024, 1, 2, 100.0),
            bar(2024, 1, 2, 100.2),
            bar(2024, 1, 3, 99.0),
        ]);
        assert!(series.is_ok());
    }

    #[test]
    fn rejects_descending_dates() {
        let err = PriceSeries::new(vec![bar(2024, 1, 3, 100.0), bar(2024, 1, 2, 99.0)])
            .unwrap_err();
        let SeriesError::OutOfOrder { index, .. } = err;
        assert_eq!(index, 1);
    }

    #[test]
    fn empty_series_is_valid() {
        let series = PriceSeries::new(vec![]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.closes(), Vec::<f64>::new());
    }

    #[test]
    fn first_index_at_or_after_exact_hit() {
        let series = PriceSeries::new(vec![
            bar(2024, 1, 4, 100.0),
            bar(2024, 1, 5, 101.0),
            bar(2024, 1, 8, 102.0),
        ])
        .unwrap();
        assert_eq!(series.first_index_at_or_after(date(2024, 1, 5)), Some(1));
    }

    #[test]
    fn first_index_at_or_after_skips_weekend_gap() {
        let series = PriceSeries::new(vec![
            bar(2024, 1, 4, 100.0),
            bar(2024, 1, 5, 101.0),
            bar(2024, 1, 8, 102.0),
        ])
        .unwrap();
        // Jan 6 is a Saturday: the next available bar is Monday Jan 8.
        assert_eq!(series.first_index_at_or_after(date(2024, 1, 6)), Some(2));
    }

    #[test]
    fn first_index_at_or_after_past_end() {
        let series = PriceSeries::new(vec![bar(2024, 1, 4, 100.0)]).unwrap();
        assert_eq!(series.first_index_at_or_after(date(2024, 1, 5)), None);
    }

    #[test]
    fn first_index_at_or_after_duplicate_dates_returns_earliest() {
        let series = PriceSeries::new(vec![
            bar(2024, 1, 4, 100.0),
            bar(2024, 1, 5, 101.0),
            bar(2024, 1, 5, 102.0),
        ])
        .unwrap();
        assert_eq!(series.first_index_at_or_after(date(2024, 1, 5)), Some(1));
    }

    #[test]
    fn series_serialization_roundtrip() {
        let series = PriceSeries::new(vec![bar(2024, 1, 2, 100.1), bar(2024, 1, 3, 99.9)])
            .unwrap();
        let json = serde_json::to_string(&series).unwrap();
        let deser: PriceSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(series, deser);
    }
}
