//! Price CSV ingestion — the collaborator duties the engine core leaves to
//! its caller: column normalization, date parsing, rounding, sorting.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use meanrev_core::{PriceBar, PriceSeries};
use std::path::Path;

/// Load a headered price CSV into a validated series.
///
/// Column names are matched case-insensitively; `date` and `close` are
/// required, anything else (e.g. `ticker`) is ignored. Closes are rounded
/// to one fractional digit and bars are sorted by date before the series is
/// constructed.
pub fn load_series(path: &Path) -> Result<PriceSeries> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let date_col = find_column(&headers, "date")?;
    let close_col = find_column(&headers, "close")?;

    let mut bars = Vec::new();
    for (row, record) in reader.records().enumerate() {
        // Header is line 1, first record line 2.
        let line = row + 2;
        let record = record.with_context(|| format!("failed to read line {line}"))?;

        let date_raw = record
            .get(date_col)
            .with_context(|| format!("line {line}: missing date field"))?
            .trim();
        let close_raw = record
            .get(close_col)
            .with_context(|| format!("line {line}: missing close field"))?
            .trim();

        let date =
            parse_date(date_raw).with_context(|| format!("line {line}: bad date"))?;
        let close: f64 = close_raw
            .parse()
            .with_context(|| format!("line {line}: bad close '{close_raw}'"))?;

        bars.push(PriceBar {
            date,
            close: round1(close),
        });
    }

    bars.sort_by_key(|bar| bar.date);
    PriceSeries::new(bars).context("series failed validation after sort")
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .with_context(|| format!("missing required column '{name}'"))
}

/// ISO (2024-03-15) first, then day-first (15/03/2024) as the source
/// spreadsheets use.
fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .with_context(|| format!("unrecognized date '{raw}'"))
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
