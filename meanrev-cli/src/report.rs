//! Stdout tables and result artifacts.

use anyhow::{Context, Result};
use meanrev_core::{BacktestResult, HorizonValue};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Placeholder for horizons the series does not yet extend far enough to
/// price. Distinct from the marker for a bad entry price.
const NO_DATA: &str = "n/a";
const BAD_ENTRY: &str = "invalid";

fn cell(value: &HorizonValue) -> String {
    match value {
        HorizonValue::Return(r) => format!("{r:.2}%"),
        HorizonValue::InsufficientData => NO_DATA.into(),
        HorizonValue::InvalidEntry => BAD_ENTRY.into(),
    }
}

/// Print the summary block and the trade log table.
pub fn print_result(result: &BacktestResult) {
    println!();
    println!("=== Backtest Summary ===");
    println!("Trades:      {}", result.summary.trade_count);
    for (horizon, average) in result.horizons.iter().zip(&result.summary.averages) {
        println!("AVG {:<8} {}", format!("{horizon}:"), cell(average));
    }

    if result.trades.is_empty() {
        return;
    }

    println!();
    println!("--- Trade Log ---");
    let mut header = format!("{:<12} {:>11}", "Entry Date", "Entry Price");
    for horizon in &result.horizons {
        header.push_str(&format!(" {:>9}", horizon.label()));
    }
    println!("{header}");
    println!("{}", "-".repeat(header.len()));

    for trade in &result.trades {
        let mut row = format!(
            "{:<12} {:>11.1}",
            trade.signal.date.to_string(),
            trade.signal.entry_price
        );
        for outcome in &trade.outcomes {
            row.push_str(&format!(" {:>9}", cell(outcome)));
        }
        println!("{row}");
    }
    println!();
}

/// Write `trades.csv` and `result.json` under `output_dir`, returning the
/// directory path.
pub fn save_artifacts(result: &BacktestResult, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    write_trades_csv(&output_dir.join("trades.csv"), result)?;

    let json = serde_json::to_string_pretty(result).context("failed to serialize result")?;
    let json_path = output_dir.join("result.json");
    std::fs::write(&json_path, json)
        .with_context(|| format!("failed to write {}", json_path.display()))?;

    Ok(output_dir.to_path_buf())
}

fn write_trades_csv(path: &Path, result: &BacktestResult) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create trades CSV {}", path.display()))?;

    let mut header = vec!["entry_date".to_string(), "entry_price".to_string()];
    header.extend(result.horizons.iter().map(|h| h.label()));
    writeln!(file, "{}", header.join(","))?;

    for trade in &result.trades {
        let mut row = vec![
            trade.signal.date.to_string(),
            format!("{:.1}", trade.signal.entry_price),
        ];
        for outcome in &trade.outcomes {
            row.push(match outcome {
                HorizonValue::Return(r) => format!("{r:.2}"),
                HorizonValue::InsufficientData => "insufficient_data".into(),
                HorizonValue::InvalidEntry => "invalid_entry".into(),
            });
        }
        writeln!(file, "{}", row.join(","))?;
    }

    Ok(())
}
