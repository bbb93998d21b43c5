//! MeanRev CLI — run mean-reversion backtests over a daily close CSV.
//!
//! Commands:
//! - `run` — load a price CSV, run the engine, print the summary and trade
//!   log, optionally save artifacts (trades.csv, result.json)
//! - `inspect` — report row count, date range, and close range for a CSV

mod config;
mod data;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use meanrev_core::{HorizonMode, StrategyParams};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "meanrev",
    about = "Mean-reversion signal detection and forward-return backtesting"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a backtest over a daily close CSV.
    Run {
        /// Price CSV with `date` and `close` columns.
        #[arg(long)]
        data: PathBuf,

        /// TOML strategy config. When present, the strategy flags below are ignored.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Rolling window length in bars.
        #[arg(long, default_value_t = 50)]
        ma_length: usize,

        /// Percent below the moving average that triggers a signal.
        #[arg(long, default_value_t = 15.0)]
        offset: f64,

        /// Minimum bar spacing between signals.
        #[arg(long, default_value_t = 100)]
        cooldown: usize,

        /// Horizon offsets, comma-separated (e.g. 90,180,360).
        #[arg(long, value_delimiter = ',', default_values_t = [90, 180, 360])]
        horizons: Vec<u32>,

        /// Horizon addressing: bars ahead or calendar days ahead.
        #[arg(long, value_enum, default_value_t = ModeArg::Bars)]
        horizon_mode: ModeArg,

        /// Save trades.csv and result.json to this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Report row count, date range, and close range for a price CSV.
    Inspect {
        /// Price CSV with `date` and `close` columns.
        #[arg(long)]
        data: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Bars,
    Days,
}

impl From<ModeArg> for HorizonMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Bars => HorizonMode::Bars,
            ModeArg::Days => HorizonMode::Days,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            config,
            ma_length,
            offset,
            cooldown,
            horizons,
            horizon_mode,
            output_dir,
        } => run_cmd(
            data,
            config,
            ma_length,
            offset,
            cooldown,
            horizons,
            horizon_mode,
            output_dir,
        ),
        Commands::Inspect { data } => inspect_cmd(&data),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_cmd(
    data: PathBuf,
    config: Option<PathBuf>,
    ma_length: usize,
    offset: f64,
    cooldown: usize,
    horizons: Vec<u32>,
    horizon_mode: ModeArg,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let params = match config {
        Some(path) => config::ConfigFile::from_file(&path)?.to_params(),
        None => StrategyParams::with_horizons(
            ma_length,
            offset,
            cooldown,
            horizon_mode.into(),
            &horizons,
        ),
    };

    let series = data::load_series(&data)?;
    let result = meanrev_core::run(&series, &params)?;

    report::print_result(&result);

    if let Some(dir) = output_dir {
        let out = report::save_artifacts(&result, &dir)?;
        println!("Artifacts saved to: {}", out.display());
    }

    Ok(())
}

fn inspect_cmd(data: &Path) -> Result<()> {
    let series = data::load_series(data)?;

    if series.is_empty() {
        println!("{}: empty series", data.display());
        return Ok(());
    }

    let bars = series.bars();
    let first = &bars[0];
    let last = &bars[bars.len() - 1];
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for bar in bars {
        lo = lo.min(bar.close);
        hi = hi.max(bar.close);
    }

    println!("File:       {}", data.display());
    println!("Bars:       {}", series.len());
    println!("Date range: {} to {}", first.date, last.date);
    println!("Close:      {lo:.1} to {hi:.1}");
    Ok(())
}
