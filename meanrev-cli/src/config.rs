//! TOML strategy configuration.

use anyhow::{Context, Result};
use meanrev_core::{HorizonMode, StrategyParams};
use serde::Deserialize;
use std::path::Path;

/// On-disk shape of a strategy file:
///
/// ```toml
/// [strategy]
/// ma_length = 50
/// percentage_offset = 15.0
/// cooldown_bars = 100
/// horizon_mode = "bars"
/// horizons = [90, 180, 360]
/// ```
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub strategy: StrategySection,
}

#[derive(Debug, Deserialize)]
pub struct StrategySection {
    pub ma_length: usize,
    pub percentage_offset: f64,
    pub cooldown_bars: usize,
    pub horizon_mode: HorizonMode,
    pub horizons: Vec<u32>,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid strategy config")
    }

    /// Convert to engine params. Range validation happens in the engine.
    pub fn to_params(&self) -> StrategyParams {
        StrategyParams::with_horizons(
            self.strategy.ma_length,
            self.strategy.percentage_offset,
            self.strategy.cooldown_bars,
            self.strategy.horizon_mode,
            &self.strategy.horizons,
        )
    }
}
