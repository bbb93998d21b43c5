//! Strategy parameters and validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A forward offset at which post-signal performance is measured.
///
/// `Bars` addresses by chronological position (`bar_index + n`); `Days`
/// addresses by calendar distance, resolved to the next trading day on or
/// after the target date. A params set uses a single addressing mode across
/// all of its horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "offset", rename_all = "snake_case")]
pub enum Horizon {
    Bars(usize),
    Days(i64),
}

impl Horizon {
    /// Column label for tables and artifacts ("T+90" / "T+30d").
    pub fn label(&self) -> String {
        match self {
            Horizon::Bars(n) => format!("T+{n}"),
            Horizon::Days(n) => format!("T+{n}d"),
        }
    }

    fn has_positive_offset(&self) -> bool {
        match self {
            Horizon::Bars(n) => *n >= 1,
            Horizon::Days(n) => *n >= 1,
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Horizon addressing mode for a whole params set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizonMode {
    Bars,
    Days,
}

/// Errors from parameter validation.
///
/// Out-of-range parameters are rejected before any computation begins,
/// never silently clamped.
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("ma_length must be >= 1 (got {0})")]
    MaLengthTooSmall(usize),

    #[error("cooldown_bars must be >= 1 (got {0})")]
    CooldownTooSmall(usize),

    #[error("percentage_offset must be within [0, 100] (got {0})")]
    OffsetOutOfRange(f64),

    #[error("at least one horizon is required")]
    NoHorizons,

    #[error("horizon offsets must be >= 1 (got {0})")]
    HorizonTooSmall(Horizon),
}

/// Engine parameters: rolling window, decline threshold, cooldown, horizons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyParams {
    /// Rolling window length for the simple moving average, in bars.
    pub ma_length: usize,
    /// Percent below the moving average that triggers a signal.
    pub percentage_offset: f64,
    /// Minimum bar spacing required between consecutive signals (strict).
    pub cooldown_bars: usize,
    /// Forward horizons measured per trade, one addressing mode for all.
    pub horizons: Vec<Horizon>,
}

impl StrategyParams {
    /// Build a params set from a mode and an offset list, preserving order.
    ///
    /// Going through a single mode keeps bar-offset and day-offset horizons
    /// from being mixed within one run.
    pub fn with_horizons(
        ma_length: usize,
        percentage_offset: f64,
        cooldown_bars: usize,
        mode: HorizonMode,
        offsets: &[u32],
    ) -> Self {
        let horizons = offsets
            .iter()
            .map(|&o| match mode {
                HorizonMode::Bars => Horizon::Bars(o as usize),
                HorizonMode::Days => Horizon::Days(i64::from(o)),
            })
            .collect();
        Self {
            ma_length,
            percentage_offset,
            cooldown_bars,
            horizons,
        }
    }

    /// Reject out-of-range parameters before computation begins.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.ma_length < 1 {
            return Err(ParamsError::MaLengthTooSmall(self.ma_length));
        }
        if self.cooldown_bars < 1 {
            return Err(ParamsError::CooldownTooSmall(self.cooldown_bars));
        }
        if !(0.0..=100.0).contains(&self.percentage_offset) {
            return Err(ParamsError::OffsetOutOfRange(self.percentage_offset));
        }
        if self.horizons.is_empty() {
            return Err(ParamsError::NoHorizons);
        }
        for horizon in &self.horizons {
            if !horizon.has_positive_offset() {
                return Err(ParamsError::HorizonTooSmall(*horizon));
            }
        }
        Ok(())
    }
}

impl Default for StrategyParams {
    /// The classic parameter set: 50-bar mean, 15% decline, 100-bar
    /// cooldown, returns measured 90/180/360 bars out.
    fn default() -> Self {
        Self::with_horizons(50, 15.0, 100, HorizonMode::Bars, &[90, 180, 360])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_validate() {
        let params = StrategyParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.ma_length, 50);
        assert_eq!(
            params.horizons,
            vec![Horizon::Bars(90), Horizon::Bars(180), Horizon::Bars(360)]
        );
    }

    #[test]
    fn rejects_zero_ma_length() {
        let mut params = StrategyParams::default();
        params.ma_length = 0;
        assert_eq!(params.validate(), Err(ParamsError::MaLengthTooSmall(0)));
    }

    #[test]
    fn rejects_zero_cooldown() {
        let mut params = StrategyParams::default();
        params.cooldown_bars = 0;
        assert_eq!(params.validate(), Err(ParamsError::CooldownTooSmall(0)));
    }

    #[test]
    fn rejects_offset_out_of_range() {
        let mut params = StrategyParams::default();
        params.percentage_offset = 100.5;
        assert_eq!(
            params.validate(),
            Err(ParamsError::OffsetOutOfRange(100.5))
        );
        params.percentage_offset = -0.1;
        assert!(params.validate().is_err());
        params.percentage_offset = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn accepts_boundary_offsets() {
        let mut params = StrategyParams::default();
        params.percentage_offset = 0.0;
        assert!(params.validate().is_ok());
        params.percentage_offset = 100.0;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_empty_horizons() {
        let mut params = StrategyParams::default();
        params.horizons.clear();
        assert_eq!(params.validate(), Err(ParamsError::NoHorizons));
    }

    #[test]
    fn rejects_zero_offset_horizon() {
        let mut params = StrategyParams::default();
        params.horizons = vec![Horizon::Bars(0)];
        assert_eq!(
            params.validate(),
            Err(ParamsError::HorizonTooSmall(Horizon::Bars(0)))
        );
    }

    #[test]
    fn day_mode_builds_day_horizons() {
        let params =
            StrategyParams::with_horizons(50, 15.0, 100, HorizonMode::Days, &[5, 10, 15]);
        assert_eq!(
            params.horizons,
            vec![Horizon::Days(5), Horizon::Days(10), Horizon::Days(15)]
        );
    }

    #[test]
    fn horizon_labels() {
        assert_eq!(Horizon::Bars(90).label(), "T+90");
        assert_eq!(Horizon::Days(30).label(), "T+30d");
        assert_eq!(format!("{}", Horizon::Bars(180)), "T+180");
    }
}
