//! Signal — a bar on which the entry condition fired.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A buy signal: the close dropped below the rolling-mean threshold and the
/// cooldown since the previous signal was satisfied.
///
/// `bar_index` is the chronological position in the series, `entry_price`
/// the close of that bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub bar_index: usize,
    pub date: NaiveDate,
    pub entry_price: f64,
}
