//! Simple moving average over close prices.
//!
//! The window is the trailing `window` closes ending at `i` inclusive, so
//! the first defined value sits at index `window - 1`. Earlier indices are
//! NaN and never produce a signal.

/// Rolling mean of `closes` over `window` bars.
///
/// Computed incrementally — one add and one subtract per bar after the
/// initial window sum — so long series stay O(n).
pub fn rolling_mean(closes: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "window must be >= 1");
    let n = closes.len();
    let mut out = vec![f64::NAN; n];
    if n < window {
        return out;
    }

    let mut sum: f64 = closes[..window].iter().sum();
    out[window - 1] = sum / window as f64;
    for i in window..n {
        sum += closes[i] - closes[i - window];
        out[i] = sum / window as f64;
    }
    out
}

/// Buy threshold: the moving average scaled down by `percentage_offset`
/// percent. A signal requires the close to sit strictly below this value.
pub fn threshold(ma: f64, percentage_offset: f64) -> f64 {
    ma * (1.0 - percentage_offset / 100.0)
}
