// =============================================================================
// Return Volatility
// =============================================================================
//
// Volatility is the sample standard deviation (n - 1 denominator) of the
// 1-period fractional returns, expressed in percent:
//
//   r_i   = (close_i - close_{i-1}) / close_{i-1}
//   vol   = stddev(r) * 100
//
// `calculate_volatility` uses every defined return in the series;
// `calculate_rolling_volatility` uses the trailing `window` returns and stays
// undefined until that many returns exist.
// =============================================================================

use tracing::trace;

use super::roc::calculate_pct_change;

/// Whole-series volatility in percent.
///
/// Returns `None` with fewer than two defined returns.
pub fn calculate_volatility(closes: &[f64]) -> Option<f64> {
    let returns: Vec<f64> = calculate_pct_change(closes, 1).into_iter().flatten().collect();
    sample_std(&returns).map(|s| s * 100.0)
}

/// Rolling volatility in percent, aligned index-for-index with `closes`.
///
/// Slot `i` covers the returns ending at close `i`, so the first defined slot
/// is `i == window`.  A window containing an undefined return (zero base) is
/// itself undefined.
///
/// # Edge cases
/// - `window < 2` => every slot `None` (a single sample has no spread)
/// - `closes.len() <= window` => every slot `None`
pub fn calculate_rolling_volatility(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if window < 2 || closes.len() <= window {
        trace!(len = closes.len(), window, "rolling volatility: insufficient data");
        return result;
    }

    let returns = calculate_pct_change(closes, 1);
    for i in window..closes.len() {
        let slice = &returns[i + 1 - window..=i];
        let defined: Option<Vec<f64>> = slice.iter().copied().collect();
        result[i] = defined.and_then(|r| sample_std(&r)).map(|s| s * 100.0);
    }
    result
}

/// Sample standard deviation (n - 1 denominator).
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std = var.sqrt();
    std.is_finite().then_some(std)
}
