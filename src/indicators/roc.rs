// =============================================================================
// Percent Change / Rate of Change (ROC)
// =============================================================================
//
// Fractional change over a look-back of `lag` rows:
//   change_i = (close_i - close_{i-lag}) / close_{i-lag}
//
// Multiply by 100 for a percentage (see `current_change_pct`).  Rows before
// `lag` and rows whose base is zero have no defined change.

/// Percent-change series as fractions, aligned index-for-index with `closes`.
///
/// # Edge cases
/// - `lag == 0` => every slot `None`
/// - `i < lag` => `None`
/// - `closes[i - lag] == 0` => `None`
pub fn calculate_pct_change(closes: &[f64], lag: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if lag == 0 {
        return result;
    }

    for i in lag..closes.len() {
        let prev = closes[i - lag];
        if prev != 0.0 {
            result[i] = Some((closes[i] - prev) / prev);
        }
    }
    result
}

/// Latest change over `lag` rows, in percent.
pub fn current_change_pct(closes: &[f64], lag: usize) -> Option<f64> {
    calculate_pct_change(closes, lag)
        .last()
        .copied()
        .flatten()
        .map(|c| c * 100.0)
}
