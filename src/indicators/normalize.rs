// =============================================================================
// Base-100 Normalisation
// =============================================================================
//
// Rescales a series so that its first value is exactly 100, making returns of
// assets with very different price levels comparable on one axis:
//   norm_i = close_i / close_0 * 100

/// Base-100 series aligned with `closes`.
///
/// The first slot is set to exactly `100.0` rather than computed, so it holds
/// bit-for-bit regardless of rounding.  A zero or non-finite base yields all
/// `None`.
pub fn normalize_base_100(closes: &[f64]) -> Vec<Option<f64>> {
    let Some(&base) = closes.first() else {
        return Vec::new();
    };
    if base == 0.0 || !base.is_finite() {
        return vec![None; closes.len()];
    }

    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| if i == 0 { Some(100.0) } else { Some(c / base * 100.0) })
        .collect()
}
