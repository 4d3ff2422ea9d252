// =============================================================================
// Trailing Range — max / min over the last `window` closes
// =============================================================================

use serde::Serialize;

/// Highest and lowest close of a trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub high: f64,
    pub low: f64,
    /// Number of closes actually covered (less than the requested window when
    /// the series is shorter).
    pub span: usize,
}

/// Range over the last `window` closes, or over the whole series when it is
/// shorter than `window`.
///
/// Returns `None` for an empty series or `window == 0`.
pub fn calculate_range(closes: &[f64], window: usize) -> Option<PriceRange> {
    if closes.is_empty() || window == 0 {
        return None;
    }

    let start = closes.len().saturating_sub(window);
    let tail = &closes[start..];
    let (high, low) = tail
        .iter()
        .fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), &c| (hi.max(c), lo.min(c)));

    Some(PriceRange {
        high,
        low,
        span: tail.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_uses_trailing_window() {
        let closes = vec![500.0, 1.0, 4.0, 2.0, 3.0];
        let r = calculate_range(&closes, 3).unwrap();
        assert_eq!(r.high, 4.0);
        assert_eq!(r.low, 2.0);
        assert_eq!(r.span, 3);
    }

    #[test]
    fn short_series_uses_everything() {
        let closes = vec![5.0, 9.0, 1.0];
        let r = calculate_range(&closes, 30).unwrap();
        assert_eq!((r.high, r.low, r.span), (9.0, 1.0, 3));
    }

    #[test]
    fn empty_or_zero_window() {
        assert!(calculate_range(&[], 30).is_none());
        assert!(calculate_range(&[1.0], 0).is_none());
    }
}
