// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean of the trailing `period` closes:
//   SMA_i = (close_{i-period+1} + ... + close_i) / period
//
// The output is aligned with the input; the first `period - 1` slots are
// `None` (warm-up).
// =============================================================================

use tracing::trace;

/// Compute the SMA series for `closes`, aligned index-for-index with the input.
///
/// # Edge cases
/// - `period == 0` => every slot `None`
/// - `closes.len() < period` => every slot `None`
pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() < period {
        trace!(len = closes.len(), period, "SMA: insufficient data");
        return result;
    }

    let period_f = period as f64;
    for (i, window) in closes.windows(period).enumerate() {
        result[i + period - 1] = Some(window.iter().sum::<f64>() / period_f);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_warmup_is_none() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let sma = calculate_sma(&closes, 20);
        assert_eq!(sma.len(), 30);
        assert!(sma[..19].iter().all(Option::is_none));
        assert!(sma[19..].iter().all(Option::is_some));
    }

    #[test]
    fn sma_matches_mean_of_first_window() {
        // i = 19 with period 20 is the mean of the first 20 closes: 1..=20 => 10.5
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let sma = calculate_sma(&closes, 20);
        assert!((sma[19].unwrap() - 10.5).abs() < 1e-10);
        assert!((sma[29].unwrap() - 20.5).abs() < 1e-10);
    }

    #[test]
    fn sma_insufficient_data() {
        let closes = vec![1.0, 2.0, 3.0];
        assert!(calculate_sma(&closes, 5).iter().all(Option::is_none));
    }

    #[test]
    fn sma_period_zero() {
        assert!(calculate_sma(&[1.0, 2.0], 0).iter().all(Option::is_none));
    }

    #[test]
    fn sma_period_one_is_identity() {
        let closes = vec![3.0, 1.0, 4.0];
        let sma = calculate_sma(&closes, 1);
        assert_eq!(sma, vec![Some(3.0), Some(1.0), Some(4.0)]);
    }
}
