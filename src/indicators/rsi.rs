// =============================================================================
// Relative Strength Index (RSI) — Simple Rolling Averages
// =============================================================================
//
// Step 1 — Compute period-over-period price differences.
// Step 2 — Split each difference into a gain (negative diffs zeroed) and a
//          loss (positive diffs zeroed, sign flipped).
// Step 3 — Average gains and losses over the trailing `period` differences
//          (plain arithmetic mean, no Wilder smoothing).
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// A window without any loss has no defined RS.  That slot is reported as
// `None` rather than clamped to 100.
//
// Thresholds:  RSI > 70 => OVERBOUGHT,  RSI < 30 => OVERSOLD.
// =============================================================================

use tracing::trace;

use crate::types::RsiZone;

pub const OVERBOUGHT: f64 = 70.0;
pub const OVERSOLD: f64 = 30.0;

/// Compute the RSI series for `closes`, aligned index-for-index with the input.
///
/// Slot `i` uses the differences ending at close `i`, so the first defined
/// slot is `i == period`.
///
/// # Edge cases
/// - `period == 0` => every slot `None`
/// - `closes.len() < period + 1` => every slot `None`
/// - Average loss of zero (including a flat window) => `None` for that slot
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() < period + 1 {
        trace!(len = closes.len(), period, "RSI: insufficient data");
        return result;
    }

    // --- Split deltas into gains / losses ------------------------------------
    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|w| {
            let d = w[1] - w[0];
            (d.max(0.0), (-d).max(0.0))
        })
        .unzip();

    let period_f = period as f64;
    for (j, (g, l)) in gains.windows(period).zip(losses.windows(period)).enumerate() {
        let avg_gain = g.iter().sum::<f64>() / period_f;
        let avg_loss = l.iter().sum::<f64>() / period_f;
        // Delta j spans closes j..=j+1, so window j ends at close j + period.
        result[j + period] = rsi_from_averages(avg_gain, avg_loss);
    }

    result
}

/// Most recent RSI value together with its zone.
///
/// Returns `None` when the last slot is undefined.
pub fn current_rsi(closes: &[f64], period: usize) -> Option<(f64, RsiZone)> {
    let value = calculate_rsi(closes, period).last().copied().flatten()?;
    Some((value, classify_rsi(value)))
}

/// Map an RSI reading to its 70 / 30 zone.
pub fn classify_rsi(value: f64) -> RsiZone {
    if value > OVERBOUGHT {
        RsiZone::Overbought
    } else if value < OVERSOLD {
        RsiZone::Oversold
    } else {
        RsiZone::Neutral
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// Returns `None` when `avg_loss` is zero or the result is non-finite.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        return None;
    }
    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - 100.0 / (1.0 + rs);
    rsi.is_finite().then_some(rsi)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    // ---- calculate_rsi ---------------------------------------------------

    #[test]
    fn rsi_empty_input() {
        assert!(calculate_rsi(&[], 14).is_empty());
    }

    #[test]
    fn rsi_period_zero() {
        assert!(calculate_rsi(&[1.0, 2.0, 3.0], 0).iter().all(Option::is_none));
    }

    #[test]
    fn rsi_insufficient_data() {
        // 14 closes => 13 deltas < 14.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert!(calculate_rsi(&closes, 14).iter().all(Option::is_none));
    }

    #[test]
    fn rsi_all_gains_is_undefined() {
        // Strictly ascending prices => no losses => RS undefined, not 100.
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let series = calculate_rsi(&closes, 14);
        assert_eq!(series.len(), 30);
        assert!(series.iter().all(Option::is_none));
    }

    #[test]
    fn rsi_all_losses_is_zero() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let series = calculate_rsi(&closes, 14);
        assert!(series[..14].iter().all(Option::is_none));
        for v in &series[14..] {
            assert!(v.unwrap().abs() < 1e-10, "expected 0.0, got {v:?}");
        }
    }

    #[test]
    fn rsi_flat_market_is_undefined() {
        let closes = vec![100.0; 30];
        assert!(calculate_rsi(&closes, 14).iter().all(Option::is_none));
    }

    #[test]
    fn rsi_known_value() {
        // Deltas: +2, -1, +2, -1  with period 4 => avg_gain 1.0, avg_loss 0.5
        // RS = 2 => RSI = 100 - 100/3
        let closes = vec![10.0, 12.0, 11.0, 13.0, 12.0];
        let series = calculate_rsi(&closes, 4);
        assert!(series[..4].iter().all(Option::is_none));
        let expected = 100.0 - 100.0 / 3.0;
        assert!((series[4].unwrap() - expected).abs() < 1e-10);
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let series = calculate_rsi(&closes, 14);
        assert!(series[14..].iter().all(Option::is_some));
        for v in series.iter().flatten() {
            assert!((0.0..=100.0).contains(v), "RSI {v} out of range");
        }
    }

    // ---- current_rsi -----------------------------------------------------

    #[test]
    fn current_rsi_oversold() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let (val, zone) = current_rsi(&closes, 14).unwrap();
        assert!(val.abs() < 1e-10);
        assert_eq!(zone, RsiZone::Oversold);
    }

    #[test]
    fn current_rsi_none_without_losses() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        assert!(current_rsi(&closes, 14).is_none());
        assert!(current_rsi(&[], 14).is_none());
    }

    #[test]
    fn classify_thresholds_are_exclusive() {
        assert_eq!(classify_rsi(70.0), RsiZone::Neutral);
        assert_eq!(classify_rsi(70.1), RsiZone::Overbought);
        assert_eq!(classify_rsi(30.0), RsiZone::Neutral);
        assert_eq!(classify_rsi(29.9), RsiZone::Oversold);
    }
}
