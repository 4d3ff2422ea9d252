// =============================================================================
// Synthetic Forecast — the dashboard's "ML prediction" panel
// =============================================================================
//
// There is no model behind this panel.  The "prediction" is a single draw
//
//   x ~ Normal(drift, volatility)        (defaults 0.005, 0.015)
//   predicted = latest_price * (1 + x)
//   change    = x * 100
//
// taken from the pass's random stream.  It never reads the price history;
// only the latest price scales it.  The label is a fixed threshold ladder on
// `change`, evaluated top to bottom (first match wins):
//
//   change >  2.0  => BUY  strong    "strong uptrend expected"
//   change >  0.5  => BUY  moderate  "moderate uptrend"
//   change < -2.0  => SELL strong    "strong downtrend expected"
//   change < -0.5  => SELL moderate  "moderate downtrend"
//   otherwise      => HOLD           "sideways movement expected"
//
// The displayed confidence is a configured constant, not an estimate.
// =============================================================================

use anyhow::{bail, Context, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use tracing::info;

use crate::dashboard_config::PredictionParams;
use crate::types::{Signal, Strength};

const STRONG_THRESHOLD_PCT: f64 = 2.0;
const MODERATE_THRESHOLD_PCT: f64 = 0.5;

/// Label attached to a synthetic forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub signal: Signal,
    pub strength: Strength,
    pub rationale: &'static str,
    /// Fixed display figure from the config.  Not measured.
    pub confidence_pct: f64,
}

/// Random perturbation of the latest price, dressed up as a next-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticForecast {
    pub base_price: f64,
    pub predicted_price: f64,
    pub change_pct: f64,
    pub recommendation: Recommendation,
}

/// Draw one synthetic forecast for `latest_price`.
///
/// Consumes exactly one Normal sample from `rng`.
///
/// # Errors
/// A negative or non-finite volatility, or a non-finite drift.
pub fn synthetic_forecast<R: Rng + ?Sized>(
    latest_price: f64,
    params: &PredictionParams,
    rng: &mut R,
) -> Result<SyntheticForecast> {
    if !params.drift.is_finite() || !(params.volatility.is_finite() && params.volatility >= 0.0) {
        bail!(
            "synthetic forecast needs a finite drift and non-negative volatility (got {}, {})",
            params.drift,
            params.volatility
        );
    }
    let dist = Normal::new(params.drift, params.volatility)
        .context("invalid synthetic forecast distribution")?;
    let x: f64 = dist.sample(rng);

    let change_pct = x * 100.0;
    let (signal, strength, rationale) = classify_change(change_pct);

    let forecast = SyntheticForecast {
        base_price: latest_price,
        predicted_price: latest_price * (1.0 + x),
        change_pct,
        recommendation: Recommendation {
            signal,
            strength,
            rationale,
            confidence_pct: params.confidence_pct,
        },
    };

    info!(
        base = latest_price,
        predicted = forecast.predicted_price,
        change_pct,
        signal = %signal,
        "synthetic forecast drawn"
    );
    Ok(forecast)
}

/// Map an expected change (percent) onto the BUY / SELL / HOLD ladder.
///
/// All thresholds are exclusive: exactly 2.0 is a moderate BUY and exactly
/// 0.5 is a HOLD.
pub fn classify_change(change_pct: f64) -> (Signal, Strength, &'static str) {
    if change_pct > STRONG_THRESHOLD_PCT {
        (Signal::Buy, Strength::Strong, "strong uptrend expected")
    } else if change_pct > MODERATE_THRESHOLD_PCT {
        (Signal::Buy, Strength::Moderate, "moderate uptrend")
    } else if change_pct < -STRONG_THRESHOLD_PCT {
        (Signal::Sell, Strength::Strong, "strong downtrend expected")
    } else if change_pct < -MODERATE_THRESHOLD_PCT {
        (Signal::Sell, Strength::Moderate, "moderate downtrend")
    } else {
        (Signal::Hold, Strength::Neutral, "sideways movement expected")
    }
}
