// =============================================================================
// Simulated ML Diagnostics — feature importance & prediction-error histogram
// =============================================================================
//
// Both panels are decoration: they are drawn from the pass's random stream
// and describe no fitted model.
//
// Feature importance:  w ~ Dirichlet(1, ..., 1) over six feature names,
//                      sampled as normalised Exp(1) draws.
// Error distribution:  e_k ~ Normal(0, latest_price * 1 %), k = 1..samples,
//                      summarised as an equal-width histogram.
// =============================================================================

use anyhow::{Context, Result};
use rand::Rng;
use rand_distr::{Distribution, Exp1, Normal};
use serde::Serialize;
use tracing::debug;

use crate::indicators::volatility::sample_std;

/// Feature names shown on the importance panel, in display order.
pub const FEATURES: [&str; 6] = ["Price", "Volume", "Volatility", "RSI", "MACD", "Moving Average"];

/// Relative scale of the simulated prediction errors.
const ERROR_SCALE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureWeight {
    pub feature: &'static str,
    pub weight: f64,
}

/// Draw a symmetric Dirichlet(1) weight per entry of [`FEATURES`].
///
/// Weights are non-negative and sum to 1.
pub fn simulated_feature_importance<R: Rng + ?Sized>(rng: &mut R) -> Vec<FeatureWeight> {
    let raw: Vec<f64> = FEATURES.iter().map(|_| -> f64 { Exp1.sample(rng) }).collect();
    let total: f64 = raw.iter().sum();

    FEATURES
        .iter()
        .zip(raw)
        .map(|(&feature, r)| FeatureWeight {
            feature,
            // All-zero draws fall back to uniform weights.
            weight: if total > 0.0 { r / total } else { 1.0 / FEATURES.len() as f64 },
        })
        .collect()
}

/// One bar of the error histogram.  `upper` is exclusive except for the last
/// bin, which also holds the maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorHistogram {
    pub samples: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub bins: Vec<HistogramBin>,
}

/// Simulate `samples` prediction errors around `latest_price` and bin them.
pub fn simulated_error_distribution<R: Rng + ?Sized>(
    latest_price: f64,
    samples: usize,
    bins: usize,
    rng: &mut R,
) -> Result<ErrorHistogram> {
    let dist = Normal::new(0.0, latest_price.abs() * ERROR_SCALE)
        .context("invalid error distribution scale")?;
    let errors: Vec<f64> = (0..samples).map(|_| dist.sample(rng)).collect();

    let histogram = build_histogram(&errors, bins);
    debug!(samples, bins = histogram.bins.len(), "error histogram built");
    Ok(histogram)
}

/// Equal-width histogram of `values` spanning `[min, max]`.
pub fn build_histogram(values: &[f64], bins: usize) -> ErrorHistogram {
    let n = values.len();
    let mean = (n > 0).then(|| values.iter().sum::<f64>() / n as f64);
    let std_dev = sample_std(values);

    if n == 0 || bins == 0 {
        return ErrorHistogram {
            samples: n,
            mean,
            std_dev,
            bins: Vec::new(),
        };
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let span = max - min;
    let width = if span > 0.0 { span / bins as f64 } else { 1.0 };

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|b| HistogramBin {
            lower: min + b as f64 * width,
            upper: min + (b + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }

    ErrorHistogram {
        samples: n,
        mean,
        std_dev,
        bins: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn feature_weights_form_a_simplex() {
        let mut rng = StdRng::seed_from_u64(42);
        let weights = simulated_feature_importance(&mut rng);
        assert_eq!(weights.len(), 6);
        assert_eq!(weights[3].feature, "RSI");
        assert!(weights.iter().all(|w| w.weight >= 0.0));
        let total: f64 = weights.iter().map(|w| w.weight).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn histogram_counts_every_sample() {
        let mut rng = StdRng::seed_from_u64(42);
        let h = simulated_error_distribution(45_000.0, 1000, 30, &mut rng).unwrap();
        assert_eq!(h.samples, 1000);
        assert_eq!(h.bins.len(), 30);
        assert_eq!(h.bins.iter().map(|b| b.count).sum::<usize>(), 1000);
        // 1 % of 45k => std around 450
        let sd = h.std_dev.unwrap();
        assert!(sd > 350.0 && sd < 550.0, "std {sd}");
        assert!(h.mean.unwrap().abs() < 100.0);
    }

    #[test]
    fn histogram_edges_are_contiguous() {
        let values = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let h = build_histogram(&values, 4);
        assert_eq!(h.bins[0].lower, 0.0);
        assert_eq!(h.bins[3].upper, 4.0);
        for w in h.bins.windows(2) {
            assert_eq!(w[0].upper, w[1].lower);
        }
        // Max lands in the last bin.
        assert_eq!(h.bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1, 1, 2]);
    }

    #[test]
    fn histogram_degenerate_inputs() {
        let h = build_histogram(&[], 10);
        assert!(h.bins.is_empty());
        assert!(h.mean.is_none());

        let h = build_histogram(&[5.0, 5.0, 5.0], 3);
        assert_eq!(h.bins[0].count, 3);
        assert_eq!(h.std_dev, Some(0.0));
    }
}
