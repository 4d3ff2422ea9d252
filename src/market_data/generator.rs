// =============================================================================
// Series Generator — seeded geometric random walk
// =============================================================================
//
// Each asset's path starts at its seed price and compounds one Normal draw per
// step:
//
//   price[0] = seed_price
//   price[i] = price[i-1] * (1 + x),   x ~ Normal(mean_drift, volatility)
//
// The caller owns the random stream.  Assets consume it in the fixed order of
// `Asset::ALL`, one full path at a time, so re-seeding the stream reproduces
// the exact same table.
// =============================================================================

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, info};

use super::price_table::PriceTable;
use crate::dashboard_config::{AssetProfile, MarketProfiles};
use crate::types::Asset;

/// Generate a `rows`-long daily table for every asset.
///
/// Timestamps run from `anchor - (rows - 1) days` up to `anchor`, ascending.
///
/// # Errors
/// - An asset's volatility is negative or non-finite.
/// - A draw would take a price to zero or below (only possible with
///   volatilities far beyond the defaults).
pub fn generate_table<R: Rng + ?Sized>(
    rows: usize,
    markets: &MarketProfiles,
    anchor: DateTime<Utc>,
    rng: &mut R,
) -> Result<PriceTable> {
    let timestamps: Vec<DateTime<Utc>> = (0..rows)
        .map(|i| anchor - Duration::days((rows - 1 - i) as i64))
        .collect();

    let mut prices = BTreeMap::new();
    for asset in Asset::ALL {
        let path = generate_path(asset, markets.get(asset), rows, rng)?;
        prices.insert(asset, path);
    }

    info!(rows, anchor = %anchor, "synthetic price table generated");
    Ok(PriceTable::new(timestamps, prices))
}

/// Generate a single random-walk path of `rows` prices.
pub fn generate_path<R: Rng + ?Sized>(
    asset: Asset,
    profile: &AssetProfile,
    rows: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if !(profile.volatility.is_finite() && profile.volatility >= 0.0) {
        bail!("{asset}: volatility must be finite and non-negative (got {})", profile.volatility);
    }
    if rows == 0 {
        return Ok(Vec::new());
    }

    let step = Normal::new(profile.mean_drift, profile.volatility).with_context(|| {
        format!(
            "{asset}: invalid return distribution (mean {}, std {})",
            profile.mean_drift, profile.volatility
        )
    })?;

    let mut path = Vec::with_capacity(rows);
    path.push(profile.seed_price);

    let mut prev = profile.seed_price;
    for i in 1..rows {
        let x: f64 = step.sample(rng);
        let next = prev * (1.0 + x);
        if !(next.is_finite() && next > 0.0) {
            bail!("{asset}: step {i} drew return {x:.4}, price would become {next:.4}");
        }
        path.push(next);
        prev = next;
    }

    debug!(
        asset = %asset,
        first = profile.seed_price,
        last = prev,
        "random walk generated"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn first_price_is_seed_and_all_positive() {
        let markets = MarketProfiles::default();
        let mut rng = StdRng::seed_from_u64(42);
        let table = generate_table(100, &markets, anchor(), &mut rng).unwrap();

        assert_eq!(table.len(), 100);
        for asset in Asset::ALL {
            let prices = table.prices(asset);
            assert_eq!(prices.len(), 100);
            assert_eq!(prices[0], markets.get(asset).seed_price);
            assert!(prices.iter().all(|&p| p > 0.0), "{asset} went non-positive");
        }
    }

    #[test]
    fn timestamps_are_daily_and_end_at_anchor() {
        let mut rng = StdRng::seed_from_u64(1);
        let table = generate_table(10, &MarketProfiles::default(), anchor(), &mut rng).unwrap();
        let ts = table.timestamps();

        assert_eq!(*ts.last().unwrap(), anchor());
        assert_eq!(ts[0], anchor() - Duration::days(9));
        for w in ts.windows(2) {
            assert_eq!(w[1] - w[0], Duration::days(1));
        }
    }

    #[test]
    fn same_seed_reproduces_table() {
        let markets = MarketProfiles::default();
        let a = generate_table(100, &markets, anchor(), &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate_table(100, &markets, anchor(), &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);

        let c = generate_table(100, &markets, anchor(), &mut StdRng::seed_from_u64(43)).unwrap();
        assert_ne!(a.prices(Asset::Btc), c.prices(Asset::Btc));
    }

    #[test]
    fn zero_volatility_compounds_the_drift() {
        let profile = AssetProfile::new(100.0, 0.01, 0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let path = generate_path(Asset::Spy, &profile, 5, &mut rng).unwrap();

        for (i, &p) in path.iter().enumerate() {
            let expected = 100.0 * 1.01_f64.powi(i as i32);
            assert!((p - expected).abs() < 1e-9, "step {i}: {p} vs {expected}");
        }
    }

    #[test]
    fn extreme_volatility_is_rejected_not_negative() {
        // With std = 5 roughly 40 % of draws fall below -1; across 99 steps a
        // non-positive price is effectively certain.
        let profile = AssetProfile::new(45_000.0, 0.002, 5.0);
        let mut rng = StdRng::seed_from_u64(42);
        let err = generate_path(Asset::Btc, &profile, 100, &mut rng).unwrap_err();
        assert!(err.to_string().contains("BTC"));
    }

    #[test]
    fn negative_volatility_is_an_error() {
        let profile = AssetProfile::new(1.0, 0.0, -0.5);
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate_path(Asset::Eth, &profile, 3, &mut rng).unwrap_err();
        assert!(err.to_string().contains("ETH"));

        // Rejected up front, even when no step would be drawn.
        assert!(generate_path(Asset::Eth, &profile, 1, &mut rng).is_err());

        let nan = AssetProfile::new(1.0, 0.0, f64::NAN);
        assert!(generate_path(Asset::Eth, &nan, 3, &mut rng).is_err());
    }

    #[test]
    fn negative_volatility_in_markets_fails_the_table() {
        let mut markets = MarketProfiles::default();
        markets.spy.volatility = -0.01;
        let mut rng = StdRng::seed_from_u64(42);
        let err = generate_table(10, &markets, anchor(), &mut rng).unwrap_err();
        assert!(err.to_string().contains("SPY"));
    }

    #[test]
    fn single_row_has_only_the_seed() {
        let mut rng = StdRng::seed_from_u64(0);
        let table = generate_table(1, &MarketProfiles::default(), anchor(), &mut rng).unwrap();
        assert_eq!(table.prices(Asset::Eth), &[2_500.0]);
    }
}
