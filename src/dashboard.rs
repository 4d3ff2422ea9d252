// =============================================================================
// Dashboard Pass — one end-to-end render computation
// =============================================================================
//
// A pass owns its random stream and walks a fixed, linear pipeline:
//
//   1. Seed a `StdRng` from `config.seed`
//   2. Generate the multi-asset price table
//   3. Compute KPI cards for the selected asset
//   4. (show_ml)  Draw the synthetic forecast
//   5. Cache MA columns on the table; build the price panel
//   6. (show_technicals)  RSI + rolling volatility panels
//   7. Normalised comparison of every asset
//   8. (show_ml)  Feature-importance and error-distribution panels
//
// Random draws happen in the order generation -> forecast -> feature
// importance -> error samples, so a given seed always yields the same
// snapshot apart from `pass_id` / `generated_at`.
// =============================================================================

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, info_span};

use crate::dashboard_config::DashboardConfig;
use crate::diagnostics::{
    simulated_error_distribution, simulated_feature_importance, ErrorHistogram, FeatureWeight,
};
use crate::indicators::rsi::{OVERBOUGHT, OVERSOLD};
use crate::indicators::{
    calculate_rolling_volatility, calculate_rsi, calculate_sma, current_rsi, normalize_base_100,
};
use crate::kpi::{compute_kpis, KpiSet};
use crate::market_data::{generate_table, PriceTable};
use crate::prediction::{synthetic_forecast, SyntheticForecast};
use crate::types::{Asset, RsiZone};

// =============================================================================
// Panels
// =============================================================================

/// Price with short / long moving averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePanel {
    pub asset: Asset,
    pub prices: Vec<f64>,
    pub ma_short_column: String,
    pub ma_short: Vec<Option<f64>>,
    pub ma_long_column: String,
    pub ma_long: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RsiPanel {
    pub period: usize,
    pub values: Vec<Option<f64>>,
    pub latest: Option<(f64, RsiZone)>,
    pub overbought: f64,
    pub oversold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolatilityPanel {
    pub window: usize,
    pub values: Vec<Option<f64>>,
}

/// Everything the presentation layer may draw for one pass.  Optional panels
/// are `None` when their toggle is off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panels {
    pub price: PricePanel,
    pub rsi: Option<RsiPanel>,
    pub volatility: Option<VolatilityPanel>,
    pub comparison: BTreeMap<Asset, Vec<Option<f64>>>,
    pub feature_importance: Option<Vec<FeatureWeight>>,
    pub error_distribution: Option<ErrorHistogram>,
}

// =============================================================================
// Snapshot
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// Unique identifier for this pass (UUID v4).
    pub pass_id: String,
    pub generated_at: DateTime<Utc>,
    /// Footer line, `dd/mm/YYYY HH:MM`.
    pub last_updated: String,
    pub asset: Asset,
    pub kpis: KpiSet,
    pub forecast: Option<SyntheticForecast>,
    pub panels: Panels,
    pub table: PriceTable,
}

/// Run one dashboard pass.  The table ends at `anchor`.
pub fn run_pass(config: &DashboardConfig, anchor: DateTime<Utc>) -> Result<DashboardSnapshot> {
    let pass_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!("dashboard_pass", pass_id = %pass_id);
    let _guard = span.enter();

    let asset = config.asset;
    let windows = &config.windows;
    info!(
        asset = %asset,
        seed = config.seed,
        rows = config.rows,
        show_ml = config.show_ml,
        show_technicals = config.show_technicals,
        "dashboard pass started"
    );

    config.validate().context("invalid dashboard configuration")?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    // ── 1. Data ─────────────────────────────────────────────────────────
    let mut table = generate_table(config.rows, &config.markets, anchor, &mut rng)
        .context("price table generation failed")?;

    // ── 2. KPI cards ────────────────────────────────────────────────────
    let kpis = compute_kpis(&table, asset, windows);

    // ── 3. Synthetic forecast ───────────────────────────────────────────
    let forecast = match (config.show_ml, kpis.latest_price) {
        (true, Some(latest)) => Some(synthetic_forecast(latest, &config.prediction, &mut rng)?),
        _ => None,
    };

    // ── 4. Price panel (MA columns cached on the table) ─────────────────
    let (ma_short_column, ma_short) = cached_sma(&mut table, asset, windows.ma_short);
    let (ma_long_column, ma_long) = cached_sma(&mut table, asset, windows.ma_long);

    let closes = table.prices(asset);
    let price = PricePanel {
        asset,
        prices: closes.to_vec(),
        ma_short_column,
        ma_short,
        ma_long_column,
        ma_long,
    };

    // ── 5. Technical panels ─────────────────────────────────────────────
    let (rsi, volatility) = if config.show_technicals {
        let rsi = RsiPanel {
            period: windows.rsi_period,
            values: calculate_rsi(closes, windows.rsi_period),
            latest: current_rsi(closes, windows.rsi_period),
            overbought: OVERBOUGHT,
            oversold: OVERSOLD,
        };
        let volatility = VolatilityPanel {
            window: windows.volatility_window,
            values: calculate_rolling_volatility(closes, windows.volatility_window),
        };
        (Some(rsi), Some(volatility))
    } else {
        (None, None)
    };

    // ── 6. Cross-asset comparison ───────────────────────────────────────
    let comparison: BTreeMap<Asset, Vec<Option<f64>>> = Asset::ALL
        .into_iter()
        .map(|a| (a, normalize_base_100(table.prices(a))))
        .collect();

    // ── 7. Simulated ML diagnostics ─────────────────────────────────────
    let (feature_importance, error_distribution) = match (config.show_ml, kpis.latest_price) {
        (true, Some(latest)) => {
            let importance = simulated_feature_importance(&mut rng);
            let errors = simulated_error_distribution(
                latest,
                config.prediction.error_samples,
                config.prediction.histogram_bins,
                &mut rng,
            )?;
            (Some(importance), Some(errors))
        }
        _ => (None, None),
    };

    let generated_at = Utc::now();
    let snapshot = DashboardSnapshot {
        pass_id,
        generated_at,
        last_updated: generated_at.format("%d/%m/%Y %H:%M").to_string(),
        asset,
        kpis,
        forecast,
        panels: Panels {
            price,
            rsi,
            volatility,
            comparison,
            feature_importance,
            error_distribution,
        },
        table,
    };

    info!(
        signal = ?snapshot.forecast.as_ref().map(|f| f.recommendation.signal),
        "dashboard pass finished"
    );
    Ok(snapshot)
}

/// Moving average of `asset` under the `MA_{window}` column, computed once
/// per table and read back from the cache afterwards.
fn cached_sma(table: &mut PriceTable, asset: Asset, window: usize) -> (String, Vec<Option<f64>>) {
    let name = format!("MA_{window}");
    if let Some(cached) = table.column(&name) {
        return (name, cached.to_vec());
    }
    let values = calculate_sma(table.prices(asset), window);
    table.attach_column(name.clone(), values.clone());
    (name, values)
}
