// =============================================================================
// Dashboard Configuration — explicit settings object for a render pass
// =============================================================================
//
// Every tunable of the dashboard lives here: the synthetic market profiles,
// the indicator windows, the fabricated prediction parameters and the panel
// toggles.  The config is passed by reference into the generator, the
// indicator engine and the dashboard pass; nothing is read from globals.
//
// All fields carry `#[serde(default)]` so that adding new fields never breaks
// loading an older config file.  Persistence uses an atomic tmp + rename.
//
// =============================================================================

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::types::Asset;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_rows() -> usize {
    100
}

fn default_seed() -> u64 {
    42
}

fn default_btc_profile() -> AssetProfile {
    AssetProfile::new(45_000.0, 0.002, 0.02)
}

fn default_eth_profile() -> AssetProfile {
    AssetProfile::new(2_500.0, 0.0025, 0.025)
}

fn default_spy_profile() -> AssetProfile {
    AssetProfile::new(450.0, 0.001, 0.01)
}

fn default_ma_short() -> usize {
    20
}

fn default_ma_long() -> usize {
    50
}

fn default_rsi_period() -> usize {
    14
}

fn default_volatility_window() -> usize {
    20
}

fn default_range_window() -> usize {
    30
}

fn default_change_lag() -> usize {
    1
}

fn default_prediction_drift() -> f64 {
    0.005
}

fn default_prediction_volatility() -> f64 {
    0.015
}

fn default_confidence_pct() -> f64 {
    85.0
}

fn default_error_samples() -> usize {
    1000
}

fn default_histogram_bins() -> usize {
    30
}

// =============================================================================
// AssetProfile
// =============================================================================

/// Random-walk parameters for one synthetic market.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetProfile {
    /// First price of the series.
    pub seed_price: f64,

    /// Mean of the per-step fractional return.
    pub mean_drift: f64,

    /// Standard deviation of the per-step fractional return.
    pub volatility: f64,
}

impl AssetProfile {
    pub const fn new(seed_price: f64, mean_drift: f64, volatility: f64) -> Self {
        Self {
            seed_price,
            mean_drift,
            volatility,
        }
    }
}

/// Per-asset profiles, one field per market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketProfiles {
    #[serde(default = "default_btc_profile")]
    pub btc: AssetProfile,

    #[serde(default = "default_eth_profile")]
    pub eth: AssetProfile,

    #[serde(default = "default_spy_profile")]
    pub spy: AssetProfile,
}

impl MarketProfiles {
    pub fn get(&self, asset: Asset) -> &AssetProfile {
        match asset {
            Asset::Btc => &self.btc,
            Asset::Eth => &self.eth,
            Asset::Spy => &self.spy,
        }
    }
}

impl Default for MarketProfiles {
    fn default() -> Self {
        Self {
            btc: default_btc_profile(),
            eth: default_eth_profile(),
            spy: default_spy_profile(),
        }
    }
}

// =============================================================================
// IndicatorWindows
// =============================================================================

/// Look-back lengths used by the indicator engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorWindows {
    #[serde(default = "default_ma_short")]
    pub ma_short: usize,

    #[serde(default = "default_ma_long")]
    pub ma_long: usize,

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_volatility_window")]
    pub volatility_window: usize,

    /// Trailing window of the max/min KPI card.
    #[serde(default = "default_range_window")]
    pub range_window: usize,

    /// Lag (in rows) of the "24h" change card.  Rows are daily, so one row
    /// is one day.
    #[serde(default = "default_change_lag")]
    pub change_lag: usize,
}

impl Default for IndicatorWindows {
    fn default() -> Self {
        Self {
            ma_short: default_ma_short(),
            ma_long: default_ma_long(),
            rsi_period: default_rsi_period(),
            volatility_window: default_volatility_window(),
            range_window: default_range_window(),
            change_lag: default_change_lag(),
        }
    }
}

// =============================================================================
// PredictionParams
// =============================================================================

/// Parameters of the fabricated "ML" panel.  None of these come from a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionParams {
    #[serde(default = "default_prediction_drift")]
    pub drift: f64,

    #[serde(default = "default_prediction_volatility")]
    pub volatility: f64,

    /// Constant "confidence" shown next to the recommendation.
    #[serde(default = "default_confidence_pct")]
    pub confidence_pct: f64,

    /// Number of simulated prediction errors behind the error histogram.
    #[serde(default = "default_error_samples")]
    pub error_samples: usize,

    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

impl Default for PredictionParams {
    fn default() -> Self {
        Self {
            drift: default_prediction_drift(),
            volatility: default_prediction_volatility(),
            confidence_pct: default_confidence_pct(),
            error_samples: default_error_samples(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

// =============================================================================
// DashboardConfig
// =============================================================================

/// Top-level configuration of one dashboard render pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    // --- Series generation --------------------------------------------------

    /// Number of daily rows in the price table.
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Seed of the random stream owned by the pass.
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default)]
    pub markets: MarketProfiles,

    // --- Selection & toggles ------------------------------------------------

    /// Asset the KPI cards and indicator panels are computed for.
    #[serde(default)]
    pub asset: Asset,

    /// Show the prediction, feature-importance and error panels.
    #[serde(default = "default_true")]
    pub show_ml: bool,

    /// Show the RSI and rolling-volatility panels.
    #[serde(default = "default_true")]
    pub show_technicals: bool,

    // --- Indicator & prediction parameters ---------------------------------

    #[serde(default)]
    pub windows: IndicatorWindows,

    #[serde(default)]
    pub prediction: PredictionParams,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            seed: default_seed(),
            markets: MarketProfiles::default(),
            asset: Asset::default(),
            show_ml: true,
            show_technicals: true,
            windows: IndicatorWindows::default(),
            prediction: PredictionParams::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dashboard config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse dashboard config from {}", path.display()))?;

        info!(
            path = %path.display(),
            asset = %config.asset,
            rows = config.rows,
            seed = config.seed,
            "dashboard config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise dashboard config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "dashboard config saved (atomic)");
        Ok(())
    }

    /// Apply `VANGIU_*` overrides from an environment lookup.
    ///
    /// Unparseable values are ignored with a warning; the file/default value
    /// stays in effect.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("VANGIU_ASSET") {
            match raw.parse::<Asset>() {
                Ok(asset) => self.asset = asset,
                Err(e) => warn!(value = %raw, error = %e, "ignoring VANGIU_ASSET"),
            }
        }
        if let Some(raw) = lookup("VANGIU_SEED") {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.seed = seed,
                Err(e) => warn!(value = %raw, error = %e, "ignoring VANGIU_SEED"),
            }
        }
        if let Some(raw) = lookup("VANGIU_ROWS") {
            match raw.trim().parse::<usize>() {
                Ok(rows) => self.rows = rows,
                Err(e) => warn!(value = %raw, error = %e, "ignoring VANGIU_ROWS"),
            }
        }
        if let Some(raw) = lookup("VANGIU_SHOW_ML") {
            match parse_flag(&raw) {
                Some(flag) => self.show_ml = flag,
                None => warn!(value = %raw, "ignoring VANGIU_SHOW_ML"),
            }
        }
        if let Some(raw) = lookup("VANGIU_SHOW_TECHNICALS") {
            match parse_flag(&raw) {
                Some(flag) => self.show_technicals = flag,
                None => warn!(value = %raw, "ignoring VANGIU_SHOW_TECHNICALS"),
            }
        }
    }

    /// Reject settings the generator or the indicator engine cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.rows < 2 {
            bail!("rows must be at least 2 (got {})", self.rows);
        }

        let w = &self.windows;
        for (name, value) in [
            ("ma_short", w.ma_short),
            ("ma_long", w.ma_long),
            ("rsi_period", w.rsi_period),
            ("volatility_window", w.volatility_window),
            ("range_window", w.range_window),
            ("change_lag", w.change_lag),
        ] {
            if value == 0 {
                bail!("window {name} must be positive");
            }
        }

        for asset in Asset::ALL {
            let p = self.markets.get(asset);
            if !(p.seed_price.is_finite() && p.seed_price > 0.0) {
                bail!("{asset}: seed price must be positive (got {})", p.seed_price);
            }
            if !p.mean_drift.is_finite() {
                bail!("{asset}: mean drift must be finite");
            }
            if !(p.volatility.is_finite() && p.volatility >= 0.0) {
                bail!("{asset}: volatility must be finite and non-negative (got {})", p.volatility);
            }
        }

        let pr = &self.prediction;
        if !pr.drift.is_finite() || !(pr.volatility.is_finite() && pr.volatility >= 0.0) {
            bail!("prediction drift/volatility must be finite, volatility non-negative");
        }
        if pr.histogram_bins == 0 {
            bail!("histogram_bins must be positive");
        }

        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.rows, 100);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.asset, Asset::Btc);
        assert!(cfg.show_ml);
        assert!(cfg.show_technicals);
        assert!((cfg.markets.btc.seed_price - 45_000.0).abs() < f64::EPSILON);
        assert!((cfg.markets.eth.volatility - 0.025).abs() < f64::EPSILON);
        assert!((cfg.markets.spy.mean_drift - 0.001).abs() < f64::EPSILON);
        assert_eq!(cfg.windows.ma_short, 20);
        assert_eq!(cfg.windows.ma_long, 50);
        assert_eq!(cfg.windows.rsi_period, 14);
        assert_eq!(cfg.windows.range_window, 30);
        assert!((cfg.prediction.drift - 0.005).abs() < f64::EPSILON);
        assert!((cfg.prediction.confidence_pct - 85.0).abs() < f64::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: DashboardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.rows, 100);
        assert_eq!(cfg.asset, Asset::Btc);
        assert_eq!(cfg.windows.volatility_window, 20);
        assert_eq!(cfg.prediction.error_samples, 1000);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "asset": "ETH", "markets": { "spy": { "seed_price": 500.0, "mean_drift": 0.0, "volatility": 0.01 } } }"#;
        let cfg: DashboardConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.asset, Asset::Eth);
        assert!((cfg.markets.spy.seed_price - 500.0).abs() < f64::EPSILON);
        assert!((cfg.markets.btc.seed_price - 45_000.0).abs() < f64::EPSILON);
        assert_eq!(cfg.windows.ma_long, 50);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "vangiu-config-{}.json",
            uuid::Uuid::new_v4()
        ));
        let mut cfg = DashboardConfig::default();
        cfg.asset = Asset::Spy;
        cfg.seed = 7;
        cfg.save(&path).unwrap();

        let loaded = DashboardConfig::load(&path).unwrap();
        assert_eq!(loaded.asset, Asset::Spy);
        assert_eq!(loaded.seed, 7);
        assert!(!path.with_extension("json.tmp").exists());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_missing_file_is_error() {
        let path = std::env::temp_dir().join("vangiu-definitely-missing.json");
        assert!(DashboardConfig::load(path).is_err());
    }

    #[test]
    fn env_overrides_apply_and_ignore_garbage() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("VANGIU_ASSET", "SPY - S&P 500"),
            ("VANGIU_SEED", "not-a-number"),
            ("VANGIU_ROWS", "60"),
            ("VANGIU_SHOW_ML", "off"),
        ]);
        let mut cfg = DashboardConfig::default();
        cfg.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.asset, Asset::Spy);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.rows, 60);
        assert!(!cfg.show_ml);
        assert!(cfg.show_technicals);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut cfg = DashboardConfig::default();
        cfg.rows = 1;
        assert!(cfg.validate().is_err());

        let mut cfg = DashboardConfig::default();
        cfg.windows.rsi_period = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = DashboardConfig::default();
        cfg.markets.eth.volatility = -0.1;
        assert!(cfg.validate().is_err());

        let mut cfg = DashboardConfig::default();
        cfg.markets.btc.seed_price = 0.0;
        assert!(cfg.validate().is_err());
    }
}
