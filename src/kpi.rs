// =============================================================================
// KPI Cards — scalar metrics for the selected asset
// =============================================================================
//
// The four headline cards of the dashboard:
//   1. Latest price
//   2. "24h" change (percent change over `change_lag` daily rows)
//   3. Volatility (sample stddev of daily returns over the whole table, %)
//   4. Trailing range (max / min over `range_window` rows)
// =============================================================================

use serde::Serialize;
use tracing::debug;

use crate::dashboard_config::IndicatorWindows;
use crate::indicators::{calculate_range, calculate_volatility, current_change_pct, PriceRange};
use crate::market_data::PriceTable;
use crate::types::Asset;

/// Scalar KPIs of one asset.  Undefined metrics stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSet {
    pub asset: Asset,
    pub latest_price: Option<f64>,
    pub change_pct: Option<f64>,
    pub change_lag: usize,
    pub volatility_pct: Option<f64>,
    pub range: Option<PriceRange>,
}

/// Compute the KPI cards for `asset` from the price table.
pub fn compute_kpis(table: &PriceTable, asset: Asset, windows: &IndicatorWindows) -> KpiSet {
    let closes = table.prices(asset);

    let kpis = KpiSet {
        asset,
        latest_price: table.latest(asset),
        change_pct: current_change_pct(closes, windows.change_lag),
        change_lag: windows.change_lag,
        volatility_pct: calculate_volatility(closes),
        range: calculate_range(closes, windows.range_window),
    };

    debug!(
        asset = %asset,
        latest = ?kpis.latest_price,
        change_pct = ?kpis.change_pct,
        volatility_pct = ?kpis.volatility_pct,
        "KPIs computed"
    );
    kpis
}
