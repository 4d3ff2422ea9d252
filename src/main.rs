// =============================================================================
// VAN-GIU Analytics — Main Entry Point
// =============================================================================
//
// Runs a single dashboard pass over freshly generated synthetic market data
// and prints it.  Logs go to stderr; the rendered dashboard (text, or JSON
// with VANGIU_OUTPUT=json) goes to stdout.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod dashboard;
mod dashboard_config;
mod diagnostics;
mod indicators;
mod kpi;
mod market_data;
mod prediction;
mod render;
mod types;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::dashboard_config::DashboardConfig;

const DEFAULT_CONFIG_PATH: &str = "dashboard_config.json";

fn main() -> anyhow::Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("VAN-GIU Analytics starting");

    // ── 2. Config ────────────────────────────────────────────────────────
    let config_path =
        std::env::var("VANGIU_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if std::path::Path::new(&config_path).exists() {
        DashboardConfig::load(&config_path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            DashboardConfig::default()
        })
    } else {
        let defaults = DashboardConfig::default();
        if let Err(e) = defaults.save(&config_path) {
            warn!(error = %e, "Failed to write default config");
        }
        defaults
    };
    config.apply_env_overrides(|key| std::env::var(key).ok());

    // ── 3. Render pass ───────────────────────────────────────────────────
    let snapshot = dashboard::run_pass(&config, chrono::Utc::now())?;

    let json_output = std::env::var("VANGIU_OUTPUT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_output {
        let json = serde_json::to_string_pretty(&snapshot)
            .context("failed to serialise dashboard snapshot")?;
        println!("{json}");
    } else {
        print!("{}", render::render_text(&snapshot));
    }

    Ok(())
}
