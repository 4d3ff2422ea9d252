// =============================================================================
// Terminal Renderer — plain-text view of a dashboard snapshot
// =============================================================================
//
// Pure formatting: every number shown here was computed by the dashboard
// pass.  Undefined values render as "n/a".
// =============================================================================

use std::fmt;

use crate::dashboard::DashboardSnapshot;
use crate::diagnostics::ErrorHistogram;
use crate::kpi::KpiSet;
use crate::types::{Asset, Signal};

const BAR_WIDTH: usize = 40;

/// Render the whole snapshot as a multi-section text report.
pub fn render_text(snap: &DashboardSnapshot) -> String {
    TextReport(snap).to_string()
}

/// `Display` adapter writing the text report of a snapshot.
pub struct TextReport<'a>(pub &'a DashboardSnapshot);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snap = self.0;
        let asset = snap.asset;

        writeln!(f, "=== VAN-GIU ANALYTICS :: {} ===", asset.label())?;
        let ts = snap.table.timestamps();
        if let (Some(first), Some(last)) = (ts.first(), ts.last()) {
            writeln!(
                f,
                "Synthetic daily series {} .. {} ({} rows)",
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d"),
                snap.table.len()
            )?;
        }
        writeln!(f)?;

        write_kpis(f, &snap.kpis)?;

        // --- Synthetic forecast ---------------------------------------------
        if let Some(fc) = &snap.forecast {
            let r = &fc.recommendation;
            let marker = match r.signal {
                Signal::Buy => "[+]",
                Signal::Sell => "[-]",
                Signal::Hold => "[=]",
            };
            writeln!(f, "-- Synthetic forecast (random draw, not a model) --")?;
            writeln!(f, "  Tomorrow     ${}", money(fc.predicted_price, 2))?;
            writeln!(f, "  {marker} {} ({})", r.signal, r.strength)?;
            writeln!(f, "  Expected     {:+.2}%", fc.change_pct)?;
            writeln!(f, "  Reason       {}", r.rationale)?;
            writeln!(f, "  Confidence   {:.0}% (fixed)", r.confidence_pct)?;
            writeln!(f)?;
        }

        // --- Price panel ----------------------------------------------------
        let p = &snap.panels.price;
        writeln!(f, "-- Price {} with moving averages --", p.asset)?;
        writeln!(
            f,
            "  last {}  {} {}  {} {}",
            opt(p.prices.last().copied(), |v| money(v, 2)),
            p.ma_short_column,
            opt(last_defined(&p.ma_short), |v| money(v, 2)),
            p.ma_long_column,
            opt(last_defined(&p.ma_long), |v| money(v, 2)),
        )?;
        writeln!(f)?;

        // --- Technical panels -----------------------------------------------
        if let Some(rsi) = &snap.panels.rsi {
            writeln!(
                f,
                "-- RSI({}) [oversold < {:.0}, overbought > {:.0}] --",
                rsi.period, rsi.oversold, rsi.overbought
            )?;
            let latest = rsi
                .latest
                .map(|(v, zone)| format!("{v:.2} {zone}"))
                .unwrap_or_else(|| "n/a".to_string());
            writeln!(f, "  latest {latest}")?;
            writeln!(f)?;
        }
        if let Some(vol) = &snap.panels.volatility {
            writeln!(f, "-- Volatility ({} days) --", vol.window)?;
            writeln!(f, "  latest {}", opt(last_defined(&vol.values), |v| format!("{v:.2}%")))?;
            writeln!(f)?;
        }

        // --- Comparison -----------------------------------------------------
        writeln!(f, "-- Comparative returns (base 100) --")?;
        for a in Asset::ALL {
            if let Some(series) = snap.panels.comparison.get(&a) {
                writeln!(f, "  {:<4} {}", a.symbol(), opt(last_defined(series), |v| format!("{v:.2}")))?;
            }
        }
        writeln!(f)?;

        // --- Simulated diagnostics ------------------------------------------
        if let Some(weights) = &snap.panels.feature_importance {
            writeln!(f, "-- Feature importance (simulated) --")?;
            let mut sorted = weights.clone();
            sorted.sort_by(|a, b| b.weight.total_cmp(&a.weight));
            for w in &sorted {
                writeln!(f, "  {:<15} {:>5.1}% {}", w.feature, w.weight * 100.0, bar(w.weight, 1.0))?;
            }
            writeln!(f)?;
        }
        if let Some(hist) = &snap.panels.error_distribution {
            write_histogram(f, hist)?;
        }

        writeln!(f, "Last update: {}", snap.last_updated)
    }
}

fn write_kpis(f: &mut fmt::Formatter<'_>, k: &KpiSet) -> fmt::Result {
    writeln!(f, "-- Key metrics --")?;
    writeln!(f, "  Price        {}", opt(k.latest_price, |p| format!("${}", money(p, 2))))?;
    writeln!(
        f,
        "  {:<13}{}",
        change_label(k.change_lag),
        opt(k.change_pct, |c| format!("{c:+.2}%"))
    )?;
    writeln!(f, "  Volatility   {}", opt(k.volatility_pct, |v| format!("{v:.2}%")))?;
    match k.range {
        Some(r) => writeln!(
            f,
            "  Range {}D    max ${}  min ${}",
            r.span,
            money(r.high, 0),
            money(r.low, 0)
        )?,
        None => writeln!(f, "  Range        n/a")?,
    }
    writeln!(f)
}

/// Card title for the change KPI.  Rows are daily, so one row is "24h".
fn change_label(lag: usize) -> String {
    if lag == 1 {
        "Change 24h".to_string()
    } else {
        format!("Change {lag}d")
    }
}

fn write_histogram(f: &mut fmt::Formatter<'_>, hist: &ErrorHistogram) -> fmt::Result {
    writeln!(
        f,
        "-- Prediction error distribution (simulated, n={}, sd={}) --",
        hist.samples,
        opt(hist.std_dev, |s| money(s, 2))
    )?;
    let max = hist.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;
    for b in &hist.bins {
        writeln!(f, "  {:>10.1} | {}", b.lower, bar(b.count as f64, max))?;
    }
    writeln!(f)
}

fn bar(value: f64, max: f64) -> String {
    let n = if max > 0.0 {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    "#".repeat(n.min(BAR_WIDTH))
}

fn last_defined(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

fn opt(value: Option<f64>, f: impl FnOnce(f64) -> String) -> String {
    value.map(f).unwrap_or_else(|| "n/a".to_string())
}

/// Format with thousands separators, e.g. `45,123.46`.
fn money(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
