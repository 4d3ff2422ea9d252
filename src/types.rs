// =============================================================================
// Shared types used across the VAN-GIU analytics dashboard
// =============================================================================

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three synthetic markets shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Asset {
    #[serde(rename = "BTC")]
    Btc,
    #[serde(rename = "ETH")]
    Eth,
    #[serde(rename = "SPY")]
    Spy,
}

impl Asset {
    /// Every asset, in generation order. The random stream is consumed in
    /// exactly this order.
    pub const ALL: [Asset; 3] = [Asset::Btc, Asset::Eth, Asset::Spy];

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Eth => "ETH",
            Self::Spy => "SPY",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Btc => "Bitcoin",
            Self::Eth => "Ethereum",
            Self::Spy => "S&P 500",
        }
    }

    /// Selector label, e.g. `"BTC - Bitcoin"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.symbol(), self.display_name())
    }
}

impl Default for Asset {
    fn default() -> Self {
        Self::Btc
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Asset {
    type Err = anyhow::Error;

    /// Accepts a bare symbol (`"eth"`) or a selector label (`"ETH - Ethereum"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = s.split(" - ").next().unwrap_or(s).trim();
        Self::ALL
            .into_iter()
            .find(|a| a.symbol().eq_ignore_ascii_case(symbol))
            .ok_or_else(|| anyhow::anyhow!("unknown asset selection: {s:?}"))
    }
}

/// Direction of the synthetic recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Hold => write!(f, "HOLD"),
        }
    }
}

/// How far past the moderate threshold the expected move is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Moderate,
    Neutral,
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strong => write!(f, "strong"),
            Self::Moderate => write!(f, "moderate"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Classic RSI reading bands (70 / 30).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl std::fmt::Display for RsiZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "OVERBOUGHT"),
            Self::Oversold => write!(f, "OVERSOLD"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}
