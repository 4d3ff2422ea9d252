// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators shown on the
// dashboard.  Vector indicators return a `Vec<Option<f64>>` aligned with the
// input closes: `None` marks warm-up rows and numerically undefined slots, and
// it propagates to the panels instead of being papered over.

pub mod normalize;
pub mod range;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod volatility;

pub use normalize::normalize_base_100;
pub use range::{calculate_range, PriceRange};
pub use roc::current_change_pct;
pub use rsi::{calculate_rsi, current_rsi};
pub use sma::calculate_sma;
pub use volatility::{calculate_rolling_volatility, calculate_volatility};
