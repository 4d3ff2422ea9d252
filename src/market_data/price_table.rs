use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::types::Asset;

// ---------------------------------------------------------------------------
// PriceTable -- one row per day, one price column per asset
// ---------------------------------------------------------------------------

/// Multi-asset daily price table produced by the series generator.
///
/// Price columns are fixed once generated.  Derived columns (the moving
/// averages shared by several panels) may be attached afterwards; they are
/// aligned with `timestamps` and use `None` for warm-up rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTable {
    timestamps: Vec<DateTime<Utc>>,
    prices: BTreeMap<Asset, Vec<f64>>,
    derived: BTreeMap<String, Vec<Option<f64>>>,
}

impl PriceTable {
    pub(crate) fn new(timestamps: Vec<DateTime<Utc>>, prices: BTreeMap<Asset, Vec<f64>>) -> Self {
        Self {
            timestamps,
            prices,
            derived: BTreeMap::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Row timestamps, strictly ascending.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Price column of `asset`.  Every generated table holds all assets, so
    /// a missing column yields an empty slice.
    pub fn prices(&self, asset: Asset) -> &[f64] {
        self.prices.get(&asset).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Most recent price of `asset`.
    pub fn latest(&self, asset: Asset) -> Option<f64> {
        self.prices(asset).last().copied()
    }

    /// Cache a derived column (e.g. `MA_20`) on the table, replacing any
    /// previous column with the same name.
    ///
    /// Columns of the wrong length are rejected and `false` is returned.
    pub fn attach_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> bool {
        let name = name.into();
        if values.len() != self.len() {
            debug!(
                column = %name,
                got = values.len(),
                expected = self.len(),
                "refusing misaligned derived column"
            );
            return false;
        }
        self.derived.insert(name, values);
        true
    }

    /// Previously attached derived column.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.derived.get(name).map(Vec::as_slice)
    }
}
