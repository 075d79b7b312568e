//! List endpoint records.

use serde::{Deserialize, Serialize};

/// One security from the quote list endpoint.
///
/// Values are already normalized: a negative P/E is stored as `0.0`, and a
/// missing traded amount has been recomputed from volume and price where
/// possible.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Security code, e.g. `"600519"`. Never empty.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Last traded price.
    pub price: f64,
    /// Percent change on the session (3.5 means +3.5 %).
    pub change_pct: f64,
    /// Traded amount in currency units.
    pub amount: f64,
    /// Volume ratio versus the recent average.
    pub volume_ratio: f64,
    /// Turnover rate in percent.
    pub turnover_rate: f64,
    /// Total market capitalization in currency units.
    pub market_cap: f64,
    /// Price/earnings ratio; `0.0` when unavailable.
    pub pe: f64,
    /// Net capital inflow.
    pub net_inflow: f64,
    /// Main-force inflow.
    pub main_force_inflow: f64,
    /// Main-force outflow.
    pub main_force_outflow: f64,
}

impl QuoteRecord {
    /// Creates a quote with only code, name and price set.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    /// Returns true if the P/E ratio is usable (strictly positive).
    #[must_use]
    pub fn has_valid_pe(&self) -> bool {
        self.pe > 0.0
    }

    /// Returns true if none of the capital-flow fields were reported.
    #[must_use]
    pub fn flows_unreported(&self) -> bool {
        self.net_inflow == 0.0 && self.main_force_inflow == 0.0 && self.main_force_outflow == 0.0
    }
}

/// Code and name only, used for full-universe enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BriefRecord {
    /// Security code.
    pub code: String,
    /// Display name.
    pub name: String,
}

impl BriefRecord {
    /// Creates a new brief record.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Snapshot of a headline market index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    /// Index code, e.g. `"000001"`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Last value.
    pub price: f64,
    /// Percent change on the session.
    pub change_pct: f64,
}
