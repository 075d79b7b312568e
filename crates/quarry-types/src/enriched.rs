//! Quote records merged with derived indicators.

use serde::{Deserialize, Serialize};

use crate::QuoteRecord;

/// Indicator values derived from one bar series.
///
/// Every field uses `0.0` / `false` as the "undefined" sentinel when the
/// series was too short to compute it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// 5-session simple moving average of the close.
    pub ma5: f64,
    /// 10-session simple moving average.
    pub ma10: f64,
    /// 20-session simple moving average.
    pub ma20: f64,
    /// 60-session simple moving average.
    pub ma60: f64,
    /// True if MA60 is above its value five sessions earlier.
    pub ma60_up: bool,
    /// MACD histogram on the latest session.
    pub macd_histogram: f64,
    /// MACD histogram on the previous session.
    pub macd_histogram_prev: f64,
    /// True if the MACD line crossed above its signal on the latest session.
    pub macd_golden_cross: bool,
}

/// A quote that has been through the indicator engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// The list record this was built from.
    #[serde(flatten)]
    pub quote: QuoteRecord,
    /// Derived indicators.
    #[serde(flatten)]
    pub indicators: IndicatorSnapshot,
}

impl EnrichedRecord {
    /// Merges a quote with its indicators.
    #[must_use]
    pub const fn new(quote: QuoteRecord, indicators: IndicatorSnapshot) -> Self {
        Self { quote, indicators }
    }

    /// Returns the security code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.quote.code
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.quote.name
    }

    /// Returns the last price.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.quote.price
    }

    /// Returns the session percent change.
    #[must_use]
    pub const fn change_pct(&self) -> f64 {
        self.quote.change_pct
    }
}
