//! Daily bar representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading session.
///
/// Sequences of bars are always ordered oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Session date.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume in lots.
    pub volume: i64,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(date: NaiveDate, open: f64, close: f64, volume: i64) -> Self {
        Self {
            date,
            open,
            close,
            volume,
        }
    }

    /// Returns true if the session closed above its open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns the session change relative to the open, in percent.
    #[must_use]
    pub fn body_pct(&self) -> f64 {
        if self.open == 0.0 {
            return 0.0;
        }
        (self.close - self.open) / self.open * 100.0
    }
}
