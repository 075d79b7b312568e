//! All indicators of one bar series in a single pass.

use quarry_types::{Bar, IndicatorSnapshot};

use crate::average::sma;
use crate::macd::macd;

/// Period of the long trend average.
pub const TREND_PERIOD: usize = 60;

/// Sessions between the two trend averages that are compared.
pub const TREND_LOOKBACK: usize = 5;

/// Returns true if the 60-session average from five sessions ago is positive
/// and the current one exceeds it.
#[must_use]
pub fn trend_up(bars: &[Bar]) -> bool {
    let now = sma(bars, TREND_PERIOD, 0);
    let before = sma(bars, TREND_PERIOD, TREND_LOOKBACK);
    before > 0.0 && now > before
}

/// Derives every indicator from one oldest-first series.
///
/// Undefined values are left at their zero/false defaults.
#[must_use]
pub fn snapshot(bars: &[Bar]) -> IndicatorSnapshot {
    let signal = macd(bars).unwrap_or_default();
    IndicatorSnapshot {
        ma5: sma(bars, 5, 0),
        ma10: sma(bars, 10, 0),
        ma20: sma(bars, 20, 0),
        ma60: sma(bars, TREND_PERIOD, 0),
        ma60_up: trend_up(bars),
        macd_histogram: signal.histogram,
        macd_histogram_prev: signal.histogram_prev,
        macd_golden_cross: signal.bullish_cross,
    }
}
