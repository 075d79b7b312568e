//! MACD histogram and crossover detection.

use quarry_types::Bar;

use crate::average::{closes, ema};

/// EMA periods of the MACD oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdParams {
    /// Fast EMA period.
    pub fast: usize,
    /// Slow EMA period.
    pub slow: usize,
    /// Signal EMA period, applied to the difference line.
    pub signal: usize,
}

impl MacdParams {
    /// The conventional 12/26/9 setting.
    pub const STANDARD: Self = Self {
        fast: 12,
        slow: 26,
        signal: 9,
    };

    /// Minimum number of bars before the histogram is defined.
    #[must_use]
    pub const fn min_bars(&self) -> usize {
        self.slow + self.signal
    }
}

impl Default for MacdParams {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Oscillator state on the two most recent sessions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MacdSignal {
    /// `2 * (dif - dea)` on the latest session.
    pub histogram: f64,
    /// `2 * (dif - dea)` on the session before.
    pub histogram_prev: f64,
    /// Difference line was at or below the signal line on the previous
    /// session and strictly above it on the latest.
    pub bullish_cross: bool,
}

impl MacdSignal {
    /// Histogram is positive and growing.
    #[must_use]
    pub fn histogram_rising(&self) -> bool {
        self.histogram > 0.0 && self.histogram > self.histogram_prev
    }
}

/// Computes the 12/26/9 oscillator over `bars`.
///
/// Returns `None` if fewer than 35 bars exist.
#[must_use]
pub fn macd(bars: &[Bar]) -> Option<MacdSignal> {
    macd_with(bars, MacdParams::STANDARD)
}

/// Computes the oscillator with custom periods.
///
/// Returns `None` if fewer than [`MacdParams::min_bars`] bars exist or any
/// period is zero.
#[must_use]
pub fn macd_with(bars: &[Bar], params: MacdParams) -> Option<MacdSignal> {
    let MacdParams { fast, slow, signal } = params;
    let n = bars.len();
    if fast == 0 || slow == 0 || signal == 0 || fast > slow || n < params.min_bars() {
        return None;
    }

    let closes = closes(bars);
    let fast_ema = ema(&closes, fast);
    let slow_ema = ema(&closes, slow);

    // dif is defined from slow - 1 onwards; dea[j] lines up with dif[slow - 1 + j].
    let dif: Vec<f64> = (slow - 1..n).map(|i| fast_ema[i] - slow_ema[i]).collect();
    let dea = ema(&dif, signal);

    let last = dif.len() - 1;
    let prev = last - 1;
    Some(MacdSignal {
        histogram: 2.0 * (dif[last] - dea[last]),
        histogram_prev: 2.0 * (dif[prev] - dea[prev]),
        bullish_cross: dif[last] > dea[last] && dif[prev] <= dea[prev],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::bars_from_closes;
    use approx::assert_abs_diff_eq;

    /// Straightforward recomputation: every EMA value recursed from its seed.
    fn reference_histogram(closes: &[f64], at: usize) -> f64 {
        fn ema_at(values: &[f64], period: usize, at: usize) -> f64 {
            let k = 2.0 / (period as f64 + 1.0);
            let mut value = values[..period].iter().sum::<f64>() / period as f64;
            for v in &values[period..=at] {
                value = (v - value) * k + value;
            }
            value
        }
        let dif: Vec<f64> = (25..=at)
            .map(|i| ema_at(closes, 12, i) - ema_at(closes, 26, i))
            .collect();
        let dea = ema_at(&dif, 9, dif.len() - 1);
        2.0 * (dif[dif.len() - 1] - dea)
    }

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                50.0 + 8.0 * (t / 4.0).sin() + 0.3 * t + 2.0 * (t / 1.7).cos()
            })
            .collect()
    }

    #[test]
    fn test_length_threshold() {
        assert!(macd(&bars_from_closes(&wave(19))).is_none());
        assert!(macd(&bars_from_closes(&wave(34))).is_none());
        assert!(macd(&bars_from_closes(&wave(35))).is_some());
    }

    #[test]
    fn test_linear_series_flat_histogram() {
        let closes: Vec<f64> = (1..=40).map(f64::from).collect();
        let signal = macd(&bars_from_closes(&closes)).unwrap();
        assert_abs_diff_eq!(signal.histogram, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(signal.histogram_prev, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_matches_reference() {
        let closes = wave(40);
        let signal = macd(&bars_from_closes(&closes)).unwrap();
        assert_abs_diff_eq!(
            signal.histogram,
            reference_histogram(&closes, 39),
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            signal.histogram_prev,
            reference_histogram(&closes, 38),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_minimum_length_matches_reference() {
        let closes = wave(35);
        let signal = macd(&bars_from_closes(&closes)).unwrap();
        assert_abs_diff_eq!(
            signal.histogram,
            reference_histogram(&closes, 34),
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            signal.histogram_prev,
            reference_histogram(&closes, 33),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_bullish_cross_after_reversal() {
        let mut closes: Vec<f64> = (0..50).map(|i| 100.0 - 0.02 * f64::from(i * i)).collect();
        let bottom = closes[49];
        closes.extend((1..=20).map(|k| bottom + 3.0 * f64::from(k)));

        let mut crossed_at = None;
        for n in 35..=closes.len() {
            let signal = macd(&bars_from_closes(&closes[..n])).unwrap();
            assert_eq!(
                signal.bullish_cross,
                signal.histogram > 0.0 && signal.histogram_prev <= 0.0,
                "prefix {n}"
            );
            if signal.bullish_cross && crossed_at.is_none() {
                crossed_at = Some(n);
            }
        }

        let n = crossed_at.expect("reversal should produce a crossover");
        assert!(n > 50, "crossed during the decline at {n}");
    }

    #[test]
    fn test_histogram_rising() {
        let signal = MacdSignal {
            histogram: 0.4,
            histogram_prev: 0.1,
            bullish_cross: false,
        };
        assert!(signal.histogram_rising());
        assert!(!MacdSignal::default().histogram_rising());
    }

    #[test]
    fn test_custom_params() {
        let params = MacdParams {
            fast: 3,
            slow: 6,
            signal: 2,
        };
        assert_eq!(params.min_bars(), 8);
        let bars = bars_from_closes(&wave(8));
        assert!(macd_with(&bars, params).is_some());
        assert!(macd_with(&bars[..7], params).is_none());
    }
}
