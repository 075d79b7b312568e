//! Simple and exponential moving averages.

use quarry_types::Bar;

/// Extracts closing prices.
#[must_use]
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Simple moving average of the close over `period` bars, ending `offset`
/// bars before the most recent one.
///
/// Returns `0.0` if fewer than `period + offset` bars exist or `period` is
/// zero.
#[must_use]
pub fn sma(bars: &[Bar], period: usize, offset: usize) -> f64 {
    if period == 0 || bars.len() < period + offset {
        return 0.0;
    }
    let end = bars.len() - offset;
    let sum: f64 = bars[end - period..end].iter().map(|b| b.close).sum();
    sum / period as f64
}

/// Exponential moving average of `values`.
///
/// The value at index `period - 1` is the simple average of the first
/// `period` values; later values follow
/// `ema[i] = (v[i] - ema[i-1]) * 2 / (period + 1) + ema[i-1]`. Indices before
/// the seed are `0.0`. Returns an empty vector if fewer than `period` values
/// exist or `period` is zero.
#[must_use]
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    let mut out = vec![0.0; values.len()];
    let k = 2.0 / (period as f64 + 1.0);
    out[period - 1] = values[..period].iter().sum::<f64>() / period as f64;
    for i in period..values.len() {
        out[i] = (values[i] - out[i - 1]).mul_add(k, out[i - 1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::bars_from_closes;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sma_linear_series() {
        let bars = bars_from_closes(&(1..=40).map(f64::from).collect::<Vec<_>>());
        assert_abs_diff_eq!(sma(&bars, 5, 0), 38.0, epsilon = 1e-9);
        assert_abs_diff_eq!(sma(&bars, 10, 0), 35.5, epsilon = 1e-9);
        assert_abs_diff_eq!(sma(&bars, 20, 0), 30.5, epsilon = 1e-9);
        assert_abs_diff_eq!(sma(&bars, 5, 5), 33.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sma_insufficient_history() {
        let bars = bars_from_closes(&[1.0; 19]);
        assert_eq!(sma(&bars, 20, 0), 0.0);
        assert_abs_diff_eq!(sma(&bars, 10, 0), 1.0, epsilon = 1e-12);
        assert_eq!(sma(&bars, 15, 5), 0.0);
        assert_eq!(sma(&bars, 0, 0), 0.0);
        assert_eq!(sma(&[], 5, 0), 0.0);
    }

    #[test]
    fn test_ema_seed_and_recurrence() {
        let values = [2.0, 4.0, 6.0, 8.0, 10.0];
        let out = ema(&values, 3);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 0.0);
        assert_abs_diff_eq!(out[2], 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[3], 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[4], 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ema_linear_lag() {
        let values: Vec<f64> = (1..=40).map(f64::from).collect();
        let out = ema(&values, 12);
        for i in 11..values.len() {
            assert_abs_diff_eq!(out[i], values[i] - 5.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_ema_too_short() {
        assert!(ema(&[1.0, 2.0], 3).is_empty());
        assert!(ema(&[1.0, 2.0], 0).is_empty());
    }
}
