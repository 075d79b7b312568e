//! Built-in strategies and result ranking.

use quarry_types::EnrichedRecord;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::rules::{
    amount_min, change_pct_between, exclude_delisted, exclude_st, ma5_above_ma10, ma60_up,
    macd_momentum, main_board, main_force_net_buying, market_cap_min, net_inflow_min,
    pe_between, price_above_ma5, price_above_ma20, turnover_between, volume_ratio_min,
};
use crate::{All, Criterion};

/// Named rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Price above MA20 only.
    #[default]
    PriceAboveMa20,
    /// Fundamentals plus rising MA60 and MACD momentum.
    TrendMomentum,
    /// Main-board breakout with volume and capital-flow confirmation.
    Classic,
}

impl Strategy {
    /// Every strategy, in display order.
    pub const ALL: [Self; 3] = [Self::PriceAboveMa20, Self::TrendMomentum, Self::Classic];

    /// Returns the kebab-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PriceAboveMa20 => "price-above-ma20",
            Self::TrendMomentum => "trend-momentum",
            Self::Classic => "classic",
        }
    }

    /// Returns a one-line description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::PriceAboveMa20 => "price above the 20-session average",
            Self::TrendMomentum => {
                "cap >= 5bn, P/E (0, 60], price > MA20, MA60 rising, MACD momentum, \
                 turnover 3-10%, volume ratio >= 1.2"
            }
            Self::Classic => {
                "main board, amount >= 1bn, volume ratio >= 1.5, turnover 3-12%, \
                 change 3.5-7%, price > MA5 > MA10, price > MA20, net inflow >= 100m"
            }
        }
    }

    /// Builds the criterion for this strategy.
    #[must_use]
    pub fn criterion(self) -> Arc<dyn Criterion> {
        match self {
            Self::PriceAboveMa20 => Arc::new(price_above_ma20),
            Self::TrendMomentum => Arc::new(trend_momentum()),
            Self::Classic => Arc::new(classic()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown strategy name.
#[derive(Debug, Error)]
#[error("unknown strategy {0:?}, expected one of: price-above-ma20, trend-momentum, classic")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == key)
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}

/// Fundamentals, trend and momentum.
#[must_use]
pub fn trend_momentum() -> All {
    All::new()
        .with(exclude_st)
        .with(exclude_delisted)
        .with(market_cap_min(50e8))
        .with(pe_between(0.0, 60.0))
        .with(price_above_ma20)
        .with(ma60_up)
        .with(macd_momentum)
        .with(turnover_between(3.0, 10.0))
        .with(volume_ratio_min(1.2))
}

/// Main-board breakout with capital-flow confirmation.
#[must_use]
pub fn classic() -> All {
    All::new()
        .with(main_board)
        .with(amount_min(1e9))
        .with(volume_ratio_min(1.5))
        .with(turnover_between(3.0, 12.0))
        .with(change_pct_between(3.5, 7.0))
        .with(price_above_ma5)
        .with(ma5_above_ma10)
        .with(price_above_ma20)
        .with(exclude_st)
        .with(net_inflow_min(1e8))
        .with(main_force_net_buying)
}

/// Sorts by percent change, highest first, and keeps the first `n`.
#[must_use]
pub fn rank_top(mut records: Vec<EnrichedRecord>, n: usize) -> Vec<EnrichedRecord> {
    records.sort_by(|a, b| b.change_pct().total_cmp(&a.change_pct()));
    records.truncate(n);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_types::{IndicatorSnapshot, QuoteRecord};

    fn momentum_candidate() -> EnrichedRecord {
        EnrichedRecord::new(
            QuoteRecord {
                market_cap: 100e8,
                pe: 25.0,
                turnover_rate: 6.0,
                volume_ratio: 1.6,
                change_pct: 4.0,
                amount: 2e9,
                ..QuoteRecord::new("600123", "Sample", 12.0)
            },
            IndicatorSnapshot {
                ma5: 11.5,
                ma10: 11.0,
                ma20: 10.5,
                ma60: 10.0,
                ma60_up: true,
                macd_histogram: 0.3,
                macd_histogram_prev: 0.2,
                macd_golden_cross: false,
            },
        )
    }

    #[test]
    fn test_parse_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.as_str().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!(
            "Trend_Momentum".parse::<Strategy>().unwrap(),
            Strategy::TrendMomentum
        );
        assert!("moonshot".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_trend_momentum() {
        let rule = Strategy::TrendMomentum.criterion();
        let mut record = momentum_candidate();
        assert!(rule.accepts(&record));

        record.indicators.ma60_up = false;
        assert!(!rule.accepts(&record));

        let mut record = momentum_candidate();
        record.quote.pe = 0.0;
        assert!(!rule.accepts(&record));

        let mut record = momentum_candidate();
        record.indicators.macd_histogram = 0.1;
        assert!(!rule.accepts(&record));
        record.indicators.macd_golden_cross = true;
        assert!(rule.accepts(&record));
    }

    #[test]
    fn test_classic() {
        let rule = Strategy::Classic.criterion();
        let mut record = momentum_candidate();
        assert!(rule.accepts(&record));

        record.quote.change_pct = 8.0;
        assert!(!rule.accepts(&record));

        let mut record = momentum_candidate();
        record.quote.code = "300123".to_string();
        assert!(!rule.accepts(&record));

        let mut record = momentum_candidate();
        record.quote.net_inflow = 5e7;
        record.quote.main_force_inflow = 1.0;
        assert!(!rule.accepts(&record));
    }

    #[test]
    fn test_default_strategy() {
        let rule = Strategy::default().criterion();
        let mut record = momentum_candidate();
        assert!(rule.accepts(&record));
        record.indicators.ma20 = 13.0;
        assert!(!rule.accepts(&record));
    }

    #[test]
    fn test_rank_top() {
        let make = |code: &str, change: f64| {
            EnrichedRecord::new(
                QuoteRecord {
                    change_pct: change,
                    ..QuoteRecord::new(code, "x", 1.0)
                },
                IndicatorSnapshot::default(),
            )
        };
        let ranked = rank_top(
            vec![make("a", 1.0), make("b", 5.0), make("c", -2.0), make("d", 3.0)],
            3,
        );
        let codes: Vec<&str> = ranked.iter().map(EnrichedRecord::code).collect();
        assert_eq!(codes, vec!["b", "d", "a"]);
        assert!(rank_top(Vec::new(), 10).is_empty());
    }
}
