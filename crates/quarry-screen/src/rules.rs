//! Individual screening rules.

use quarry_types::{EnrichedRecord, QuoteRecord};

use crate::Criterion;

const SPECIAL_TREATMENT: &str = "ST";
const DELISTING: char = '退';

/// Returns true if the name marks a special-treatment security.
#[must_use]
pub fn is_special_treatment(name: &str) -> bool {
    name.to_uppercase().contains(SPECIAL_TREATMENT)
}

/// Returns true if the name marks a security being delisted.
#[must_use]
pub fn is_delisting(name: &str) -> bool {
    name.contains(DELISTING)
}

/// Main-board listing: Shanghai codes starting `6` or `5`, Shenzhen `00`.
#[must_use]
pub fn main_board(record: &EnrichedRecord) -> bool {
    let code = record.code().trim().as_bytes();
    match code {
        [b'6' | b'5', _, ..] => true,
        [b'0', b'0', ..] => true,
        _ => false,
    }
}

/// Rejects special-treatment names.
#[must_use]
pub fn exclude_st(record: &EnrichedRecord) -> bool {
    !is_special_treatment(record.name())
}

/// Rejects names marked for delisting.
#[must_use]
pub fn exclude_delisted(record: &EnrichedRecord) -> bool {
    !is_delisting(record.name())
}

/// Traded amount at least `min`.
pub fn amount_min(min: f64) -> impl Criterion {
    move |r: &EnrichedRecord| r.quote.amount >= min
}

/// Volume ratio at least `min`.
pub fn volume_ratio_min(min: f64) -> impl Criterion {
    move |r: &EnrichedRecord| r.quote.volume_ratio >= min
}

/// Turnover rate within `[min, max]`.
pub fn turnover_between(min: f64, max: f64) -> impl Criterion {
    move |r: &EnrichedRecord| (min..=max).contains(&r.quote.turnover_rate)
}

/// Percent change within `[min, max]`.
pub fn change_pct_between(min: f64, max: f64) -> impl Criterion {
    move |r: &EnrichedRecord| (min..=max).contains(&r.quote.change_pct)
}

/// Market capitalization at least `min`.
pub fn market_cap_min(min: f64) -> impl Criterion {
    move |r: &EnrichedRecord| r.quote.market_cap >= min
}

/// P/E within `[min, max]`. An unavailable P/E always fails.
pub fn pe_between(min: f64, max: f64) -> impl Criterion {
    move |r: &EnrichedRecord| r.quote.has_valid_pe() && (min..=max).contains(&r.quote.pe)
}

/// Net inflow at least `min`. Passes when no flow field was reported.
pub fn net_inflow_min(min: f64) -> impl Criterion {
    move |r: &EnrichedRecord| r.quote.flows_unreported() || r.quote.net_inflow >= min
}

/// Main-force inflow exceeds outflow. Passes when neither was reported.
#[must_use]
pub fn main_force_net_buying(record: &EnrichedRecord) -> bool {
    let q = &record.quote;
    (q.main_force_inflow == 0.0 && q.main_force_outflow == 0.0)
        || q.main_force_inflow > q.main_force_outflow
}

/// Price above MA5.
#[must_use]
pub fn price_above_ma5(record: &EnrichedRecord) -> bool {
    record.price() > record.indicators.ma5
}

/// MA5 above MA10.
#[must_use]
pub fn ma5_above_ma10(record: &EnrichedRecord) -> bool {
    record.indicators.ma5 > record.indicators.ma10
}

/// Price above MA20.
#[must_use]
pub fn price_above_ma20(record: &EnrichedRecord) -> bool {
    record.price() > record.indicators.ma20
}

/// MA60 rising over the lookback window.
#[must_use]
pub const fn ma60_up(record: &EnrichedRecord) -> bool {
    record.indicators.ma60_up
}

/// Positive MACD histogram that grew since the previous session.
#[must_use]
pub fn macd_histogram_grow(record: &EnrichedRecord) -> bool {
    let i = &record.indicators;
    i.macd_histogram > 0.0 && i.macd_histogram > i.macd_histogram_prev
}

/// MACD bullish crossover on the latest session.
#[must_use]
pub const fn macd_golden_cross(record: &EnrichedRecord) -> bool {
    record.indicators.macd_golden_cross
}

/// Growing histogram or fresh crossover.
#[must_use]
pub fn macd_momentum(record: &EnrichedRecord) -> bool {
    macd_histogram_grow(record) || macd_golden_cross(record)
}

/// Thresholds of the list-data pre-filter.
pub mod pre_filter {
    /// Minimum market capitalization (5 billion).
    pub const MARKET_CAP_MIN: f64 = 50e8;
    /// Upper P/E bound; the lower bound is exclusive zero.
    pub const PE_MAX: f64 = 60.0;
    /// Lower turnover bound in percent.
    pub const TURNOVER_MIN: f64 = 3.0;
    /// Upper turnover bound.
    pub const TURNOVER_MAX: f64 = 10.0;
    /// Minimum volume ratio.
    pub const VOLUME_RATIO_MIN: f64 = 1.2;
}

/// Cheap check on list data alone, run before any bar history is fetched.
///
/// Rejects special-treatment and delisting names, caps under 5 billion, P/E
/// outside `(0, 60]`, turnover outside `[3, 10]` and volume ratio below 1.2.
#[must_use]
pub fn quote_pre_filter(quote: &QuoteRecord) -> bool {
    use pre_filter::*;
    !is_special_treatment(&quote.name)
        && !is_delisting(&quote.name)
        && quote.market_cap >= MARKET_CAP_MIN
        && quote.has_valid_pe()
        && quote.pe <= PE_MAX
        && (TURNOVER_MIN..=TURNOVER_MAX).contains(&quote.turnover_rate)
        && quote.volume_ratio >= VOLUME_RATIO_MIN
}
