//! Technical indicators for quarry.
//!
//! This crate provides pure functions over daily bar series:
//!
//! - [`sma`] / [`ema`] - Moving averages
//! - [`macd`] - MACD histogram and bullish crossover
//! - [`trend_up`] - Rising 60-session average
//! - [`snapshot`] - Every indicator merged into one [`IndicatorSnapshot`]
//!
//! [`IndicatorSnapshot`]: quarry_types::IndicatorSnapshot

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quarry-rs/quarry/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod average;
mod macd;
mod snapshot;

pub use average::{closes, ema, sma};
pub use macd::{MacdParams, MacdSignal, macd, macd_with};
pub use snapshot::{TREND_LOOKBACK, TREND_PERIOD, snapshot, trend_up};
