//! Screening criteria and strategies for quarry.
//!
//! - [`Criterion`] - Accept/reject capability over an enriched record
//! - [`All`] / [`Any`] - Conjunction and disjunction
//! - [`Strategy`] - Built-in rule sets
//! - [`quote_pre_filter`] - List-data check run before history is fetched
//! - [`rank_top`] - Order results by percent change

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quarry-rs/quarry/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod criterion;
pub mod rules;
mod strategy;

pub use criterion::{All, Any, Criterion};
pub use rules::quote_pre_filter;
pub use strategy::{ParseStrategyError, Strategy, classic, rank_top, trend_momentum};
