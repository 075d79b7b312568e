//! Core types for the quarry market-data screener.
//!
//! This crate provides the fundamental data structures used throughout quarry:
//!
//! - [`QuoteRecord`] - One row of the quote list endpoint
//! - [`BriefRecord`] - Code and name only, for universe enumeration
//! - [`IndexQuote`] - Headline index snapshot
//! - [`Bar`] - One daily trading session
//! - [`EnrichedRecord`] - A quote merged with its derived indicators
//! - [`SecId`] - Exchange-prefixed security identifier
//! - [`TraceId`] - Per-run correlation id for log lines

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quarry-rs/quarry/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod enriched;
mod error;
mod quote;
mod secid;
mod trace;

pub use bar::Bar;
pub use enriched::{EnrichedRecord, IndicatorSnapshot};
pub use error::{QuarryError, Result};
pub use quote::{BriefRecord, IndexQuote, QuoteRecord};
pub use secid::{Exchange, SecId};
pub use trace::TraceId;
