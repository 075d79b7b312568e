//! Rust library for screening Eastmoney A-share quotes.
//!
//! This is a facade crate that re-exports functionality from the quarry
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use quarry_lib::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cancel = CancellationToken::new();
//!     let client = ApiClient::with_defaults()?;
//!
//!     let candidates: Vec<QuoteRecord> = client
//!         .main_board_quotes(&cancel)
//!         .await?
//!         .into_iter()
//!         .filter(quote_pre_filter)
//!         .collect();
//!
//!     let (selected, _stats) = screen(
//!         Arc::new(client),
//!         candidates,
//!         Strategy::TrendMomentum.criterion(),
//!         PoolConfig::default(),
//!         &cancel,
//!     )
//!     .await?;
//!
//!     for record in rank_top(selected, 10) {
//!         println!("{} {} {:.2}%", record.code(), record.name(), record.change_pct());
//!     }
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quarry-rs/quarry/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use quarry_types::*;

// Re-export the indicator engine
pub use quarry_indicators::{MacdParams, MacdSignal, ema, macd, sma, snapshot};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use quarry_fetch::{
    ApiClient, CancellationToken, ClientConfig, DecodeError, DiffShape, FetchError, Gate,
    ListEndpoint, Pacer, ReqwestTransport, Transport, decode_page,
};

// Re-export screening rules
#[cfg(feature = "screen")]
pub use quarry_screen::{Criterion, Strategy, quote_pre_filter, rank_top, rules};

// Re-export the worker pipeline
#[cfg(feature = "pipeline")]
pub use quarry_pipeline::{
    BarSource, PipelineError, Pool, PoolBuilder, PoolConfig, PoolStats, screen,
};

#[cfg(feature = "pipeline")]
mod run;

#[cfg(feature = "pipeline")]
pub use run::{ScreenReport, screen_main_board};

// Re-export formatters
#[cfg(feature = "format")]
pub use quarry_format::{CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat};

/// Prelude module for convenient imports.
///
/// ```
/// use quarry_lib::prelude::*;
/// ```
pub mod prelude {
    pub use quarry_types::{
        Bar, BriefRecord, EnrichedRecord, IndexQuote, IndicatorSnapshot, QuarryError,
        QuoteRecord, Result, SecId, TraceId,
    };

    pub use quarry_indicators::snapshot;

    #[cfg(feature = "fetch")]
    pub use quarry_fetch::{ApiClient, CancellationToken, ClientConfig, FetchError};

    #[cfg(feature = "screen")]
    pub use quarry_screen::{Criterion, Strategy, quote_pre_filter, rank_top};

    #[cfg(feature = "pipeline")]
    pub use quarry_pipeline::{BarSource, PipelineError, PoolConfig, screen};

    #[cfg(feature = "pipeline")]
    pub use crate::{ScreenReport, screen_main_board};

    #[cfg(feature = "format")]
    pub use quarry_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};
}
