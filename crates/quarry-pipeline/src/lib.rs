//! Concurrent enrichment and screening for quarry.
//!
//! - [`BarSource`] - Supplies bar history to workers
//! - [`Pool`] / [`PoolBuilder`] - Fixed-size worker pool over bounded queues
//! - [`screen`] - Producer, pool and collector in one call

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quarry-rs/quarry/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod pool;
mod screen;
mod source;

pub use error::PipelineError;
pub use pool::{Pool, PoolBuilder, PoolConfig, PoolStats};
pub use screen::{QUEUE_CAPACITY, screen};
pub use source::BarSource;
