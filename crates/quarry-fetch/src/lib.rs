//! HTTP client and list decoding for the quarry screener.
//!
//! This crate provides the data retrieval pipeline:
//!
//! - [`Pacer`] and [`Gate`] - Request spacing and in-flight limits
//! - [`ApiClient`] - Paced client with tiered retry backoff
//! - [`decode_page`] - Streaming decoder for list pages
//! - [`ApiClient::paginate`] - Multi-page list retrieval
//! - [`ApiClient::history`] - Daily bar history
//! - [`ApiClient::index_quotes`] - Headline index snapshots

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/quarry-rs/quarry/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod decode;
mod error;
mod history;
mod index;
mod lenient;
mod pacer;
mod paginate;
mod schema;
mod transport;
pub mod url;

#[cfg(test)]
mod testing;

pub use client::{ApiClient, Body, ClientConfig, PREVIEW_CHARS};
pub use decode::{DiffShape, PageSummary, decode_page};
pub use error::{DecodeError, FetchError, TOO_MANY_REQUESTS};
pub use history::{DEFAULT_HISTORY_BARS, parse_kline, parse_klines};
pub use pacer::{Gate, Pacer, Slot};
pub use paginate::ListEndpoint;
pub use schema::{INDEX_CHANGE_SCALE_THRESHOLD, LOT_SIZE, ListItem, RawBrief, RawIndex, RawQuote};
pub use transport::{RawResponse, ReqwestTransport, Transport};

pub use reqwest::Method;
pub use tokio_util::sync::CancellationToken;
