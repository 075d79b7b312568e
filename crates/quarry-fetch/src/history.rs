//! Daily bar history.

use chrono::NaiveDate;
use quarry_types::{Bar, SecId};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::url::history_url;
use crate::{ApiClient, DecodeError, FetchError};

/// Bars requested when the caller does not specify a count.
pub const DEFAULT_HISTORY_BARS: usize = 30;

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Payload>,
}

#[derive(Deserialize)]
struct Payload {
    #[serde(default)]
    klines: Option<Vec<String>>,
}

/// Parses one `date,open,close,high,low[,volume,...]` line.
///
/// Returns `None` for blank lines, lines with fewer than five fields, or an
/// unparseable date; the latter two are logged at debug level. Unparseable
/// prices and volume become zero.
#[must_use]
pub fn parse_kline(line: &str) -> Option<Bar> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 5 {
        debug!(line, fields = parts.len(), "short kline, dropping");
        return None;
    }
    let Ok(date) = NaiveDate::parse_from_str(parts[0].trim(), "%Y-%m-%d") else {
        debug!(line, "unparseable kline date, dropping");
        return None;
    };
    let open = parts[1].trim().parse().unwrap_or(0.0);
    let close = parts[2].trim().parse().unwrap_or(0.0);
    let volume = parts
        .get(5)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(0);
    Some(Bar::new(date, open, close, volume))
}

/// Parses a history response body into bars, oldest first.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] if the body is not JSON, or
/// [`FetchError::NoData`] if it carries no `data.klines` array or no line
/// parses.
pub fn parse_klines(body: &[u8], code: &str) -> Result<Vec<Bar>, FetchError> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(DecodeError::from)?;
    let lines = envelope
        .data
        .and_then(|d| d.klines)
        .ok_or_else(|| FetchError::NoData(format!("no klines for {code}")))?;

    let mut bars: Vec<Bar> = lines.iter().filter_map(|l| parse_kline(l)).collect();
    if bars.is_empty() {
        return Err(FetchError::NoData(format!("no parseable klines for {code}")));
    }
    if !bars.is_sorted_by_key(|b| b.date) {
        bars.sort_by_key(|b| b.date);
    }
    Ok(bars)
}

impl ApiClient {
    /// Fetches up to `count` daily bars for `code`, oldest first.
    ///
    /// `count` is capped at 1000.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] for an empty code or zero
    /// count, plus any transport or parse error.
    pub async fn history(
        &self,
        code: &str,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<Bar>, FetchError> {
        let secid = SecId::from_code(code)
            .filter(|_| count > 0)
            .ok_or_else(|| FetchError::InvalidRequest(format!("code {code:?}, count {count}")))?;
        let body = self.get(&history_url(&secid, count), cancel).await?;
        let bars = parse_klines(body.as_bytes(), secid.code())?;
        debug!(code = secid.code(), bars = bars.len(), "history fetched");
        Ok(bars)
    }

    /// Fetches the default number of recent bars for `code`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::history`].
    pub async fn recent_bars(
        &self,
        code: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Bar>, FetchError> {
        self.history(code, DEFAULT_HISTORY_BARS, cancel).await
    }
}
