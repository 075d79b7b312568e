//! One-call runs over the live endpoints.
//!
//! These helpers join the fetch, screen and pipeline crates and report every
//! failure as a [`QuarryError`](quarry_types::QuarryError).

use quarry_fetch::{ApiClient, CancellationToken};
use quarry_pipeline::{PoolConfig, PoolStats, screen};
use quarry_screen::{Criterion, quote_pre_filter, rank_top};
use quarry_types::{EnrichedRecord, QuoteRecord, Result};
use std::sync::Arc;
use tracing::info;

/// Outcome of one main-board screening pass.
#[derive(Debug, Clone, Default)]
pub struct ScreenReport {
    /// Quotes returned by the list endpoint.
    pub fetched: usize,
    /// Quotes that passed [`quote_pre_filter`].
    pub candidates: usize,
    /// Accepted records, ranked by change percent and cut to `top`.
    pub selected: Vec<EnrichedRecord>,
    /// Worker pool counters.
    pub stats: PoolStats,
}

/// Fetches main-board quotes, pre-filters them, enriches the survivors on a
/// worker pool and keeps the `top` accepted records.
///
/// # Errors
///
/// Returns [`QuarryError::Cancelled`](quarry_types::QuarryError::Cancelled)
/// if `cancel` fires, or the mapped fetch error if the quote list cannot be
/// retrieved. Per-code history failures are counted in
/// [`PoolStats::failed`] and do not fail the run.
pub async fn screen_main_board(
    client: Arc<ApiClient>,
    criterion: Arc<dyn Criterion>,
    config: PoolConfig,
    top: usize,
    cancel: &CancellationToken,
) -> Result<ScreenReport> {
    let quotes = client.main_board_quotes(cancel).await?;
    let fetched = quotes.len();
    let candidates: Vec<QuoteRecord> = quotes.into_iter().filter(quote_pre_filter).collect();
    let candidate_count = candidates.len();
    info!(fetched, candidates = candidate_count, "quote pre-filter applied");

    let (selected, stats) = screen(client, candidates, criterion, config, cancel).await?;
    let selected = rank_top(selected, top);
    info!(accepted = stats.accepted, kept = selected.len(), "screen finished");

    Ok(ScreenReport {
        fetched,
        candidates: candidate_count,
        selected,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quarry_fetch::{ClientConfig, FetchError, Method, RawResponse, Transport};
    use quarry_types::QuarryError;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Serves list and kline bodies by URL, or a fixed status for everything.
    #[derive(Debug)]
    struct RoutedTransport {
        list: String,
        klines: String,
        status: u16,
        urls: Mutex<Vec<String>>,
    }

    impl RoutedTransport {
        fn new(list: &str) -> Self {
            let lines: Vec<String> = (1..=30)
                .map(|day| {
                    let close = 10.0 + f64::from(day) * 0.1;
                    format!(
                        "\"2024-01-{day:02},{:.2},{close:.2},{close:.2},{:.2},1000\"",
                        close - 0.05,
                        close - 0.1
                    )
                })
                .collect();
            Self {
                list: list.to_string(),
                klines: format!(r#"{{"data":{{"klines":[{}]}}}}"#, lines.join(",")),
                status: 200,
                urls: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                status,
                ..Self::new("{}")
            }
        }

        fn count(&self, needle: &str) -> usize {
            self.urls
                .lock()
                .unwrap()
                .iter()
                .filter(|url| url.contains(needle))
                .count()
        }
    }

    #[async_trait]
    impl Transport for RoutedTransport {
        async fn send(
            &self,
            _method: Method,
            url: &str,
        ) -> std::result::Result<RawResponse, FetchError> {
            self.urls.lock().unwrap().push(url.to_string());
            if self.status != 200 {
                return Ok(RawResponse::new(self.status, "busy"));
            }
            let body = if url.contains("kline") {
                self.klines.clone()
            } else {
                self.list.clone()
            };
            Ok(RawResponse::new(200, body))
        }
    }

    const TWO_QUOTES: &str = r#"{"data":{"total":2,"diff":[
        {"f12":"600519","f14":"Moutai","f2":1700.5,"f3":2.5,"f6":1000,"f8":5.0,"f10":1.5,"f23":8.0,"f20":60000000000,"f9":20.0},
        {"f12":"600000","f14":"Pudong Bank","f2":10.0,"f3":1.0,"f6":1000,"f8":5.0,"f10":1.5,"f23":1.0,"f20":1000000000,"f9":20.0}
    ]}}"#;

    fn client(transport: &Arc<RoutedTransport>) -> Arc<ApiClient> {
        let config = ClientConfig {
            request_gap: Duration::ZERO,
            jitter_max: Duration::ZERO,
            ..ClientConfig::default()
        };
        Arc::new(ApiClient::with_transport(
            config,
            Arc::clone(transport) as Arc<dyn Transport>,
        ))
    }

    fn accept_all() -> Arc<dyn Criterion> {
        Arc::new(|_: &EnrichedRecord| true)
    }

    #[tokio::test(start_paused = true)]
    async fn test_screen_main_board_pre_filters_and_enriches() {
        let transport = Arc::new(RoutedTransport::new(TWO_QUOTES));
        let cancel = CancellationToken::new();

        let report = screen_main_board(
            client(&transport),
            accept_all(),
            PoolConfig::default(),
            10,
            &cancel,
        )
        .await
        .unwrap();

        assert_eq!(report.fetched, 2);
        assert_eq!(report.candidates, 1);
        assert_eq!(report.stats.processed, 1);
        assert_eq!(report.selected.len(), 1);
        assert_eq!(report.selected[0].code(), "600519");
        assert!(report.selected[0].indicators.ma20 > 0.0);
        assert_eq!(transport.count("kline"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_screen_main_board_truncates_to_top() {
        let transport = Arc::new(RoutedTransport::new(TWO_QUOTES));
        let cancel = CancellationToken::new();

        let report = screen_main_board(
            client(&transport),
            accept_all(),
            PoolConfig::default(),
            0,
            &cancel,
        )
        .await
        .unwrap();

        assert_eq!(report.stats.accepted, 1);
        assert!(report.selected.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_list_failure_maps_to_http() {
        let transport = Arc::new(RoutedTransport::failing(500));
        let cancel = CancellationToken::new();

        let err = screen_main_board(
            client(&transport),
            accept_all(),
            PoolConfig::default(),
            10,
            &cancel,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, QuarryError::Http(_)));
        assert!(!err.is_cancelled());
        assert_eq!(transport.count("kline"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_run_reports_cancelled() {
        let transport = Arc::new(RoutedTransport::new(TWO_QUOTES));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = screen_main_board(
            client(&transport),
            accept_all(),
            PoolConfig::default(),
            10,
            &cancel,
        )
        .await
        .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(transport.count("clist"), 0);
    }
}
