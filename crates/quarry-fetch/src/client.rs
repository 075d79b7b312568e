//! Paced, retrying API client.

use bytes::Bytes;
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::pacer::{Gate, Pacer, Slot, sleep_or_cancel};
use crate::transport::{ReqwestTransport, Transport};
use crate::{FetchError, TOO_MANY_REQUESTS};

/// Maximum number of characters of a response body written to the log.
pub const PREVIEW_CHARS: usize = 1200;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Minimum spacing between request starts.
    pub request_gap: Duration,
    /// Upper bound of the random jitter added to the gap.
    pub jitter_max: Duration,
    /// Maximum simultaneous in-flight requests (0 means default, capped at 20).
    pub max_in_flight: usize,
    /// Total attempts per request, including the first.
    pub max_attempts: u32,
    /// Backoff before a retry after an ordinary failure.
    pub retry_delay: Duration,
    /// Backoff before a retry after the server answered 429.
    pub rate_limit_delay: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Referer header value.
    pub referer: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_gap: Duration::from_millis(200),
            jitter_max: Duration::from_millis(150),
            max_in_flight: Gate::DEFAULT_CAPACITY,
            max_attempts: 3,
            retry_delay: Duration::from_millis(500),
            rate_limit_delay: Duration::from_secs(5),
            timeout: Duration::from_secs(5),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            referer: "https://quote.eastmoney.com/".to_string(),
        }
    }
}

impl ClientConfig {
    /// Returns the backoff to apply before the next attempt, given the status
    /// of the previous one (`None` for a network or read failure).
    #[must_use]
    pub const fn backoff_after(&self, last_status: Option<u16>) -> Duration {
        match last_status {
            Some(TOO_MANY_REQUESTS) => self.rate_limit_delay,
            _ => self.retry_delay,
        }
    }
}

/// HTTP client shared by every caller in the process.
///
/// Clones share the same pacer and concurrency gate.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    pacer: Arc<Pacer>,
    gate: Gate,
    config: Arc<ClientConfig>,
}

impl ApiClient {
    /// Creates a client backed by `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(ClientConfig::default())
    }

    /// Creates a client over an arbitrary transport.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            pacer: Arc::new(Pacer::new(config.request_gap, config.jitter_max)),
            gate: Gate::new(config.max_in_flight),
            config: Arc::new(config),
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the shared pacer.
    #[must_use]
    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    /// Returns the shared concurrency gate.
    #[must_use]
    pub const fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Issues a GET request. See [`ApiClient::fetch`].
    ///
    /// # Errors
    ///
    /// See [`ApiClient::fetch`].
    pub async fn get(&self, url: &str, cancel: &CancellationToken) -> Result<Body, FetchError> {
        self.fetch(Method::GET, url, cancel).await
    }

    /// Issues a request with pacing, bounded concurrency and retries.
    ///
    /// Every attempt waits on the pacer and takes a concurrency slot. A
    /// non-200 status or transport failure is retried after a backoff that is
    /// longer when the most recent status seen was 429; a transport failure
    /// does not clear that status. The returned [`Body`] keeps
    /// the slot of the successful attempt until it is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Cancelled`] if `cancel` fires while waiting, or
    /// the last attempt's error once every attempt has failed.
    pub async fn fetch(
        &self,
        method: Method,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Body, FetchError> {
        let attempts = self.config.max_attempts.max(1);
        let mut last_status: Option<u16> = None;
        let mut last_error = FetchError::Http("no attempt made".to_string());

        for attempt in 1..=attempts {
            if attempt > 1 {
                let delay = self.config.backoff_after(last_status);
                debug!(attempt, ?delay, ?last_status, "backing off before retry");
                sleep_or_cancel(delay, cancel).await?;
            }

            self.pacer.pace(cancel).await?;
            let slot = self.gate.acquire(cancel).await?;

            debug!(%method, url, attempt, "request");
            let response = match self.transport.send(method.clone(), url).await {
                Ok(response) => response,
                Err(e) => {
                    debug!(%method, url, attempt, error = %e, "request failed");
                    last_error = e;
                    continue;
                }
            };

            debug!(
                %method,
                url,
                status = response.status,
                len = response.body.len(),
                preview = %preview(&response.body),
                "response"
            );

            if !response.is_ok() {
                last_status = Some(response.status);
                last_error = FetchError::Status {
                    status: response.status,
                };
                continue;
            }

            return Ok(Body::new(response.body, slot));
        }

        warn!(%method, url, attempts, error = %last_error, "request failed after all attempts");
        Err(last_error)
    }
}

/// Successful response body.
///
/// Holds the concurrency slot of the request that produced it; the slot is
/// released when the body is dropped, however it was consumed.
#[derive(Debug)]
pub struct Body {
    bytes: Bytes,
    _slot: Slot,
}

impl Body {
    pub(crate) const fn new(bytes: Bytes, slot: Slot) -> Self {
        Self { bytes, _slot: slot }
    }

    /// Returns the body bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the body length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Releases the slot and returns the underlying bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl AsRef<[u8]> for Body {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Renders a single-line, length-capped preview of a body for logging.
pub(crate) fn preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let mut out: String = text
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if text.chars().nth(PREVIEW_CHARS).is_some() {
        out.push_str("...");
    }
    out
}
