//! The raw HTTP seam under [`ApiClient`](crate::ApiClient).

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER};
use reqwest::{Client, Method};
use std::time::Duration;

use crate::{ClientConfig, FetchError};

/// Status code and fully buffered body of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for HTTP 200.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Performs a single HTTP exchange with no retries or pacing.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Sends one request and buffers the whole body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] on connection, timeout or body read
    /// failure. A non-200 status is not an error at this layer.
    async fn send(&self, method: Method, url: &str) -> Result<RawResponse, FetchError>;
}

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Accept header sent with every request.
    pub const ACCEPT: &'static str = "application/json, text/plain, */*";
    /// Accept-Language header sent with every request.
    pub const ACCEPT_LANGUAGE: &'static str = "zh-CN,zh;q=0.9,en;q=0.8";

    /// Builds the transport from client settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if a header value is invalid or the
    /// underlying client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(Self::ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(Self::ACCEPT_LANGUAGE),
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(&config.referer)
                .map_err(|e| FetchError::Client(format!("invalid referer: {e}")))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(&config.user_agent)
            .pool_max_idle_per_host(config.max_in_flight)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .gzip(true)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, method: Method, url: &str) -> Result<RawResponse, FetchError> {
        let response = self
            .client
            .request(method, url)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Http(format!("reading body: {e}")))?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_builds_from_defaults() {
        assert!(ReqwestTransport::new(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_referer_rejected() {
        let config = ClientConfig {
            referer: "bad\nvalue".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            ReqwestTransport::new(&config),
            Err(FetchError::Client(_))
        ));
    }

    #[test]
    fn test_raw_response_status() {
        assert!(RawResponse::new(200, "{}").is_ok());
        assert!(!RawResponse::new(429, "").is_ok());
    }
}
