//! Where workers get bar history from.

use async_trait::async_trait;
use quarry_fetch::{ApiClient, CancellationToken, FetchError};
use quarry_types::Bar;

/// Supplies oldest-first daily bars for a security.
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Fetches up to `count` recent bars for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Cancelled`] if `cancel` fires, or any other
    /// fetch error for this code.
    async fn bars(
        &self,
        code: &str,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<Bar>, FetchError>;
}

#[async_trait]
impl BarSource for ApiClient {
    async fn bars(
        &self,
        code: &str,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<Bar>, FetchError> {
        self.history(code, count, cancel).await
    }
}
