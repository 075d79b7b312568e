//! Headline index snapshots.

use quarry_types::IndexQuote;
use tokio_util::sync::CancellationToken;

use crate::decode::{DiffShape, decode_page};
use crate::url::index_url;
use crate::{ApiClient, FetchError};

impl ApiClient {
    /// Fetches the SSE Composite, SZSE Component and ChiNext snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NoData`] if the response carries no record list,
    /// plus any transport or decode error.
    pub async fn index_quotes(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<IndexQuote>, FetchError> {
        let body = self.get(&index_url(), cancel).await?;
        let mut quotes = Vec::new();
        let summary = decode_page(body.as_bytes(), &mut quotes)?;
        match summary.diff {
            DiffShape::Array | DiffShape::Object => Ok(quotes),
            DiffShape::Missing | DiffShape::Unsupported => {
                Err(FetchError::NoData("no index records".to_string()))
            }
        }
    }
}
