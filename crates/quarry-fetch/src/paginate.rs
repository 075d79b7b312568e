//! Multi-page list retrieval.

use quarry_types::{BriefRecord, QuoteRecord};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::decode::decode_page;
use crate::schema::ListItem;
use crate::url::{LIST_URL, MAX_PAGE_SIZE, list_url};
use crate::{ApiClient, FetchError};

/// A list endpoint: base URL, market segment filter and requested fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEndpoint {
    base: String,
    segments: String,
    fields: String,
}

impl ListEndpoint {
    /// Main-board segments with the fields needed for screening.
    pub const MAIN_BOARD_SEGMENTS: &'static str = "m:1+t:2,m:0+t:2";
    /// Fields requested for main-board quotes.
    pub const MAIN_BOARD_FIELDS: &'static str = "f2,f3,f6,f8,f10,f12,f14,f23,f20,f9";
    /// All A-share segments.
    pub const UNIVERSE_SEGMENTS: &'static str = "m:0+t:6,m:0+t:80,m:1+t:2,m:1+t:23";
    /// Fields requested for universe enumeration.
    pub const UNIVERSE_FIELDS: &'static str = "f12,f14";

    /// Creates an endpoint description.
    #[must_use]
    pub fn new(
        base: impl Into<String>,
        segments: impl Into<String>,
        fields: impl Into<String>,
    ) -> Self {
        Self {
            base: base.into(),
            segments: segments.into(),
            fields: fields.into(),
        }
    }

    /// Main-board quotes.
    #[must_use]
    pub fn main_board() -> Self {
        Self::new(LIST_URL, Self::MAIN_BOARD_SEGMENTS, Self::MAIN_BOARD_FIELDS)
    }

    /// Every listed security, code and name only.
    #[must_use]
    pub fn universe() -> Self {
        Self::new(LIST_URL, Self::UNIVERSE_SEGMENTS, Self::UNIVERSE_FIELDS)
    }

    /// Returns the same endpoint served from another base URL.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Builds the URL of a 1-based page.
    #[must_use]
    pub fn page_url(&self, page: usize, page_size: usize) -> String {
        list_url(&self.base, page, page_size, &self.segments, &self.fields)
    }
}

impl ApiClient {
    /// Retrieves every record of a list endpoint, page by page.
    ///
    /// `page_size` is clamped to `1..=500`. Paging stops when the accumulated
    /// count reaches the server-reported total, or a page comes back empty or
    /// short.
    ///
    /// # Errors
    ///
    /// Any transport or decode error aborts the whole retrieval.
    pub async fn paginate<T: ListItem>(
        &self,
        endpoint: &ListEndpoint,
        page_size: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, FetchError> {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let body = self.get(&endpoint.page_url(page, page_size), cancel).await?;
            let summary = decode_page(body.as_bytes(), &mut items)?;
            drop(body);

            debug!(
                page,
                count = summary.count,
                total = summary.total,
                accumulated = items.len(),
                "list page decoded"
            );

            if summary.count == 0 || summary.total <= items.len() || summary.count < page_size {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    /// Retrieves main-board quotes.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::paginate`].
    pub async fn main_board_quotes(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<QuoteRecord>, FetchError> {
        let quotes: Vec<QuoteRecord> = self
            .paginate(&ListEndpoint::main_board(), MAX_PAGE_SIZE, cancel)
            .await?;
        if quotes.is_empty() {
            warn!("main board list returned no quotes");
        } else {
            info!(count = quotes.len(), "main board quotes fetched");
        }
        Ok(quotes)
    }

    /// Retrieves code and name for every listed security.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::paginate`].
    pub async fn universe(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<BriefRecord>, FetchError> {
        let all: Vec<BriefRecord> = self
            .paginate(&ListEndpoint::universe(), MAX_PAGE_SIZE, cancel)
            .await?;
        info!(count = all.len(), "universe fetched");
        Ok(all)
    }
}
