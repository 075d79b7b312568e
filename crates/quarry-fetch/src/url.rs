//! Endpoint URL construction.

use quarry_types::SecId;

/// Paginated quote list endpoint.
pub const LIST_URL: &str = "https://82.push2.eastmoney.com/api/qt/clist/get";

/// Daily bar history endpoint.
pub const HISTORY_URL: &str = "https://push2his.eastmoney.com/api/qt/stock/kline/get";

/// Multi-security snapshot endpoint used for headline indices.
pub const INDEX_URL: &str = "https://push2.eastmoney.com/api/qt/ulist.np/get";

/// Headline indices: SSE Composite, SZSE Component, ChiNext.
pub const INDEX_SECIDS: &str = "1.000001,0.399001,0.399006";

/// Fields requested for index snapshots.
pub const INDEX_FIELDS: &str = "f12,f14,f2,f3";

/// Largest page the list endpoint serves.
pub const MAX_PAGE_SIZE: usize = 500;

/// Largest bar count the history endpoint serves.
pub const MAX_HISTORY_BARS: usize = 1000;

/// Builds a list endpoint URL for one page.
///
/// # Example
///
/// ```
/// use quarry_fetch::url::list_url;
///
/// let url = list_url("https://h/api", 2, 500, "m:1+t:2", "f12,f14");
/// assert_eq!(url, "https://h/api?pn=2&pz=500&fs=m:1+t:2&fields=f12,f14");
/// ```
#[must_use]
pub fn list_url(base: &str, page: usize, page_size: usize, segments: &str, fields: &str) -> String {
    format!("{base}?pn={page}&pz={page_size}&fs={segments}&fields={fields}")
}

/// Builds the daily history URL for a security, front-adjusted.
///
/// `count` is capped at [`MAX_HISTORY_BARS`].
///
/// # Example
///
/// ```
/// use quarry_fetch::url::history_url;
/// use quarry_types::SecId;
///
/// let id = SecId::from_code("600519").unwrap();
/// let url = history_url(&id, 80);
/// assert!(url.contains("secid=0.600519"));
/// assert!(url.ends_with("&lmt=80"));
/// ```
#[must_use]
pub fn history_url(secid: &SecId, count: usize) -> String {
    format!(
        "{HISTORY_URL}?secid={secid}&fields1=f1,f2,f3,f4,f5,f6\
         &fields2=f51,f52,f53,f54,f55,f56&klt=101&fqt=1&lmt={}",
        count.min(MAX_HISTORY_BARS)
    )
}

/// Builds the headline index snapshot URL.
#[must_use]
pub fn index_url() -> String {
    format!("{INDEX_URL}?secids={INDEX_SECIDS}&fields={INDEX_FIELDS}")
}
