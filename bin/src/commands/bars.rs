//! Bars command implementation.
//!
//! Fetches daily bars for several codes concurrently; the shared client still
//! paces and bounds the actual requests.

use crate::ApiArgs;
use crate::display::{Format, print_bars, write_bars};
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use quarry_lib::prelude::*;
use std::path::PathBuf;

/// Codes fetched at the same time.
const PARALLEL_CODES: usize = 4;

/// Show or write recent daily bars for each code.
///
/// Without `count` the client's default history length is used.
pub(crate) async fn show_bars(
    api: ApiArgs,
    codes: Vec<String>,
    count: Option<usize>,
    output_dir: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let client = ApiClient::new(api.client_config()).context("failed to build HTTP client")?;
    let cancel = CancellationToken::new();

    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let results: Vec<(String, Result<Vec<Bar>, FetchError>)> = stream::iter(codes)
        .map(|code| {
            let client = &client;
            let cancel = &cancel;
            async move {
                let bars = match count {
                    Some(count) => client.history(&code, count, cancel).await,
                    None => client.recent_bars(&code, cancel).await,
                };
                (code, bars)
            }
        })
        .buffered(PARALLEL_CODES)
        .collect()
        .await;

    let mut failures = 0usize;
    for (code, bars) in &results {
        match bars {
            Ok(bars) => match &output_dir {
                Some(dir) => {
                    let path = dir.join(format!("{code}.{}", format.extension()));
                    write_bars(bars, &path, format)?;
                    println!("  Written: {}", path.display());
                }
                None => print_bars(code, bars),
            },
            Err(e) => {
                failures += 1;
                eprintln!("{code}: {e}");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} out of {} codes failed", failures, results.len());
    }
    Ok(())
}
