//! Screen command implementation.
//!
//! One pass: main-board quotes, quote pre-filter, concurrent enrichment with
//! the chosen strategy, then the top records by change percent.

use crate::ApiArgs;
use crate::display::{Format, print_results, write_results};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use quarry_lib::prelude::*;
use quarry_lib::PoolConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, info, info_span};

/// Options for one screening run.
pub(crate) struct ScreenOptions {
    pub(crate) strategy: Strategy,
    pub(crate) top: usize,
    pub(crate) pool: PoolConfig,
    pub(crate) timeout: Duration,
    pub(crate) output: Option<PathBuf>,
    pub(crate) format: Format,
}

/// Run one screening pass and print or write the ranked result.
pub(crate) async fn screen(api: ApiArgs, options: ScreenOptions, quiet: bool) -> Result<()> {
    let trace = TraceId::new();
    run(api, options, quiet)
        .instrument(info_span!("run", trace = %trace))
        .await
}

async fn run(api: ApiArgs, options: ScreenOptions, quiet: bool) -> Result<()> {
    let client = ApiClient::new(api.client_config()).context("failed to build HTTP client")?;
    let cancel = super::cancel_on_signal(options.timeout);
    let _stop_watcher = cancel.clone().drop_guard();

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .context("invalid progress template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    };

    info!(strategy = %options.strategy, "screen started");
    progress.set_message(format!("screening main board with {}", options.strategy));
    let outcome = quarry_lib::screen_main_board(
        Arc::new(client),
        options.strategy.criterion(),
        options.pool,
        options.top,
        &cancel,
    )
    .await;
    progress.finish_and_clear();

    let report = match outcome {
        Ok(report) => report,
        Err(e) if e.is_cancelled() => anyhow::bail!("screen cancelled before completion"),
        Err(e) => return Err(anyhow::Error::from(e).context("screen failed")),
    };

    match options.output {
        Some(path) => {
            write_results(&report.selected, &path, options.format)?;
            if !quiet {
                println!("Output written to: {}", path.display());
            }
        }
        None => print_results(&report, options.strategy),
    }

    Ok(())
}
