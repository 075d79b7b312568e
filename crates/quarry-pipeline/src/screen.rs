//! One-call screening over a candidate list.

use quarry_screen::Criterion;
use quarry_types::{EnrichedRecord, QuoteRecord};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{BarSource, PipelineError, Pool, PoolConfig, PoolStats};

/// Capacity of the job and result queues.
pub const QUEUE_CAPACITY: usize = 50;

/// Feeds `candidates` through a worker pool and collects every accepted
/// record.
///
/// Output order follows completion, not input order.
///
/// # Errors
///
/// Returns [`PipelineError::Cancelled`] if `cancel` fired before the run
/// completed.
pub async fn screen(
    source: Arc<dyn BarSource>,
    candidates: Vec<QuoteRecord>,
    predicate: Arc<dyn Criterion>,
    config: PoolConfig,
    cancel: &CancellationToken,
) -> Result<(Vec<EnrichedRecord>, PoolStats), PipelineError> {
    let (job_tx, job_rx) = mpsc::channel(QUEUE_CAPACITY);
    let (result_tx, mut result_rx) = mpsc::channel(QUEUE_CAPACITY);

    let pool = Pool::builder()
        .config(config)
        .source(source)
        .predicate(predicate)
        .jobs(job_rx)
        .results(result_tx)
        .build()?;

    let total = candidates.len();
    let produce = async move {
        let mut sent = 0usize;
        for quote in candidates {
            let delivered = tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                delivered = job_tx.send(quote) => delivered,
            };
            if delivered.is_err() {
                break;
            }
            sent += 1;
        }
        debug!(sent, total, "job producer finished");
    };

    let collect = async {
        let mut out = Vec::new();
        while let Some(record) = result_rx.recv().await {
            info!(code = %record.code(), name = %record.name(), price = record.price(),
                change_pct = record.change_pct(), "selected");
            out.push(record);
        }
        out
    };

    let ((), stats, selected) = tokio::join!(produce, pool.run(cancel.clone()), collect);

    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }
    Ok((selected, stats))
}
