//! Fixed-size worker pool over bounded queues.

use quarry_indicators::snapshot;
use quarry_screen::{Criterion, Strategy};
use quarry_types::{EnrichedRecord, QuoteRecord};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::{BarSource, PipelineError};

/// Pool sizing and history requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of concurrent workers (0 means default).
    pub workers: usize,
    /// Bars fetched per job; every indicator is derived from this one series.
    pub bar_count: usize,
    /// Jobs with fewer bars than this are dropped.
    pub min_bars: usize,
}

impl PoolConfig {
    /// Default number of workers.
    pub const DEFAULT_WORKERS: usize = 10;
    /// Default bars fetched per job.
    pub const DEFAULT_BAR_COUNT: usize = 80;
    /// Default minimum history.
    pub const DEFAULT_MIN_BARS: usize = 20;

    /// Returns the worker count with the default applied.
    #[must_use]
    pub const fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            Self::DEFAULT_WORKERS
        } else {
            self.workers
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: Self::DEFAULT_WORKERS,
            bar_count: Self::DEFAULT_BAR_COUNT,
            min_bars: Self::DEFAULT_MIN_BARS,
        }
    }
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Jobs pulled from the queue.
    pub processed: usize,
    /// Records forwarded to the result queue.
    pub accepted: usize,
    /// Records rejected by the predicate.
    pub rejected: usize,
    /// Jobs dropped for insufficient history.
    pub insufficient: usize,
    /// Jobs whose history fetch failed.
    pub failed: usize,
}

impl PoolStats {
    fn merge(&mut self, other: Self) {
        self.processed += other.processed;
        self.accepted += other.accepted;
        self.rejected += other.rejected;
        self.insufficient += other.insufficient;
        self.failed += other.failed;
    }
}

/// Builds a [`Pool`], failing if any required piece is absent.
#[derive(Default)]
pub struct PoolBuilder {
    config: PoolConfig,
    source: Option<Arc<dyn BarSource>>,
    predicate: Option<Arc<dyn Criterion>>,
    jobs: Option<mpsc::Receiver<QuoteRecord>>,
    results: Option<mpsc::Sender<EnrichedRecord>>,
}

impl PoolBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pool configuration.
    #[must_use]
    pub const fn config(mut self, config: PoolConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the worker count.
    #[must_use]
    pub const fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Sets the bar source.
    #[must_use]
    pub fn source(mut self, source: Arc<dyn BarSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the predicate. Defaults to price above MA20.
    #[must_use]
    pub fn predicate(mut self, predicate: Arc<dyn Criterion>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Sets the job queue.
    #[must_use]
    pub fn jobs(mut self, jobs: mpsc::Receiver<QuoteRecord>) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Sets the result queue.
    #[must_use]
    pub fn results(mut self, results: mpsc::Sender<EnrichedRecord>) -> Self {
        self.results = Some(results);
        self
    }

    /// Builds the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the bar source or either queue is missing.
    pub fn build(self) -> Result<Pool, PipelineError> {
        let source = self.source.ok_or(PipelineError::MissingBarSource)?;
        let jobs = self.jobs.ok_or(PipelineError::MissingJobs)?;
        let results = self.results.ok_or(PipelineError::MissingResults)?;
        let predicate = self
            .predicate
            .unwrap_or_else(|| Strategy::PriceAboveMa20.criterion());
        let config = PoolConfig {
            workers: self.config.effective_workers(),
            ..self.config
        };
        Ok(Pool {
            config,
            source,
            predicate,
            jobs: Arc::new(Mutex::new(jobs)),
            results,
        })
    }
}

impl fmt::Debug for PoolBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolBuilder")
            .field("config", &self.config)
            .field("source", &self.source.is_some())
            .field("predicate", &self.predicate.is_some())
            .field("jobs", &self.jobs.is_some())
            .field("results", &self.results.is_some())
            .finish()
    }
}

/// A configured worker pool, consumed by [`Pool::run`].
pub struct Pool {
    config: PoolConfig,
    source: Arc<dyn BarSource>,
    predicate: Arc<dyn Criterion>,
    jobs: Arc<Mutex<mpsc::Receiver<QuoteRecord>>>,
    results: mpsc::Sender<EnrichedRecord>,
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Pool {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> PoolBuilder {
        PoolBuilder::new()
    }

    /// Returns the effective configuration.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Runs every worker until the job queue is closed and drained, or
    /// `cancel` fires.
    ///
    /// The result queue is closed when this returns, after every worker has
    /// exited.
    pub async fn run(self, cancel: CancellationToken) -> PoolStats {
        info!(workers = self.config.workers, "pool started");
        let mut set = JoinSet::new();
        for id in 0..self.config.workers {
            let worker = Worker {
                id,
                config: self.config,
                source: Arc::clone(&self.source),
                predicate: Arc::clone(&self.predicate),
                jobs: Arc::clone(&self.jobs),
                results: self.results.clone(),
                cancel: cancel.clone(),
            };
            set.spawn(worker.run().instrument(info_span!("worker", id)));
        }
        drop(self.results);

        let mut stats = PoolStats::default();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(worker_stats) => stats.merge(worker_stats),
                Err(e) => warn!(error = %e, "worker task failed"),
            }
        }
        info!(
            processed = stats.processed,
            accepted = stats.accepted,
            insufficient = stats.insufficient,
            failed = stats.failed,
            "pool finished"
        );
        stats
    }
}

struct Worker {
    id: usize,
    config: PoolConfig,
    source: Arc<dyn BarSource>,
    predicate: Arc<dyn Criterion>,
    jobs: Arc<Mutex<mpsc::Receiver<QuoteRecord>>>,
    results: mpsc::Sender<EnrichedRecord>,
    cancel: CancellationToken,
}

enum Outcome {
    Accepted(EnrichedRecord),
    Rejected,
    Insufficient,
    Failed,
    Cancelled,
}

impl Worker {
    async fn run(self) -> PoolStats {
        let mut stats = PoolStats::default();
        loop {
            let job = tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                job = next_job(&self.jobs) => job,
            };
            let Some(quote) = job else { break };
            stats.processed += 1;

            match self.process(quote).await {
                Outcome::Accepted(record) => {
                    let sent = tokio::select! {
                        biased;
                        () = self.cancel.cancelled() => break,
                        sent = self.results.send(record) => sent,
                    };
                    if sent.is_err() {
                        debug!("result queue closed, worker exiting");
                        break;
                    }
                    stats.accepted += 1;
                }
                Outcome::Rejected => stats.rejected += 1,
                Outcome::Insufficient => stats.insufficient += 1,
                Outcome::Failed => stats.failed += 1,
                Outcome::Cancelled => break,
            }
        }
        debug!(worker = self.id, processed = stats.processed, "worker exiting");
        stats
    }

    async fn process(&self, quote: QuoteRecord) -> Outcome {
        let bars = match self
            .source
            .bars(&quote.code, self.config.bar_count, &self.cancel)
            .await
        {
            Ok(bars) => bars,
            Err(e) if e.is_cancelled() => return Outcome::Cancelled,
            Err(e) => {
                warn!(code = %quote.code, error = %e, "history fetch failed, skipping");
                return Outcome::Failed;
            }
        };

        if bars.len() < self.config.min_bars {
            debug!(
                code = %quote.code,
                bars = bars.len(),
                min = self.config.min_bars,
                "insufficient history, skipping"
            );
            return Outcome::Insufficient;
        }

        let record = EnrichedRecord::new(quote, snapshot(&bars));
        if self.predicate.accepts(&record) {
            Outcome::Accepted(record)
        } else {
            Outcome::Rejected
        }
    }
}

async fn next_job(jobs: &Mutex<mpsc::Receiver<QuoteRecord>>) -> Option<QuoteRecord> {
    jobs.lock().await.recv().await
}
