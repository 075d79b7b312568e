//! Request spacing and in-flight limits.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;

use crate::FetchError;

/// Enforces a minimum gap plus random jitter between request starts.
///
/// All clones of an [`ApiClient`](crate::ApiClient) share one pacer, so the
/// spacing holds across every concurrent caller. The state lock is held while
/// a caller waits for its turn; callers are therefore released one at a time.
#[derive(Debug)]
pub struct Pacer {
    state: Mutex<PaceState>,
}

#[derive(Debug)]
struct PaceState {
    gap: Duration,
    jitter_max: Duration,
    last: Option<Instant>,
}

impl Pacer {
    /// Creates a pacer with the given minimum gap and jitter ceiling.
    #[must_use]
    pub const fn new(gap: Duration, jitter_max: Duration) -> Self {
        Self {
            state: Mutex::const_new(PaceState {
                gap,
                jitter_max,
                last: None,
            }),
        }
    }

    /// Returns the configured gap and jitter ceiling.
    pub async fn spacing(&self) -> (Duration, Duration) {
        let state = self.state.lock().await;
        (state.gap, state.jitter_max)
    }

    /// Returns when the last paced request was released, if any.
    pub async fn last_request(&self) -> Option<Instant> {
        self.state.lock().await.last
    }

    /// Waits until the caller may start a request.
    ///
    /// The wait is `gap + U[0, jitter_max]` measured from the previous
    /// release. The first request is never delayed.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Cancelled`] if `cancel` fires first. A cancelled
    /// caller does not update the last-request timestamp.
    pub async fn pace(&self, cancel: &CancellationToken) -> Result<(), FetchError> {
        let mut state = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(FetchError::Cancelled),
            state = self.state.lock() => state,
        };

        if state.gap.is_zero() && state.jitter_max.is_zero() {
            return Ok(());
        }

        if let Some(last) = state.last {
            let target = last + state.gap + jitter(state.jitter_max);
            if target > Instant::now() {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(FetchError::Cancelled),
                    () = sleep_until(target) => {}
                }
            }
        }

        state.last = Some(Instant::now());
        Ok(())
    }
}

/// Uniform random jitter in `[0, max]` at millisecond resolution.
fn jitter(max: Duration) -> Duration {
    let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(fastrand::u64(0..=max_ms))
}

/// Counting gate bounding simultaneous in-flight requests.
#[derive(Debug, Clone)]
pub struct Gate {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl Gate {
    /// Capacity used when zero is requested.
    pub const DEFAULT_CAPACITY: usize = 4;
    /// Hard ceiling on capacity.
    pub const MAX_CAPACITY: usize = 20;

    /// Creates a gate. Zero falls back to the default; values above the
    /// hard ceiling are clamped.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = Self::effective_capacity(capacity);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Applies the default and ceiling rules to a requested capacity.
    #[must_use]
    pub const fn effective_capacity(requested: usize) -> usize {
        if requested == 0 {
            Self::DEFAULT_CAPACITY
        } else if requested > Self::MAX_CAPACITY {
            Self::MAX_CAPACITY
        } else {
            requested
        }
    }

    /// Returns the configured capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of slots currently held.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.capacity - self.permits.available_permits()
    }

    /// Waits for a free slot.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Cancelled`] if `cancel` fires first. A cancelled
    /// waiter never holds a slot.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<Slot, FetchError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(FetchError::Cancelled),
            permit = Arc::clone(&self.permits).acquire_owned() => permit
                .map(|permit| Slot { _permit: permit })
                .map_err(|_| FetchError::Client("concurrency gate closed".to_string())),
        }
    }
}

/// One held slot of a [`Gate`]. Dropping it releases the slot.
#[derive(Debug)]
pub struct Slot {
    _permit: OwnedSemaphorePermit,
}

/// Sleeps for `duration` unless `cancel` fires first.
pub(crate) async fn sleep_or_cancel(
    duration: Duration,
    cancel: &CancellationToken,
) -> Result<(), FetchError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(FetchError::Cancelled),
        () = sleep(duration) => Ok(()),
    }
}
