//! Debounced estimation for input that changes on every keystroke.
//!
//! Each submission cancels whatever is still pending (the quiet-period timer or
//! an in-flight estimate) and schedules a fresh one. Results carry the sequence
//! number of the submission that produced them and only ever replace an older
//! result, so a slow early request cannot overwrite a later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::entities::trip::TripEstimate;
use crate::estimation::{EstimationService, TripQuery};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, PartialEq)]
pub struct LiveEstimate {
    pub seq: u64,
    pub departure: Option<NaiveDateTime>,
    pub estimate: TripEstimate,
}

/// State of the live slot as of submission `seq`. `estimate` is `None` before
/// the first result and after the input was cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveSnapshot {
    pub seq: u64,
    pub estimate: Option<LiveEstimate>,
}

pub struct LiveEstimator {
    service: Arc<EstimationService>,
    quiet_period: Duration,
    next_seq: AtomicU64,
    pending: Mutex<Option<JoinHandle<()>>>,
    latest: Arc<watch::Sender<LiveSnapshot>>,
}

impl LiveEstimator {
    pub fn new(service: Arc<EstimationService>, quiet_period: Duration) -> Self {
        let (tx, _rx) = watch::channel(LiveSnapshot::default());
        Self {
            service,
            quiet_period,
            next_seq: AtomicU64::new(0),
            pending: Mutex::new(None),
            latest: Arc::new(tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LiveSnapshot> {
        self.latest.subscribe()
    }

    pub fn latest(&self) -> Option<LiveEstimate> {
        self.latest.borrow().estimate.clone()
    }

    /// Record new input and (re)schedule an estimate for it. Must be called from
    /// within a tokio runtime. Returns the sequence number of this submission.
    pub fn submit(&self, mut query: TripQuery) -> u64 {
        // seq is taken under the lock so numbering follows scheduling order
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        query.pickup = query.pickup.trim().to_string();
        query.destination = query.destination.trim().to_string();
        if query.pickup.is_empty() || query.destination.is_empty() {
            tracing::trace!(seq, "Incomplete input, clearing live estimate");
            publish(&self.latest, seq, None);
            return seq;
        }

        let service = Arc::clone(&self.service);
        let latest = Arc::clone(&self.latest);
        let quiet_period = self.quiet_period;

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let estimate = service.estimate(&query).await;
            let departure = query.departure;
            publish(&latest, seq, Some(LiveEstimate { seq, departure, estimate }));
        }));

        seq
    }
}

impl Drop for LiveEstimator {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

/// Store the result of submission `seq` unless the slot already holds the
/// same or a later submission
fn publish(
    slot: &watch::Sender<LiveSnapshot>,
    seq: u64,
    estimate: Option<LiveEstimate>,
) -> bool {
    slot.send_if_modified(|current| {
        if current.seq >= seq {
            tracing::debug!(stale = seq, current = current.seq, "Dropping stale estimate");
            return false;
        }
        match &estimate {
            Some(live) => tracing::debug!(seq, kms = live.estimate.kms, "Publishing estimate"),
            None => tracing::debug!(seq, "Cleared estimate"),
        }
        *current = LiveSnapshot { seq, estimate };
        true
    })
}
