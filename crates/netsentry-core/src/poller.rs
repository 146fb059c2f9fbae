// ── Snapshot poller ──
//
// A cancellable repeating fetch. One request is in flight at a time: the
// next fetch starts `interval` after the previous one *completes*, so slow
// responses stretch the cadence instead of stacking requests.
//
// Results are published on two `watch` channels. The snapshot channel only
// ever moves forward to a newer successful payload; failures touch the
// status channel alone, leaving the last good snapshot in place.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use netsentry_api::Snapshot;

use crate::error::CoreError;
use crate::source::SnapshotSource;

/// Health of the polling loop, observable by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollStatus {
    /// Fetch attempts so far, successful or not.
    pub fetches: u64,
    /// Failures since the last success. Zero while healthy.
    pub consecutive_failures: u32,
    pub last_attempt: Option<DateTime<Utc>>,
    pub last_success: Option<DateTime<Utc>>,
    /// Display form of the most recent failure; cleared on success.
    pub last_error: Option<String>,
}

impl PollStatus {
    /// `true` once at least one snapshot has arrived.
    pub fn has_data(&self) -> bool {
        self.last_success.is_some()
    }

    /// `true` when the shown data is older than the latest attempt.
    pub fn is_stale(&self) -> bool {
        self.consecutive_failures > 0
    }

    fn record_success(&mut self, at: DateTime<Utc>) {
        self.fetches += 1;
        self.consecutive_failures = 0;
        self.last_attempt = Some(at);
        self.last_success = Some(at);
        self.last_error = None;
    }

    fn record_failure(&mut self, at: DateTime<Utc>, err: &CoreError) {
        self.fetches += 1;
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.last_attempt = Some(at);
        self.last_error = Some(err.to_string());
    }
}

/// Wakes a running poller for an immediate fetch.
#[derive(Debug, Clone)]
pub struct RefreshTrigger(Arc<Notify>);

impl RefreshTrigger {
    /// Request a fetch now. If a fetch is already running, the next one
    /// starts as soon as it completes.
    pub fn fire(&self) {
        self.0.notify_one();
    }
}

/// Owner-side handle to a spawned poller.
pub struct PollerHandle {
    snapshot: watch::Receiver<Option<Arc<Snapshot>>>,
    status: watch::Receiver<PollStatus>,
    refresh: RefreshTrigger,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Subscribe to snapshot replacements. `None` until the first success.
    pub fn snapshots(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.snapshot.clone()
    }

    /// Subscribe to poll health changes.
    pub fn status(&self) -> watch::Receiver<PollStatus> {
        self.status.clone()
    }

    /// The most recent successful snapshot, if any.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.borrow().clone()
    }

    /// Fetch immediately instead of waiting out the interval.
    pub fn refresh_now(&self) {
        self.refresh.fire();
    }

    pub fn refresh_trigger(&self) -> RefreshTrigger {
        self.refresh.clone()
    }

    /// Stop polling and wait for the task to exit. An in-flight request is
    /// dropped rather than awaited.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "poller task ended abnormally");
        }
    }
}

/// Spawn the poll loop on the current tokio runtime.
///
/// Fetches immediately, then once per `interval` after each completion,
/// until `cancel` fires.
pub fn spawn_poller<S: SnapshotSource>(
    source: Arc<S>,
    interval: Duration,
    cancel: CancellationToken,
) -> PollerHandle {
    let (snapshot_tx, snapshot) = watch::channel(None);
    let (status_tx, status) = watch::channel(PollStatus::default());
    let notify = Arc::new(Notify::new());

    let task = tokio::spawn(poll_task(
        source,
        interval,
        snapshot_tx,
        status_tx,
        Arc::clone(&notify),
        cancel.clone(),
    ));

    PollerHandle {
        snapshot,
        status,
        refresh: RefreshTrigger(notify),
        cancel,
        task,
    }
}

async fn poll_task<S: SnapshotSource>(
    source: Arc<S>,
    interval: Duration,
    snapshot_tx: watch::Sender<Option<Arc<Snapshot>>>,
    status_tx: watch::Sender<PollStatus>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
) {
    let origin = source.describe();
    info!(source = %origin, interval = ?interval, "poller started");

    loop {
        if cancel.is_cancelled() {
            break;
        }

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            res = source.fetch() => res,
        };

        let now = Utc::now();
        match outcome {
            Ok(snapshot) => {
                debug!(
                    packets = snapshot.anomaly_summary.total_packets,
                    anomalies = snapshot.anomaly_summary.total_anomalies,
                    "snapshot received"
                );
                snapshot_tx.send_replace(Some(Arc::new(snapshot)));
                status_tx.send_modify(|s| s.record_success(now));
            }
            Err(e) => {
                warn!(source = %origin, error = %e, transient = e.is_transient(), "poll failed");
                status_tx.send_modify(|s| s.record_failure(now, &e));
            }
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = refresh.notified() => debug!("manual refresh requested"),
            () = tokio::time::sleep(interval) => {}
        }
    }

    debug!(source = %origin, "poller shut down");
}
