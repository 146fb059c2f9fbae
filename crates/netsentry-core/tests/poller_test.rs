#![allow(clippy::unwrap_used)]
// Poller cadence and failure handling, on tokio's paused clock.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use netsentry_core::{CoreError, Snapshot, SnapshotSource, spawn_poller};

const INTERVAL: Duration = Duration::from_millis(5000);

// ── Helpers ─────────────────────────────────────────────────────────

/// Plays back scripted results, then succeeds with empty snapshots.
#[derive(Default)]
struct ScriptedSource {
    calls: AtomicUsize,
    script: Mutex<VecDeque<Result<Snapshot, CoreError>>>,
    latency: Duration,
}

impl ScriptedSource {
    fn new(script: Vec<Result<Snapshot, CoreError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        })
    }

    fn slow(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            latency,
            ..Self::default()
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SnapshotSource for ScriptedSource {
    fn fetch(&self) -> impl Future<Output = Result<Snapshot, CoreError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Snapshot::default()));
        let latency = self.latency;
        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            next
        }
    }

    fn describe(&self) -> String {
        "scripted".into()
    }
}

fn stamped(ts: &str) -> Snapshot {
    Snapshot {
        analysis_timestamp: ts.into(),
        ..Snapshot::default()
    }
}

fn refused() -> CoreError {
    CoreError::FetchFailed {
        url: "http://localhost:8080/get-data".into(),
        reason: "connection refused".into(),
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

// ── Cadence ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn fetches_immediately_then_every_interval_until_cancelled() {
    let source = ScriptedSource::new(Vec::new());
    let cancel = CancellationToken::new();
    let handle = spawn_poller(Arc::clone(&source), INTERVAL, cancel.clone());

    settle().await;
    assert_eq!(source.calls(), 1, "first fetch happens on start");

    for expected in 2..=5 {
        tokio::time::sleep(INTERVAL).await;
        assert_eq!(source.calls(), expected);
    }

    handle.shutdown().await;
    tokio::time::sleep(INTERVAL * 4).await;
    assert_eq!(source.calls(), 5, "no fetches after cancellation");
}

#[tokio::test(start_paused = true)]
async fn nothing_fetched_between_ticks() {
    let source = ScriptedSource::new(Vec::new());
    let handle = spawn_poller(Arc::clone(&source), INTERVAL, CancellationToken::new());

    settle().await;
    tokio::time::sleep(INTERVAL - Duration::from_millis(10)).await;
    assert_eq!(source.calls(), 1);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn parent_token_cancellation_stops_polling() {
    let source = ScriptedSource::new(Vec::new());
    let parent = CancellationToken::new();
    let _handle = spawn_poller(Arc::clone(&source), INTERVAL, parent.child_token());

    settle().await;
    parent.cancel();
    tokio::time::sleep(INTERVAL * 3).await;
    assert_eq!(source.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_fetch_delays_next_poll() {
    let latency = Duration::from_millis(3000);
    let source = ScriptedSource::slow(latency);
    let handle = spawn_poller(Arc::clone(&source), INTERVAL, CancellationToken::new());

    // First fetch starts at t=0, completes at t=3000; the next starts at 8000.
    settle().await;
    tokio::time::sleep(Duration::from_millis(7000)).await;
    assert_eq!(source.calls(), 1);
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(source.calls(), 2);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_aborts_in_flight_fetch() {
    let source = ScriptedSource::slow(Duration::from_secs(60));
    let handle = spawn_poller(Arc::clone(&source), INTERVAL, CancellationToken::new());
    let snapshots = handle.snapshots();

    settle().await;
    handle.shutdown().await;

    assert_eq!(source.calls(), 1);
    assert!(snapshots.borrow().is_none());
}

#[tokio::test(start_paused = true)]
async fn refresh_trigger_fetches_early() {
    let source = ScriptedSource::new(Vec::new());
    let handle = spawn_poller(Arc::clone(&source), INTERVAL, CancellationToken::new());

    settle().await;
    handle.refresh_now();
    settle().await;
    assert_eq!(source.calls(), 2);

    // Cadence restarts from the manual fetch.
    tokio::time::sleep(INTERVAL).await;
    assert_eq!(source.calls(), 3);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn detached_trigger_wakes_poller() {
    let source = ScriptedSource::new(Vec::new());
    let handle = spawn_poller(Arc::clone(&source), INTERVAL, CancellationToken::new());
    let trigger = handle.refresh_trigger();

    settle().await;
    trigger.fire();
    settle().await;
    assert_eq!(source.calls(), 2);

    handle.shutdown().await;
}

// ── Failure handling ────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn failure_keeps_last_good_snapshot() {
    let source = ScriptedSource::new(vec![
        Ok(stamped("first")),
        Err(refused()),
        Err(refused()),
        Ok(stamped("second")),
    ]);
    let handle = spawn_poller(Arc::clone(&source), INTERVAL, CancellationToken::new());
    let status = handle.status();

    settle().await;
    assert_eq!(handle.latest().unwrap().analysis_timestamp, "first");
    assert!(status.borrow().has_data());
    assert!(!status.borrow().is_stale());

    tokio::time::sleep(INTERVAL).await;
    assert_eq!(handle.latest().unwrap().analysis_timestamp, "first");
    {
        let s = status.borrow();
        assert_eq!(s.consecutive_failures, 1);
        assert!(s.is_stale());
        assert!(s.last_error.as_deref().unwrap().contains("connection refused"));
    }

    tokio::time::sleep(INTERVAL).await;
    assert_eq!(status.borrow().consecutive_failures, 2);
    assert_eq!(handle.latest().unwrap().analysis_timestamp, "first");

    tokio::time::sleep(INTERVAL).await;
    assert_eq!(handle.latest().unwrap().analysis_timestamp, "second");
    {
        let s = status.borrow();
        assert_eq!(s.consecutive_failures, 0);
        assert_eq!(s.fetches, 4);
        assert!(s.last_error.is_none());
    }

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn failures_before_first_success_leave_no_snapshot() {
    let source = ScriptedSource::new(vec![Err(refused()), Err(refused())]);
    let handle = spawn_poller(Arc::clone(&source), INTERVAL, CancellationToken::new());
    let status = handle.status();

    settle().await;
    tokio::time::sleep(INTERVAL).await;

    assert!(handle.latest().is_none());
    assert!(!status.borrow().has_data());
    assert_eq!(status.borrow().consecutive_failures, 2);

    // The loop is still alive and picks up the next success.
    tokio::time::sleep(INTERVAL).await;
    assert!(handle.latest().is_some());

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn each_success_is_a_new_snapshot() {
    let source = ScriptedSource::new(vec![Ok(stamped("a")), Ok(stamped("a"))]);
    let handle = spawn_poller(Arc::clone(&source), INTERVAL, CancellationToken::new());

    settle().await;
    let first = handle.latest().unwrap();
    tokio::time::sleep(INTERVAL).await;
    let second = handle.latest().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);

    handle.shutdown().await;
}
