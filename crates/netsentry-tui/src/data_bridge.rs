//! Data bridge: connects the poller's watch channels to TUI actions.
//!
//! Runs as a background task: forwards every snapshot replacement and
//! poll-status change as an [`Action`] through the TUI's action channel,
//! while a side task loads the alert messages. Owns the poller and shuts
//! it down on cancellation.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use netsentry_core::{PollStatus, PollerHandle, SnapshotSource};

use crate::action::{Action, Notification};

pub async fn spawn_data_bridge<S: SnapshotSource>(
    source: Arc<S>,
    poller: PollerHandle,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut snapshots = poller.snapshots();
    let mut status = poller.status();

    let alerts = tokio::spawn(load_alerts(
        source,
        poller.status(),
        action_tx.clone(),
        cancel.clone(),
    ));

    let mut was_stale = false;

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = snapshots.changed() => {
                let latest = snapshots.borrow_and_update().clone();
                if let Some(snapshot) = latest {
                    debug!("dispatching SnapshotUpdated");
                    let _ = action_tx.send(Action::SnapshotUpdated(snapshot));
                }
            }

            Ok(()) = status.changed() => {
                let current = status.borrow_and_update().clone();

                // Toast once when live data goes stale, not on every retry.
                let stale = current.has_data() && current.is_stale();
                if stale && !was_stale {
                    let reason = current.last_error.clone().unwrap_or_default();
                    let _ = action_tx.send(Action::Notify(Notification::warning(format!(
                        "Update failed, showing last data: {reason}"
                    ))));
                }
                was_stale = stale;

                let _ = action_tx.send(Action::PollStatusChanged(current));
            }
        }
    }

    poller.shutdown().await;
    join_logged(alerts, "alert loader").await;
    debug!("data bridge stopped");
}

/// Wait for a background task, logging a panic or abort instead of
/// propagating it. Returns `true` when the task finished normally.
pub async fn join_logged(task: JoinHandle<()>, name: &str) -> bool {
    match task.await {
        Ok(()) => true,
        Err(e) => {
            warn!(task = name, error = %e, "background task ended abnormally");
            false
        }
    }
}

/// Fetch alert text until it arrives. After a failure the next attempt
/// waits for a successful poll, so a backend that was down at startup
/// still gets its banner once it comes up.
async fn load_alerts<S: SnapshotSource>(
    source: Arc<S>,
    mut status: watch::Receiver<PollStatus>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    loop {
        let seen = status.borrow_and_update().fetches;

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            res = source.alerts() => res,
        };
        match result {
            Ok(messages) if messages.is_empty() => {
                debug!("backend sent no alert messages");
                return;
            }
            Ok(messages) => {
                debug!(languages = messages.0.len(), "alert messages loaded");
                let _ = action_tx.send(Action::AlertsLoaded(Arc::new(messages)));
                return;
            }
            Err(e) => debug!(error = %e, "alert messages unavailable, retrying after next poll"),
        }

        // A success that landed during the failed attempt counts.
        let healthy_since = |s: &PollStatus| s.fetches > seen && s.consecutive_failures == 0;
        let ready = tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            ok = async { status.wait_for(healthy_since).await.is_ok() } => ok,
        };
        if !ready {
            // Poller gone; nothing left to retry against.
            return;
        }
    }
}
