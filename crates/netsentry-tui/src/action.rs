//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use netsentry_core::{AlertMessages, Language, PollStatus, Snapshot};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Data from the poller ──
    /// A newer snapshot replaced the previous one.
    SnapshotUpdated(Arc<Snapshot>),
    PollStatusChanged(PollStatus),
    AlertsLoaded(Arc<AlertMessages>),

    // ── User intents ──
    SetLanguage(Language),
    RefreshNow,
    ToggleHelp,
    Notify(Notification),
}
