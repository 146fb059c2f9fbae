//! Polling and presentation logic between `netsentry-api` and the TUI.
//!
//! - **[`spawn_poller`]**: Cancellable repeating fetch of the backend
//!   snapshot. Publishes the latest good [`Snapshot`] and a [`PollStatus`]
//!   on `tokio::sync::watch` channels; failures are logged and never clear
//!   the last good snapshot.
//!
//! - **[`DashboardView`]**: Holds the latest snapshot and the selected
//!   [`Language`], and derives a [`ViewModel`]: summary cards, chart series,
//!   top-IP lists.
//!
//! - **Pure derivations** ([`format`], [`labels`]): dotted-quad IPs,
//!   two-decimal percentages, anomaly-type and protocol labels.
//!
//! - **[`SnapshotSource`]**: The seam the poller fetches through,
//!   implemented for [`AnalyticsClient`](netsentry_api::AnalyticsClient).

pub mod config;
pub mod error;
pub mod format;
pub mod labels;
pub mod locale;
pub mod poller;
pub mod source;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::PollerConfig;
pub use error::CoreError;
pub use labels::AnomalyType;
pub use locale::{Language, LabelTable};
pub use poller::{PollStatus, PollerHandle, RefreshTrigger, spawn_poller};
pub use source::SnapshotSource;
pub use view::{DashboardModel, DashboardView, ViewModel};

pub use netsentry_api::{AlertMessages, AnomalySummary, Snapshot};
