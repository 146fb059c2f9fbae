//! Where snapshots come from.

use std::future::Future;

use netsentry_api::{AlertMessages, AnalyticsClient, Snapshot};

use crate::error::CoreError;

/// Anything the poller can pull a [`Snapshot`] from.
///
/// Implemented for [`AnalyticsClient`]; tests substitute scripted sources.
pub trait SnapshotSource: Send + Sync + 'static {
    /// Fetch one snapshot.
    fn fetch(&self) -> impl Future<Output = Result<Snapshot, CoreError>> + Send;

    /// Fetch localized alert text. Sources without alerts return an empty set.
    fn alerts(&self) -> impl Future<Output = Result<AlertMessages, CoreError>> + Send {
        async { Ok(AlertMessages::default()) }
    }

    /// Human-readable origin, for log lines.
    fn describe(&self) -> String;
}

impl SnapshotSource for AnalyticsClient {
    async fn fetch(&self) -> Result<Snapshot, CoreError> {
        Ok(self.snapshot().await?)
    }

    async fn alerts(&self) -> Result<AlertMessages, CoreError> {
        Ok(AnalyticsClient::alerts(self).await?)
    }

    fn describe(&self) -> String {
        self.data_url().to_string()
    }
}
