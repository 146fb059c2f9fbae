// Analytics backend HTTP client
//
// Wraps `reqwest::Client` with endpoint URLs, status handling and
// body decoding. The backend exposes two read-only endpoints, one for the
// traffic snapshot and one for localized alert text.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::model::{AlertMessages, ErrorBody, Snapshot};
use crate::transport::TransportConfig;

/// Path of the alert endpoint relative to the backend origin.
const ALERT_PATH: &str = "/alert";

/// Raw HTTP client for the traffic-analysis backend.
///
/// Cheap to clone; the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    http: reqwest::Client,
    data_url: Url,
    alert_url: Url,
    timeout_secs: u64,
}

impl AnalyticsClient {
    /// Create a client for the snapshot endpoint at `data_url`.
    ///
    /// The alert endpoint defaults to `/alert` on the same origin; override
    /// it with [`with_alert_url`](Self::with_alert_url).
    pub fn new(data_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let mut client = Self::with_client(http, data_url)?;
        // Round sub-second timeouts up so error messages never read "0s".
        client.timeout_secs =
            transport.timeout.as_secs() + u64::from(transport.timeout.subsec_nanos() > 0);
        Ok(client)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, data_url: Url) -> Result<Self, Error> {
        let alert_url = data_url.join(ALERT_PATH)?;
        Ok(Self {
            http,
            data_url,
            alert_url,
            timeout_secs: crate::transport::DEFAULT_TIMEOUT.as_secs(),
        })
    }

    /// Use a non-default alert endpoint.
    pub fn with_alert_url(mut self, alert_url: Url) -> Self {
        self.alert_url = alert_url;
        self
    }

    /// The snapshot endpoint.
    pub fn data_url(&self) -> &Url {
        &self.data_url
    }

    /// The alert endpoint.
    pub fn alert_url(&self) -> &Url {
        &self.alert_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /get-data`: the current traffic and anomaly snapshot.
    pub async fn snapshot(&self) -> Result<Snapshot, Error> {
        self.get_json(self.data_url.clone()).await
    }

    /// `GET /alert`: alert sentence per language code.
    pub async fn alerts(&self) -> Result<AlertMessages, Error> {
        self.get_json(self.alert_url.clone()).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        // The timeout covers the whole exchange, body included.
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        trace!(status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_owned()
                });
            return Err(Error::Server {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(e)
        }
    }
}
