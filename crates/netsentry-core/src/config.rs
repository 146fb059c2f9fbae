// ── Runtime poll configuration ──
//
// Describes *what* to poll and how often. Built by the TUI from the config
// file and CLI flags; core never reads config files itself.

use std::time::Duration;

use url::Url;

use crate::error::CoreError;

/// Default snapshot endpoint of a locally running backend.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/get-data";

/// Default gap between the end of one fetch and the start of the next.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Shortest interval accepted; anything faster just hammers the backend.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Configuration for a [`spawn_poller`](crate::poller::spawn_poller) run.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Snapshot endpoint (`GET`, JSON body).
    pub endpoint: Url,
    /// Alert endpoint; `None` means `/alert` on the endpoint's origin.
    pub alert_endpoint: Option<Url>,
    /// Delay between a fetch completing and the next one starting.
    pub interval: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            alert_endpoint: None,
            interval: DEFAULT_POLL_INTERVAL,
            timeout: netsentry_api::transport::DEFAULT_TIMEOUT,
        }
    }
}

impl PollerConfig {
    /// Check invariants that the type system can't.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !matches!(self.endpoint.scheme(), "http" | "https") {
            return Err(CoreError::InvalidConfig {
                message: format!("endpoint must be http(s), got '{}'", self.endpoint),
            });
        }
        if self.interval < MIN_POLL_INTERVAL {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "poll interval {}ms is below the {}ms minimum",
                    self.interval.as_millis(),
                    MIN_POLL_INTERVAL.as_millis()
                ),
            });
        }
        if self.timeout.is_zero() {
            return Err(CoreError::InvalidConfig {
                message: "request timeout must be non-zero".into(),
            });
        }
        Ok(())
    }

    /// Build the HTTP client this config describes.
    pub fn build_client(&self) -> Result<netsentry_api::AnalyticsClient, CoreError> {
        let transport = netsentry_api::TransportConfig::default().with_timeout(self.timeout);
        let client = netsentry_api::AnalyticsClient::new(self.endpoint.clone(), &transport)?;
        Ok(match &self.alert_endpoint {
            Some(url) => client.with_alert_url(url.clone()),
            None => client,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = PollerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(cfg.interval, Duration::from_secs(5));
    }

    #[test]
    fn rejects_fast_interval() {
        let cfg = PollerConfig {
            interval: Duration::from_millis(10),
            ..PollerConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(CoreError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let cfg = PollerConfig {
            endpoint: Url::parse("ftp://example.com/get-data").unwrap(),
            ..PollerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn client_uses_alert_override() {
        let alert = Url::parse("http://10.0.0.5:9000/alerts").unwrap();
        let cfg = PollerConfig {
            alert_endpoint: Some(alert.clone()),
            ..PollerConfig::default()
        };
        let client = cfg.build_client().unwrap();
        assert_eq!(client.alert_url(), &alert);
        assert_eq!(client.data_url().as_str(), DEFAULT_ENDPOINT);
    }
}
