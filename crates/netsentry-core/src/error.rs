// ── Core error types ──
//
// User-facing errors from netsentry-core. Consumers never see reqwest or
// serde_json errors directly; the `From<netsentry_api::Error>` impl
// translates transport-layer failures into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot reach analytics backend at {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("Analytics backend timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Analytics backend returned HTTP {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Analytics backend sent an unreadable payload: {message}")]
    InvalidPayload { message: String },

    #[error("Unknown language '{code}' (expected one of: en, kn, hi)")]
    UnknownLanguage { code: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CoreError {
    /// Whether the next poll has a reasonable chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::FetchFailed { .. } | Self::Timeout { .. } => true,
            Self::Backend { status, .. } => *status >= 500,
            Self::InvalidPayload { .. }
            | Self::UnknownLanguage { .. }
            | Self::InvalidConfig { .. } => false,
        }
    }
}

impl From<netsentry_api::Error> for CoreError {
    fn from(err: netsentry_api::Error) -> Self {
        match err {
            netsentry_api::Error::Transport(e) => Self::FetchFailed {
                url: e
                    .url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string),
                reason: e.to_string(),
            },
            netsentry_api::Error::InvalidUrl(e) => Self::InvalidConfig {
                message: format!("invalid endpoint URL: {e}"),
            },
            netsentry_api::Error::Timeout { timeout_secs } => Self::Timeout { timeout_secs },
            netsentry_api::Error::Server { status, message } => Self::Backend { status, message },
            netsentry_api::Error::Deserialization { message, .. } => {
                Self::InvalidPayload { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient_client_errors_are_not() {
        let server: CoreError = netsentry_api::Error::Server {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert!(server.is_transient());
        assert!(matches!(server, CoreError::Backend { status: 500, .. }));

        let client = CoreError::Backend {
            status: 404,
            message: "Not Found".into(),
        };
        assert!(!client.is_transient());
    }

    #[test]
    fn payload_errors_keep_message() {
        let err: CoreError = netsentry_api::Error::Deserialization {
            message: "expected value at line 1".into(),
            body: "<html>".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Analytics backend sent an unreadable payload: expected value at line 1"
        );
        assert!(!err.is_transient());
    }
}
