//! Configuration for the netsentry dashboard.
//!
//! A flat TOML file layered under `NETSENTRY_*` environment variables,
//! and translation to [`netsentry_core::PollerConfig`]. CLI flags are
//! applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use netsentry_core::{Language, PollerConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Snapshot endpoint (e.g., "http://localhost:8080/get-data").
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Alert endpoint. Defaults to `/alert` on the endpoint's host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_endpoint: Option<String>,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Initial UI language: "en", "kn" or "hi".
    #[serde(default)]
    pub language: Language,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            alert_endpoint: None,
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: default_timeout_secs(),
            language: Language::default(),
        }
    }
}

fn default_endpoint() -> String {
    netsentry_core::config::DEFAULT_ENDPOINT.into()
}
fn default_poll_interval_ms() -> u64 {
    u64::try_from(netsentry_core::config::DEFAULT_POLL_INTERVAL.as_millis()).unwrap_or(5000)
}
fn default_timeout_secs() -> u64 {
    10
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "netsentry", "netsentry").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netsentry");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from `path` + environment. A missing file is not an
/// error; defaults fill every key it doesn't set.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    // No `.split("_")`: keys like `poll_interval_ms` contain underscores.
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NETSENTRY_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config_or_default_from(&config_path())
}

/// Like [`load_config_from`], but a broken file or environment falls back
/// to defaults with a warning instead of failing startup.
pub fn load_config_or_default_from(path: &Path) -> Config {
    match load_config_from(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config unusable, using defaults");
            Config::default()
        }
    }
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

fn parse_url(field: &str, raw: &str) -> Result<url::Url, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Build a validated `PollerConfig` from the loaded file config.
pub fn to_poller_config(cfg: &Config) -> Result<PollerConfig, ConfigError> {
    let endpoint = parse_url("endpoint", &cfg.endpoint)?;
    let alert_endpoint = cfg
        .alert_endpoint
        .as_deref()
        .map(|raw| parse_url("alert_endpoint", raw))
        .transpose()?;

    let poller = PollerConfig {
        endpoint,
        alert_endpoint,
        interval: Duration::from_millis(cfg.poll_interval_ms),
        timeout: Duration::from_secs(cfg.timeout_secs),
    };

    poller.validate().map_err(|e| ConfigError::Validation {
        field: "poller".into(),
        reason: e.to_string(),
    })?;
    Ok(poller)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.endpoint, "http://localhost:8080/get-data");
        assert_eq!(cfg.poll_interval_ms, 5000);
        assert_eq!(cfg.language, Language::En);
    }

    #[test]
    fn file_overrides_defaults() {
        let file = write_toml(
            r#"
endpoint = "http://10.0.0.2:8080/get-data"
poll_interval_ms = 2000
language = "kn"
"#,
        );
        let cfg = load_config_from(file.path()).unwrap();
        assert_eq!(cfg.endpoint, "http://10.0.0.2:8080/get-data");
        assert_eq!(cfg.poll_interval_ms, 2000);
        assert_eq!(cfg.language, Language::Kn);
        // Untouched keys keep their defaults.
        assert_eq!(cfg.timeout_secs, 10);
        assert_eq!(cfg.alert_endpoint, None);
    }

    #[test]
    fn unknown_language_is_rejected() {
        let file = write_toml(r#"language = "fr""#);
        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
    }

    #[test]
    fn broken_file_falls_back_with_warning() {
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let file = write_toml("language = \"fr\"\npoll_interval_ms = 750\n");
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let cfg = tracing::subscriber::with_default(subscriber, || {
            load_config_or_default_from(file.path())
        });

        assert_eq!(cfg, Config::default());
        let logged = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("WARN"), "log: {logged}");
        assert!(logged.contains("config unusable"), "log: {logged}");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            alert_endpoint: Some("http://localhost:8080/alert".into()),
            language: Language::Hi,
            ..Config::default()
        };

        save_config_to(&cfg, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn default_translates_to_valid_poller_config() {
        let poller = to_poller_config(&Config::default()).unwrap();
        assert_eq!(poller.endpoint.as_str(), "http://localhost:8080/get-data");
        assert_eq!(poller.interval, Duration::from_millis(5000));
        assert_eq!(poller.timeout, Duration::from_secs(10));
        assert!(poller.alert_endpoint.is_none());
    }

    #[test]
    fn bad_endpoint_names_the_field() {
        let cfg = Config {
            endpoint: "not a url".into(),
            ..Config::default()
        };
        match to_poller_config(&cfg).unwrap_err() {
            ConfigError::Validation { field, .. } => assert_eq!(field, "endpoint"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn too_fast_interval_fails_validation() {
        let cfg = Config {
            poll_interval_ms: 10,
            ..Config::default()
        };
        assert!(matches!(
            to_poller_config(&cfg),
            Err(ConfigError::Validation { .. })
        ));
    }
}
