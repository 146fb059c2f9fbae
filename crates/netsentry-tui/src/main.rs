//! `netsentry`: live terminal dashboard for network traffic anomaly analysis.
//!
//! Built on [ratatui](https://ratatui.rs). A background poller fetches the
//! analytics backend's snapshot every few seconds (default every 5 s from
//! `http://localhost:8080/get-data`); the dashboard shows summary cards,
//! charts and the top source/destination IPs, labeled in English, Kannada
//! or Hindi.
//!
//! Logs are written to a file (default `/tmp/netsentry.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, config layering, tracing setup,
//! panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use netsentry_config::Config;
use netsentry_core::{Language, PollerConfig};

use crate::app::App;

/// Terminal dashboard for live network traffic anomaly analysis.
#[derive(Parser, Debug)]
#[command(name = "netsentry", version, about)]
struct Cli {
    /// Snapshot endpoint (e.g., http://localhost:8080/get-data)
    #[arg(short = 'e', long, env = "NETSENTRY_ENDPOINT")]
    endpoint: Option<String>,

    /// Alert endpoint (defaults to /alert on the endpoint's host)
    #[arg(long)]
    alert_endpoint: Option<String>,

    /// Milliseconds between the end of one poll and the start of the next
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Initial language: en, kn or hi
    #[arg(long)]
    lang: Option<Language>,

    /// Config file path (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file path (defaults to /tmp/netsentry.log)
    #[arg(long, default_value = "/tmp/netsentry.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr, that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "netsentry_tui={log_level},netsentry_core={log_level},netsentry_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("netsentry.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Layer CLI flags over the loaded config file.
fn apply_cli(mut cfg: Config, cli: &Cli) -> Config {
    if let Some(endpoint) = &cli.endpoint {
        cfg.endpoint.clone_from(endpoint);
    }
    if let Some(alert) = &cli.alert_endpoint {
        cfg.alert_endpoint = Some(alert.clone());
    }
    if let Some(ms) = cli.interval_ms {
        cfg.poll_interval_ms = ms;
    }
    if let Some(lang) = cli.lang {
        cfg.language = lang;
    }
    cfg
}

fn resolve_config(cli: &Cli) -> Result<(PollerConfig, Language)> {
    let file_cfg = match &cli.config {
        Some(path) => netsentry_config::load_config_from(path)
            .wrap_err_with(|| format!("loading {}", path.display()))?,
        None => netsentry_config::load_config_or_default(),
    };
    let cfg = apply_cli(file_cfg, cli);
    let poller = netsentry_config::to_poller_config(&cfg)?;
    Ok((poller, cfg.language))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let (poller_config, language) = resolve_config(&cli)?;

    info!(
        endpoint = %poller_config.endpoint,
        interval = ?poller_config.interval,
        timeout = ?poller_config.timeout,
        language = %language,
        "starting netsentry"
    );

    let mut app = App::new(poller_config, language);
    app.run().await?;

    Ok(())
}
