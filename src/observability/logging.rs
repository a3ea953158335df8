//! Structured logging initialization.
//!
//! # Responsibilities
//! - Install the global tracing subscriber when the host is built
//! - Default chain: fmt layer filtered by `RUST_LOG` (fallback `info`)
//! - File-driven chain: filter directives read from a TOML file and
//!   swappable at runtime through a reload handle

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Registry};

use crate::error::{HostError, HostResult};
use crate::observability::watcher;

/// Handle through which the watcher swaps the active filter.
pub(crate) type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Contents of the logging configuration file.
///
/// `filter` is a tracing directive string, e.g. `"info,tower_http=debug"`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub filter: String,
}

/// Keeps the logging file watcher alive for the host's lifetime.
///
/// Dropping the guard stops watching; the last applied filter stays active.
#[derive(Debug)]
pub struct LoggingGuard {
    _watcher: Option<notify::RecommendedWatcher>,
}

/// Initialize logging for a host.
///
/// With no path the default provider chain is installed; with a path the
/// file is parsed, its filter installed behind a reload layer, and a watcher
/// started so later edits take effect without a restart. The file-driven
/// chain must actually become the subscriber: if another one is already
/// installed the file's directives could never take effect, so that is a
/// configuration error rather than a silent fallback.
pub fn init(config_path: Option<&Path>) -> HostResult<LoggingGuard> {
    match config_path {
        None => {
            init_default();
            Ok(LoggingGuard { _watcher: None })
        }
        Some(path) => init_from_file(path),
    }
}

fn init_default() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Another subscriber may already be installed (embedding application,
    // test harness); that chain then stays in charge.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

fn init_from_file(path: &Path) -> HostResult<LoggingGuard> {
    let settings = load_settings(path)?;
    let filter = parse_filter(&settings)?;

    let (filter_layer, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| {
            HostError::Configuration(format!(
                "cannot install file-driven logging from {}: {e}",
                path.display()
            ))
        })?;

    let watcher = watcher::spawn(path.to_path_buf(), handle)?;

    tracing::info!(path = %path.display(), "File-driven logging configuration installed");
    Ok(LoggingGuard {
        _watcher: Some(watcher),
    })
}

/// Read and parse the logging configuration file.
pub(crate) fn load_settings(path: &Path) -> HostResult<LoggingSettings> {
    let content = fs::read_to_string(path).map_err(|e| {
        HostError::Configuration(format!(
            "failed to read logging configuration {}: {e}",
            path.display()
        ))
    })?;
    toml::from_str(&content).map_err(|e| {
        HostError::Configuration(format!(
            "failed to parse logging configuration {}: {e}",
            path.display()
        ))
    })
}

/// Build an `EnvFilter` from parsed settings.
pub(crate) fn parse_filter(settings: &LoggingSettings) -> HostResult<EnvFilter> {
    EnvFilter::try_new(&settings.filter).map_err(|e| {
        HostError::Configuration(format!("invalid filter directives {:?}: {e}", settings.filter))
    })
}
