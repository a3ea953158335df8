//! Logging configuration file watcher for hot reload.

use std::path::PathBuf;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{HostError, HostResult};
use crate::observability::logging::{self, FilterHandle};

/// Start watching the logging configuration file in a background thread.
///
/// Each modify/create event re-parses the file and swaps the active filter
/// through the reload handle. A file that fails to parse keeps the current
/// filter.
pub(crate) fn spawn(path: PathBuf, handle: FilterHandle) -> HostResult<RecommendedWatcher> {
    let watched = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if event.kind.is_modify() || event.kind.is_create() {
                    tracing::info!("Logging configuration change detected, reloading...");
                    match logging::load_settings(&path).and_then(|s| logging::parse_filter(&s)) {
                        Ok(filter) => {
                            if let Err(e) = handle.reload(filter) {
                                tracing::error!("Failed to apply new filter: {}", e);
                            }
                        }
                        Err(e) => {
                            tracing::error!(
                                "Failed to reload logging configuration: {}. Keeping current filter.",
                                e
                            );
                        }
                    }
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    )
    .map_err(|e| HostError::Configuration(format!("failed to create file watcher: {e}")))?;

    watcher
        .watch(&watched, RecursiveMode::NonRecursive)
        .map_err(|e| {
            HostError::Configuration(format!("failed to watch {}: {e}", watched.display()))
        })?;

    tracing::info!(path = %watched.display(), "Logging configuration watcher started");
    Ok(watcher)
}
