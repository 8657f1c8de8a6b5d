//! Routing file watcher.
//!
//! Each write to the watched file triggers [`reload`]; a file that fails to
//! load or validate leaves the live routing state as it was.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::apply_settings;
use crate::config::loader::{load_settings, ConfigError};
use crate::routing::RoutingConfig;

/// Load `path` and apply it to `config`.
pub fn reload(path: &Path, config: &RoutingConfig) -> Result<(), ConfigError> {
    let settings = load_settings(path)?;
    apply_settings(config, &settings);
    Ok(())
}

fn is_content_change(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(_) | EventKind::Create(_))
}

/// Keeps a live [`RoutingConfig`] in sync with a routing file.
pub struct ConfigWatcher {
    path: PathBuf,
    config: RoutingConfig,
}

impl ConfigWatcher {
    pub fn new(path: &Path, config: RoutingConfig) -> Self {
        Self {
            path: path.to_path_buf(),
            config,
        }
    }

    /// Start watching in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, config } = self;
        let watched = path.clone();

        let on_event = move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "Routing file watch error");
                    return;
                }
            };
            if !is_content_change(&event.kind) {
                return;
            }

            match reload(&watched, &config) {
                Ok(()) => tracing::info!(path = ?watched, "Routing file reloaded"),
                Err(e) => tracing::error!(path = ?watched, error = %e, "Routing file rejected, previous routes kept"),
            }
        };

        let mut watcher = RecommendedWatcher::new(on_event, Config::default().with_poll_interval(Duration::from_secs(2)))?;
        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Watching routing file");
        Ok(watcher)
    }
}
