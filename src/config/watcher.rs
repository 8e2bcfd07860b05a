//! Re-analysis on configuration change.
//!
//! # Responsibilities
//! - Watch the route tree file for writes
//! - Reload and validate it, handing accepted configs to the CLI loop
//!
//! # Design Decisions
//! - A config that fails to load is logged and skipped; the last good tree
//!   stays in use
//! - Runs on notify's own thread and reports through a std channel

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::load_config;
use crate::config::schema::PanelConfig;

/// Watches one configuration file and publishes every valid reload.
pub struct ConfigWatcher {
    path: PathBuf,
    updates: mpsc::Sender<PanelConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for reloaded configs.
    pub fn new(path: &Path) -> (Self, mpsc::Receiver<PanelConfig>) {
        let (updates, rx) = mpsc::channel();
        let watcher = Self {
            path: path.to_path_buf(),
            updates,
        };
        (watcher, rx)
    }

    /// Start watching. Updates flow while the returned handle is alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, updates } = self;
        let reload_path = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |event: notify::Result<Event>| on_event(event, &reload_path, &updates),
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %path.display(), "Watching configuration");
        Ok(watcher)
    }
}

fn on_event(event: notify::Result<Event>, path: &Path, updates: &mpsc::Sender<PanelConfig>) {
    let event = match event {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Configuration watch failed");
            return;
        }
    };
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return;
    }

    match load_config(path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "Configuration reloaded");
            if updates.send(config).is_err() {
                tracing::warn!(path = %path.display(), "Reloaded configuration has no listener");
            }
        }
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Reload rejected, keeping current configuration"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use std::time::Instant;

    use notify::event::{AccessKind, EventKind, ModifyKind};

    fn temp_config(name: &str, log_level: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "routing-panel-{}-{}.toml",
            name,
            std::process::id()
        ));
        write_config(&path, log_level);
        path
    }

    fn write_config(path: &Path, log_level: &str) {
        fs::write(path, format!("[observability]\nlog_level = \"{}\"\n", log_level)).unwrap();
    }

    fn modified() -> notify::Result<Event> {
        Ok(Event::new(EventKind::Modify(ModifyKind::Any)))
    }

    #[test]
    fn test_modify_event_publishes_config() {
        let path = temp_config("modify", "debug");
        let (tx, rx) = mpsc::channel();

        on_event(modified(), &path, &tx);
        fs::remove_file(&path).unwrap();

        assert_eq!(rx.try_recv().unwrap().observability.log_level, "debug");
    }

    #[test]
    fn test_invalid_reload_is_skipped() {
        let path = temp_config("invalid", "loud");
        let (tx, rx) = mpsc::channel();

        on_event(modified(), &path, &tx);
        fs::remove_file(&path).unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_other_events_are_ignored() {
        let path = temp_config("access", "debug");
        let (tx, rx) = mpsc::channel();

        on_event(Ok(Event::new(EventKind::Access(AccessKind::Any))), &path, &tx);
        on_event(Err(notify::Error::generic("gone")), &path, &tx);
        fs::remove_file(&path).unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_channel_does_not_panic() {
        let path = temp_config("closed", "debug");
        let (tx, rx) = mpsc::channel();
        drop(rx);

        on_event(modified(), &path, &tx);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_rewrite_is_picked_up() {
        let path = temp_config("watch", "info");
        let (watcher, updates) = ConfigWatcher::new(&path);
        let _handle = watcher.run().unwrap();

        thread::sleep(Duration::from_millis(100));
        write_config(&path, "trace");

        // A truncating write may surface a partial file first; wait for the
        // final content.
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut reloaded = None;
        while let Some(left) = deadline.checked_duration_since(Instant::now()) {
            match updates.recv_timeout(left) {
                Ok(config) if config.observability.log_level == "trace" => {
                    reloaded = Some(config);
                    break;
                }
                Ok(_) => continue,
                Err(_) => break,
            }
        }
        fs::remove_file(&path).unwrap();

        assert!(reloaded.is_some(), "no reload observed within 10s");
    }
}
