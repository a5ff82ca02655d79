//! File watcher for the catalog file.
//!
//! The pipeline rewrites `apps.json` in place (or via rename), so the parent
//! directory is watched and events are filtered down to the catalog path.

use anyhow::{Context, Result};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::time::Duration;

/// Watches a single catalog file for changes
pub struct CatalogWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    path: PathBuf,
}

impl CatalogWatcher {
    pub fn new(path: &Path) -> Result<Self> {
        let path = path.to_path_buf();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(Duration::from_secs(1)),
        )?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;

        tracing::debug!("watching {} for catalog changes", path.display());

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            path,
        })
    }

    /// Drain pending events. Returns true if any of them touched the catalog.
    ///
    /// Bursts of events (truncate + write + close) collapse into one reload.
    pub fn poll(&self) -> bool {
        let mut changed = false;

        loop {
            match self.receiver.try_recv() {
                Ok(Ok(event)) => {
                    if event_touches(&event, &self.path) {
                        changed = true;
                    }
                }
                Ok(Err(e)) => tracing::debug!("catalog watcher error: {}", e),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        changed
    }
}

fn event_touches(event: &Event, path: &Path) -> bool {
    if event.kind.is_access() {
        return false;
    }
    let file_name = path.file_name();
    event
        .paths
        .iter()
        .any(|p| p == path || (file_name.is_some() && p.file_name() == file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, EventKind};

    #[test]
    fn test_event_for_other_file_is_ignored() {
        let event = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/data/other.json"));
        assert!(!event_touches(&event, Path::new("/data/apps.json")));
    }

    #[test]
    fn test_event_for_catalog_is_detected() {
        let event = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/data/apps.json"));
        assert!(event_touches(&event, Path::new("/data/apps.json")));
    }

    #[test]
    fn test_access_event_is_ignored() {
        let event = Event::new(EventKind::Access(AccessKind::Any))
            .add_path(PathBuf::from("/data/apps.json"));
        assert!(!event_touches(&event, Path::new("/data/apps.json")));
    }
}
