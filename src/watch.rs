use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Creates a watcher for the task file and returns a receiver for change
/// events. The watcher must be kept alive for events to be received.
/// This is the cross-session signal: another process writing the same file
/// shows up here and the caller reloads.
pub fn watch_store(path: &Path) -> Result<(RecommendedWatcher, Receiver<()>)> {
    let (tx, rx) = mpsc::channel();
    let file_name = path.file_name().map(|n| n.to_os_string());

    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        let Ok(event) = res else {
            return;
        };
        // Other files share the directory (log file, temp files); only the
        // task file itself is the signal.
        let matches = file_name.as_ref().map_or(true, |name| {
            event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(name.as_os_str()))
        });
        if matches {
            // Ignore send errors (receiver dropped)
            let _ = tx.send(());
        }
    })
    .context("failed to create file watcher")?;

    // Watch the parent directory since writes land via temp file + rename
    let watch_path = path.parent().unwrap_or(path);
    watcher
        .watch(watch_path, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", watch_path.display()))?;

    Ok((watcher, rx))
}

/// Waits for a change event with timeout. Returns true if one arrived.
pub fn wait_for_change(rx: &Receiver<()>, timeout: Duration) -> bool {
    rx.recv_timeout(timeout).is_ok()
}

/// Drains any pending events from the receiver.
pub fn drain_events(rx: &Receiver<()>) {
    while rx.try_recv().is_ok() {}
}
