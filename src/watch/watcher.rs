// src/watch/watcher.rs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::watch::WatchEvent;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive
/// for as long as needed. Dropping this handle stops file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher over the given input files and send
/// [`WatchEvent::InputChanged`] whenever one of them is touched.
///
/// We watch each input's parent directory rather than the file itself:
/// editors and atomic writers replace files by rename, which unregisters a
/// direct file watch on most platforms.
pub fn spawn_watcher(
    inputs: &[PathBuf],
    event_tx: mpsc::Sender<WatchEvent>,
) -> Result<WatcherHandle> {
    let inputs: Vec<PathBuf> = inputs
        .iter()
        .map(|p| p.canonicalize().unwrap_or_else(|_| p.clone())) // best-effort
        .collect();

    let dirs: BTreeSet<PathBuf> = inputs.iter().map(|p| parent_dir(p)).collect();

    // Channel from the blocking notify callback into the async world.
    let (raw_tx, mut raw_rx) = tokio::sync::mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    if let Err(err) = raw_tx.send(event) {
                        // We can't log via tracing here easily, so fall back to stderr.
                        eprintln!("assetdag: failed to forward notify event: {err}");
                    }
                }
                Err(err) => {
                    eprintln!("assetdag: file watch error: {err}");
                }
            }
        },
        Config::default(),
    )?;

    for dir in dirs.iter() {
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
    }

    info!("file watcher started on {} input file(s)", inputs.len());

    // Async task that filters notify events down to our input files.
    tokio::spawn(async move {
        while let Some(event) = raw_rx.recv().await {
            debug!("received notify event: {:?}", event);

            let touches_input = event.paths.iter().any(|path| {
                let path = path.canonicalize().unwrap_or_else(|_| path.clone());
                inputs.iter().any(|input| *input == path)
            });

            if !touches_input {
                continue;
            }

            if let Err(err) = event_tx.send(WatchEvent::InputChanged).await {
                warn!("failed to send WatchEvent::InputChanged: {err}");
                // If the run loop is gone, there's no point keeping the
                // watcher loop alive.
                return;
            }
        }

        debug!("file watcher loop ended");
    });

    Ok(WatcherHandle { _inner: watcher })
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
