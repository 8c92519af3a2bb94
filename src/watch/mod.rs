// src/watch/mod.rs

//! Input watching and change detection for `--watch` mode.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform filesystem watcher (`notify`) over the
//!   snapshot input files.
//! - Content hashing so that spurious watch events (touches that leave the
//!   bytes unchanged) don't trigger a rebuild.
//!
//! It does **not** know about the graph or the layout; it only turns
//! filesystem changes into rebuild triggers for the run loop.

pub mod snapshot;
pub mod watcher;

pub use snapshot::hash_inputs;
pub use watcher::{spawn_watcher, WatcherHandle};

/// Events sent into the run loop from the watcher or external signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    /// One of the input files was touched; re-hash and maybe rebuild.
    InputChanged,
    /// Ctrl-C (or equivalent) asked us to stop.
    ShutdownRequested,
}
