// src/records/mod.rs

//! Raw input snapshots from the query/execution collaborators.
//!
//! Responsibilities:
//! - Define the record-shaped data model (`model.rs`): asset records,
//!   dependency references, step execution metadata.
//! - Load JSON snapshots from disk for the CLI (`loader.rs`).
//!
//! Everything here is input-side; nothing in this module knows about the
//! graph, layout or status derivations built on top of it.

pub mod loader;
pub mod model;

pub use loader::{load_records, load_steps};
pub use model::{key_path, AssetRecord, DependencyRef, ExecutionState, StepMetadata};
