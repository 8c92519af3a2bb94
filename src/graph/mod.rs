// src/graph/mod.rs

//! Asset graph construction and queries.
//!
//! - [`model`] holds the immutable graph snapshot ([`GraphData`]).
//! - [`build`] turns raw asset records into a graph, synthesizing foreign
//!   placeholder nodes so edges always resolve.
//! - [`cycle`] validates acyclicity before anything is laid out.
//! - [`path`] finds a connecting node sequence for range selection.

pub mod build;
pub mod cycle;
pub mod model;
pub mod path;

pub use build::{build_graph, JobFilter};
pub use cycle::{find_cycle, has_cycle};
pub use model::{AssetNode, GraphData, NodeId};
pub use path::find_path;
