// src/layout/mod.rs

//! Layered graph layout.
//!
//! - [`config`] holds the geometry knobs with documented defaults.
//! - [`engine`] assigns layers, orders nodes within layers, places
//!   coordinates and routes edge curves.

pub mod config;
pub mod engine;

pub use config::LayoutConfig;
pub use engine::{layout_graph, LayoutResult, Point, PositionedEdge, PositionedNode};
