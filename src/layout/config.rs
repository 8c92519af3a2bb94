// src/layout/config.rs

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::errors::Result;

/// Geometry knobs for the layered layout.
///
/// All dimensions are in abstract canvas units (the renderer decides what a
/// unit is on screen). Defaults match the stock node card sizes; a TOML file
/// may override any subset of fields:
///
/// ```toml
/// node_width = 260
/// horizontal_gutter = 32
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Footprint of a fully-defined asset node. Default 220 x 70.
    pub node_width: f64,
    pub node_height: f64,

    /// Smaller footprint used for hidden/foreign placeholder nodes.
    /// Default 120 x 40.
    pub foreign_node_width: f64,
    pub foreign_node_height: f64,

    /// Spacing between nodes within one layer. Default 40.
    pub horizontal_gutter: f64,

    /// Spacing between consecutive layers. Default 70.
    pub vertical_gutter: f64,

    /// Margin around the bounding box on every side. Default 40.
    pub margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 220.0,
            node_height: 70.0,
            foreign_node_width: 120.0,
            foreign_node_height: 40.0,
            horizontal_gutter: 40.0,
            vertical_gutter: 70.0,
            margin: 40.0,
        }
    }
}

impl LayoutConfig {
    /// Load a layout config from a TOML file; missing fields keep their
    /// defaults.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading layout config at {:?}", path))?;

        let config: LayoutConfig = toml::from_str(&contents)
            .with_context(|| format!("parsing layout config from {:?}", path))?;

        Ok(config)
    }
}
