// src/records/model.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One raw asset record as supplied by the upstream query layer.
///
/// A snapshot is a JSON array of these:
///
/// ```json
/// [
///   {
///     "id": "etl.load_users.users",
///     "asset_key": ["warehouse", "users"],
///     "op_name": "load_users",
///     "job_name": "etl",
///     "dependencies": [
///       { "input_name": "raw", "upstream_key": ["landing", "raw_users"] }
///     ]
///   }
/// ]
/// ```
///
/// Backend data can be partial, so the identifying fields are optional here.
/// They are validated exactly once, at the graph-building boundary; records
/// missing an id or an asset key are skipped there with a warning.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetRecord {
    /// Stable composite identifier assigned by the backend.
    #[serde(default)]
    pub id: Option<String>,

    /// Asset key as an ordered path of segments, e.g. `["warehouse", "users"]`.
    #[serde(default)]
    pub asset_key: Vec<String>,

    /// Name of the op that materializes this asset, if known.
    #[serde(default)]
    pub op_name: Option<String>,

    /// Name of the job that owns this asset, if known.
    #[serde(default)]
    pub job_name: Option<String>,

    /// Declared upstream dependencies.
    #[serde(default)]
    pub dependencies: Vec<DependencyRef>,
}

/// A single declared dependency on an upstream asset.
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyRef {
    /// Name of the input this dependency feeds, if the backend reports one.
    #[serde(default)]
    pub input_name: Option<String>,

    /// Asset key of the upstream asset.
    #[serde(default)]
    pub upstream_key: Vec<String>,
}

/// Execution metadata for the steps behind the visual nodes.
///
/// `states` carries the *raw* state strings reported by the execution
/// tracker; they are interpreted via [`ExecutionState::from_raw`] only when
/// statuses are aggregated. `groups` maps a log-capture group name to the
/// step identifiers displayed as one unit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepMetadata {
    #[serde(default)]
    pub states: BTreeMap<String, String>,

    #[serde(default)]
    pub groups: BTreeMap<String, Vec<String>>,
}

/// Display status of an execution step (or of a group of steps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionState {
    Running,
    Skipped,
    Succeeded,
    Failed,
}

impl ExecutionState {
    /// Interpret a raw state string from the execution tracker.
    ///
    /// The display set is closed: anything that is not exactly `RUNNING`,
    /// `SKIPPED` or `SUCCEEDED` (queued, retried, unknown future states)
    /// is shown as failed.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "RUNNING" => Self::Running,
            "SKIPPED" => Self::Skipped,
            "SUCCEEDED" => Self::Succeeded,
            _ => Self::Failed,
        }
    }
}

/// Join an asset-key path into its canonical display form, e.g. `a/b/c`.
pub fn key_path(segments: &[String]) -> String {
    segments.join("/")
}
