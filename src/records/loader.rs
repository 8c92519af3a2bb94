// src/records/loader.rs

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::errors::Result;
use crate::records::model::{AssetRecord, StepMetadata};

/// Load an asset-record snapshot (a JSON array of records) from a file.
///
/// This only performs deserialization; per-record validation (missing ids,
/// empty keys) is handled by the graph builder, which skips unusable records
/// instead of failing the whole snapshot.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<AssetRecord>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading asset records at {:?}", path))?;

    let records: Vec<AssetRecord> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing asset records from {:?}", path))?;

    Ok(records)
}

/// Load step execution metadata (states + log-capture groups) from a file.
pub fn load_steps(path: impl AsRef<Path>) -> Result<StepMetadata> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading step metadata at {:?}", path))?;

    let steps: StepMetadata = serde_json::from_str(&contents)
        .with_context(|| format!("parsing step metadata from {:?}", path))?;

    Ok(steps)
}
