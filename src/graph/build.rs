// src/graph/build.rs

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use tracing::{debug, warn};

use crate::graph::model::{AssetNode, GraphData};
use crate::records::model::{key_path, AssetRecord};

/// Filter restricting the graph to assets owned by matching jobs.
///
/// The pattern is a glob (e.g. `etl_*`), compiled with `globset`. `None`,
/// an empty string and a bare `*` are all treated as "no meaningful filter":
/// every record is kept. Passed explicitly into [`build_graph`]; the builder
/// never reads filter state from anywhere else.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    matcher: Option<GlobMatcher>,
}

impl JobFilter {
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let matcher = match pattern.map(str::trim) {
            None | Some("") | Some("*") => None,
            Some(p) => Some(
                Glob::new(p)
                    .with_context(|| format!("invalid job filter pattern '{}'", p))?
                    .compile_matcher(),
            ),
        };
        Ok(Self { matcher })
    }

    /// Whether a record with the given owning job passes the filter.
    ///
    /// Records without a job name only pass when no filter is active.
    pub fn matches(&self, job_name: Option<&str>) -> bool {
        match (&self.matcher, job_name) {
            (None, _) => true,
            (Some(m), Some(job)) => m.is_match(job),
            (Some(_), None) => false,
        }
    }
}

/// Build a [`GraphData`] from one snapshot of raw asset records.
///
/// Pure function over its inputs: no shared state, no I/O.
///
/// - Records missing an id or an asset key are skipped with a warning; the
///   rest of the snapshot still produces a usable graph.
/// - Dependencies whose upstream key resolves to no local record get a
///   `hidden` placeholder node keyed by the joined asset-key path, so every
///   edge endpoint exists in the node map. This covers both genuinely
///   foreign assets and local assets excluded by the job filter.
pub fn build_graph(records: &[AssetRecord], filter: &JobFilter) -> GraphData {
    let mut graph = GraphData::default();

    // Key-path -> node id index for resolving dependencies.
    let mut local_keys: BTreeMap<String, String> = BTreeMap::new();
    let mut kept: Vec<usize> = Vec::new();

    // First pass: materialize nodes for well-formed, filter-matching records.
    for (idx, record) in records.iter().enumerate() {
        let Some(id) = record.id.as_deref().filter(|s| !s.is_empty()) else {
            warn!(index = idx, "asset record has no id; skipping");
            continue;
        };
        if record.asset_key.is_empty() {
            warn!(id = %id, "asset record has an empty asset key; skipping");
            continue;
        }
        if !filter.matches(record.job_name.as_deref()) {
            debug!(id = %id, "asset record excluded by job filter");
            continue;
        }
        if graph.contains(id) {
            warn!(id = %id, "duplicate asset record id; keeping the first");
            continue;
        }

        let key = key_path(&record.asset_key);
        if let Some(existing) = local_keys.get(&key) {
            warn!(
                id = %id,
                key = %key,
                existing = %existing,
                "duplicate asset key; keeping the first record"
            );
            continue;
        }

        local_keys.insert(key, id.to_string());
        kept.push(idx);
        graph.insert_node(AssetNode {
            id: id.to_string(),
            asset_key: record.asset_key.clone(),
            op_name: record.op_name.clone(),
            job_name: record.job_name.clone(),
            hidden: false,
        });
    }

    // Second pass: resolve dependency edges, synthesizing foreign nodes for
    // upstream keys that did not resolve locally.
    for &idx in kept.iter() {
        let record = &records[idx];
        let Some(id) = record.id.as_deref() else {
            continue; // kept records always have an id
        };

        for dep in record.dependencies.iter() {
            if dep.upstream_key.is_empty() {
                warn!(id = %id, "dependency with an empty upstream key; skipping");
                continue;
            }

            let key = key_path(&dep.upstream_key);
            let upstream_id = match local_keys.get(&key) {
                Some(local) => local.clone(),
                None => {
                    if !graph.contains(&key) {
                        debug!(id = %id, key = %key, "synthesizing foreign node");
                        graph.insert_node(AssetNode {
                            id: key.clone(),
                            asset_key: dep.upstream_key.clone(),
                            op_name: None,
                            job_name: None,
                            hidden: true,
                        });
                    }
                    key
                }
            };

            graph.insert_edge(&upstream_id, id);
        }
    }

    graph
}
