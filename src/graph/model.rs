// src/graph/model.rs

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Node identifier, unique within one graph.
pub type NodeId = String;

/// One node of the asset graph.
#[derive(Debug, Clone, Serialize)]
pub struct AssetNode {
    pub id: NodeId,

    /// Asset key as an ordered path of segments.
    pub asset_key: Vec<String>,

    /// Op that materializes this asset, if locally known.
    pub op_name: Option<String>,

    /// Job that owns this asset, if locally known.
    pub job_name: Option<String>,

    /// True for foreign placeholders: assets referenced by a dependency but
    /// defined outside the currently loaded record set. Their full
    /// definition is not known here; they exist so edges always resolve.
    pub hidden: bool,
}

/// The complete asset graph for one repository snapshot.
///
/// Invariants (maintained by the builder, relied on everywhere else):
/// - `upstream` and `downstream` are exact inverses over the edge set;
/// - every id appearing in either adjacency map exists in `nodes`;
/// - adjacency values are sets, so duplicate dependency registrations
///   collapse to one semantic edge.
///
/// The graph is rebuilt from scratch for every snapshot and never mutated
/// afterwards; layout, status aggregation and path search all share it
/// read-only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphData {
    pub(crate) nodes: BTreeMap<NodeId, AssetNode>,
    pub(crate) upstream: BTreeMap<NodeId, BTreeSet<NodeId>>,
    pub(crate) downstream: BTreeMap<NodeId, BTreeSet<NodeId>>,

    /// Declaration order: local nodes in record order, then foreign nodes in
    /// synthesis order. Used for deterministic tie-breaking in the layout.
    #[serde(skip)]
    pub(crate) order: Vec<NodeId>,
}

impl GraphData {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&AssetNode> {
        self.nodes.get(id)
    }

    /// All nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &AssetNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Direct upstream neighbours of a node (its dependencies).
    pub fn upstream_of(&self, id: &str) -> impl Iterator<Item = &str> {
        self.upstream
            .get(id)
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
    }

    /// Direct downstream neighbours of a node (its dependents).
    pub fn downstream_of(&self, id: &str) -> impl Iterator<Item = &str> {
        self.downstream
            .get(id)
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
    }

    pub fn upstream_count(&self, id: &str) -> usize {
        self.upstream.get(id).map(BTreeSet::len).unwrap_or(0)
    }

    /// All semantic edges as (upstream, downstream) pairs, in a stable
    /// order: declaration order of the upstream node, then sorted targets.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().flat_map(|id| {
            self.downstream
                .get(id)
                .into_iter()
                .flatten()
                .map(move |to| (id.as_str(), to.as_str()))
        })
    }

    pub(crate) fn insert_node(&mut self, node: AssetNode) {
        self.order.push(node.id.clone());
        self.nodes.insert(node.id.clone(), node);
    }

    /// Register a dependency edge. Both endpoints must already exist.
    pub(crate) fn insert_edge(&mut self, upstream: &str, downstream: &str) {
        debug_assert!(self.nodes.contains_key(upstream));
        debug_assert!(self.nodes.contains_key(downstream));

        self.downstream
            .entry(upstream.to_string())
            .or_default()
            .insert(downstream.to_string());
        self.upstream
            .entry(downstream.to_string())
            .or_default()
            .insert(upstream.to_string());
    }
}
