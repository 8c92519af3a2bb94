// src/view.rs

//! The gated derivation pipeline: records -> graph -> (cycle check) ->
//! layout + statuses.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::graph::{build_graph, find_cycle, GraphData, JobFilter, NodeId};
use crate::layout::{layout_graph, LayoutConfig, LayoutResult};
use crate::records::model::{AssetRecord, ExecutionState, StepMetadata};
use crate::status::aggregate_statuses;

/// Everything the renderer needs for a drawable graph.
#[derive(Debug, Clone, Serialize)]
pub struct ReadyView {
    pub graph: GraphData,
    pub layout: LayoutResult,
    pub statuses: BTreeMap<NodeId, ExecutionState>,
}

/// Outcome of one full derivation pass.
///
/// `Empty` and `Cyclic` short-circuit the pipeline: no layout, no statuses,
/// no path search runs on such a graph. They are distinct states because
/// they mean different things to the observer ("nothing to show" vs. "your
/// dependencies are wrong").
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GraphView {
    /// Zero nodes after filtering.
    Empty,

    /// The dependency relation is not a DAG; `node` is on a cycle.
    Cyclic { node: NodeId },

    /// A valid graph with its derived geometry and statuses.
    Ready(ReadyView),
}

impl GraphView {
    pub fn as_ready(&self) -> Option<&ReadyView> {
        match self {
            GraphView::Ready(view) => Some(view),
            _ => None,
        }
    }
}

/// Run the whole pipeline over one input snapshot.
///
/// Pure: every stage is a transformation over the immutable snapshot, so
/// concurrent calls on independent inputs are safe. Derived values have no
/// identity of their own; callers drop the old view wholesale when a newer
/// snapshot arrives.
pub fn build_view(
    records: &[AssetRecord],
    filter: &JobFilter,
    steps: &StepMetadata,
    layout_config: &LayoutConfig,
) -> GraphView {
    let graph = build_graph(records, filter);

    if graph.is_empty() {
        info!("no nodes after filtering; nothing to show");
        return GraphView::Empty;
    }

    if let Some(node) = find_cycle(&graph) {
        info!(node = %node, "cycle detected; refusing to lay out");
        return GraphView::Cyclic { node };
    }

    let layout = layout_graph(&graph, layout_config);
    let statuses = aggregate_statuses(&graph, steps);

    debug!(
        nodes = graph.node_count(),
        edges = layout.edges.len(),
        statuses = statuses.len(),
        "derived graph view"
    );

    GraphView::Ready(ReadyView {
        graph,
        layout,
        statuses,
    })
}
