// src/graph/cycle.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::graph::model::{GraphData, NodeId};

/// Check whether the downstream relation contains a cycle.
///
/// Builds a petgraph graph over the node ids and runs a topological sort,
/// which fails exactly when the graph is cyclic. The sort is iterative, so
/// arbitrarily deep graphs cannot overflow the stack.
///
/// Returns one node involved in a cycle, or `None` for a DAG. This gates
/// the whole pipeline: layered layout is undefined on cyclic input, so a
/// cyclic graph must be surfaced to the caller instead of laid out.
pub fn find_cycle(graph: &GraphData) -> Option<NodeId> {
    let mut dag: DiGraphMap<&str, ()> = DiGraphMap::new();

    for node in graph.nodes() {
        dag.add_node(node.id.as_str());
    }
    for (upstream, downstream) in graph.edges() {
        dag.add_edge(upstream, downstream, ());
    }

    match toposort(&dag, None) {
        Ok(_order) => None,
        Err(cycle) => Some(cycle.node_id().to_string()),
    }
}

/// Convenience wrapper for callers that only need the boolean answer.
pub fn has_cycle(graph: &GraphData) -> bool {
    find_cycle(graph).is_some()
}
