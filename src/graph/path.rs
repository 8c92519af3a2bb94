// src/graph/path.rs

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::debug;

use crate::graph::model::{GraphData, NodeId};

/// Find a connecting path between two nodes for range selection.
///
/// The graph is treated as undirected here: a shift-click range should walk
/// dependency edges in either direction, so each node's neighbour set is the
/// union of its upstream and downstream adjacency.
///
/// Breadth-first search with parent-pointer reconstruction, which makes the
/// result shortest by hop count and the cost linear in edges on any graph.
/// Ties between equal-length paths resolve by sorted neighbour order, so the
/// result is deterministic for identical input.
///
/// - `from == to` returns just `[from]`.
/// - Unknown endpoints or disconnected components return `[]`, which the
///   caller treats as "extend nothing" rather than an error.
pub fn find_path(graph: &GraphData, from: &str, to: &str) -> Vec<NodeId> {
    if !graph.contains(from) || !graph.contains(to) {
        debug!(from = %from, to = %to, "path endpoint not in graph");
        return Vec::new();
    }
    if from == to {
        return vec![from.to_string()];
    }

    let mut parents: BTreeMap<&str, &str> = BTreeMap::new();
    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    visited.insert(from);
    queue.push_back(from);

    'search: while let Some(current) = queue.pop_front() {
        // Union of both directions; BTreeSet keeps the order sorted.
        let neighbours: BTreeSet<&str> = graph
            .upstream_of(current)
            .chain(graph.downstream_of(current))
            .collect();

        for next in neighbours {
            if !visited.insert(next) {
                continue;
            }
            parents.insert(next, current);
            if next == to {
                break 'search;
            }
            queue.push_back(next);
        }
    }

    if !parents.contains_key(to) {
        debug!(from = %from, to = %to, "no connecting path");
        return Vec::new();
    }

    // Walk parent pointers back from `to`, then flip into from -> to order.
    let mut path: Vec<NodeId> = Vec::new();
    let mut cursor = to;
    while cursor != from {
        path.push(cursor.to_string());
        cursor = parents[cursor];
    }
    path.push(from.to_string());
    path.reverse();
    path
}
