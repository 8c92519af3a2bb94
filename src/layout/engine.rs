// src/layout/engine.rs

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;
use tracing::debug;

use crate::graph::model::{GraphData, NodeId};
use crate::layout::config::LayoutConfig;

/// A point on the layout canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A node placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    /// Layer index: the length of the longest dependency chain from a
    /// source node. Strictly greater than every upstream neighbour's layer.
    pub layer: usize,
}

/// One routed edge: a cubic curve between two node anchors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEdge {
    pub from_id: NodeId,
    pub to_id: NodeId,

    /// Bottom-centre anchor of the upstream node.
    pub from: Point,
    /// Top-centre anchor of the downstream node.
    pub to: Point,

    /// Cubic control points, offset vertically by half the anchor gap.
    pub control_from: Point,
    pub control_to: Point,

    /// Rendered dashed when either endpoint is a hidden/foreign node, since
    /// the true intermediate path is unknown.
    pub dashed: bool,
}

/// The complete geometric layout for one graph snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<PositionedEdge>,
}

/// Lay out an acyclic graph: layered top-down, dependencies above
/// dependents.
///
/// Precondition: `graph` is a DAG (the pipeline runs the cycle check
/// first; layer assignment is undefined on cyclic input).
///
/// Identical input always produces an identical result: every stage
/// iterates in declaration or sorted order and ties are broken by the
/// stable sort, so there is no dependence on unordered iteration.
pub fn layout_graph(graph: &GraphData, config: &LayoutConfig) -> LayoutResult {
    let layers = assign_layers(graph);
    let ordered = order_within_layers(graph, &layers);

    debug!(
        nodes = graph.node_count(),
        layers = ordered.len(),
        "computed layer assignment"
    );

    place(graph, config, &ordered)
}

/// Longest-path layering via an iterative Kahn pass.
///
/// Sources (nodes with no upstream neighbours) sit at layer 0; every other
/// node sits one past its deepest upstream neighbour.
fn assign_layers(graph: &GraphData) -> BTreeMap<NodeId, usize> {
    let mut layer: BTreeMap<NodeId, usize> = BTreeMap::new();
    let mut indegree: BTreeMap<&str, usize> = BTreeMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    // Seed in declaration order so the processing order is reproducible.
    for node in graph.nodes() {
        let degree = graph.upstream_count(&node.id);
        layer.insert(node.id.clone(), 0);
        indegree.insert(node.id.as_str(), degree);
        if degree == 0 {
            queue.push_back(node.id.as_str());
        }
    }

    while let Some(current) = queue.pop_front() {
        let current_layer = layer.get(current).copied().unwrap_or(0);

        for next in graph.downstream_of(current) {
            let entry = layer.entry(next.to_string()).or_insert(0);
            if *entry < current_layer + 1 {
                *entry = current_layer + 1;
            }

            if let Some(degree) = indegree.get_mut(next) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(next);
                }
            }
        }
    }

    layer
}

/// Bucket nodes by layer, then reduce edge crossings with one barycenter
/// sweep: each node is keyed by the mean within-layer index of its upstream
/// neighbours. The sort is stable, so nodes without upstream neighbours
/// (and exact barycenter ties) keep declaration order.
fn order_within_layers(
    graph: &GraphData,
    layers: &BTreeMap<NodeId, usize>,
) -> Vec<Vec<NodeId>> {
    let layer_count = layers.values().max().map(|l| l + 1).unwrap_or(0);
    let mut buckets: Vec<Vec<NodeId>> = vec![Vec::new(); layer_count];

    for node in graph.nodes() {
        let l = layers.get(&node.id).copied().unwrap_or(0);
        buckets[l].push(node.id.clone());
    }

    // Current within-layer index of every node, updated layer by layer.
    let mut pos: BTreeMap<NodeId, f64> = BTreeMap::new();
    for bucket in buckets.iter() {
        for (i, id) in bucket.iter().enumerate() {
            pos.insert(id.clone(), i as f64);
        }
    }

    for l in 1..buckets.len() {
        let mut keyed: Vec<(f64, NodeId)> = buckets[l]
            .iter()
            .map(|id| {
                let upstream: Vec<f64> = graph
                    .upstream_of(id)
                    .filter_map(|u| pos.get(u).copied())
                    .collect();
                let barycenter = if upstream.is_empty() {
                    // No upstream anchor: hold the current position.
                    pos.get(id).copied().unwrap_or(0.0)
                } else {
                    upstream.iter().sum::<f64>() / upstream.len() as f64
                };
                (barycenter, id.clone())
            })
            .collect();

        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

        buckets[l] = keyed.into_iter().map(|(_, id)| id).collect();
        for (i, id) in buckets[l].iter().enumerate() {
            pos.insert(id.clone(), i as f64);
        }
    }

    buckets
}

/// Assign coordinates, compute the canvas bounding box and route edges.
fn place(graph: &GraphData, config: &LayoutConfig, ordered: &[Vec<NodeId>]) -> LayoutResult {
    let mut nodes: Vec<PositionedNode> = Vec::with_capacity(graph.node_count());
    let mut by_id: BTreeMap<&str, usize> = BTreeMap::new();

    let mut max_x = 0.0_f64;
    let mut max_y = 0.0_f64;

    for (l, bucket) in ordered.iter().enumerate() {
        let row_top = config.margin + l as f64 * (config.node_height + config.vertical_gutter);
        let mut cursor = config.margin;

        for id in bucket.iter() {
            let hidden = graph.node(id).map(|n| n.hidden).unwrap_or(false);
            let (width, height) = if hidden {
                (config.foreign_node_width, config.foreign_node_height)
            } else {
                (config.node_width, config.node_height)
            };

            // Foreign nodes are shorter; centre them in the row.
            let y = row_top + (config.node_height - height) / 2.0;

            max_x = max_x.max(cursor + width);
            max_y = max_y.max(y + height);

            nodes.push(PositionedNode {
                id: id.clone(),
                x: cursor,
                y,
                width,
                height,
                layer: l,
            });
            cursor += width + config.horizontal_gutter;
        }
    }

    for (i, node) in nodes.iter().enumerate() {
        by_id.insert(node.id.as_str(), i);
    }

    let mut edges: Vec<PositionedEdge> = Vec::new();
    for (upstream, downstream) in graph.edges() {
        let (Some(&u), Some(&d)) = (by_id.get(upstream), by_id.get(downstream)) else {
            continue;
        };
        let (u, d) = (&nodes[u], &nodes[d]);

        let from = Point {
            x: u.x + u.width / 2.0,
            y: u.y + u.height,
        };
        let to = Point {
            x: d.x + d.width / 2.0,
            y: d.y,
        };
        let bend = (to.y - from.y) / 2.0;

        let dashed = graph.node(upstream).map(|n| n.hidden).unwrap_or(false)
            || graph.node(downstream).map(|n| n.hidden).unwrap_or(false);

        edges.push(PositionedEdge {
            from_id: upstream.to_string(),
            to_id: downstream.to_string(),
            from,
            to,
            control_from: Point {
                x: from.x,
                y: from.y + bend,
            },
            control_to: Point {
                x: to.x,
                y: to.y - bend,
            },
            dashed,
        });
    }

    LayoutResult {
        width: max_x + config.margin,
        height: max_y + config.margin,
        nodes,
        edges,
    }
}
