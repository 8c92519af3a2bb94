// src/status/mod.rs

//! Per-node execution status rollup.
//!
//! A visual node can stand for several underlying execution steps (a
//! multi-op asset whose steps share a log-capture group). This module
//! collapses the constituent step states into the single status the
//! renderer shows next to the node.

use std::collections::BTreeMap;

use crate::graph::model::{GraphData, NodeId};
use crate::records::model::{ExecutionState, StepMetadata};

/// Collapse a set of constituent states into one display status.
///
/// Priority, first match wins:
/// 1. any `Running` -> `Running`
/// 2. any `Skipped` -> `Skipped`
/// 3. all `Succeeded` -> `Succeeded`
/// 4. otherwise -> `Failed`
///
/// This is a deliberate priority, not a tally: one running step dominates
/// even if siblings already failed, because "in progress" is the signal
/// worth showing live.
///
/// Zero constituents produce `None`; the caller suppresses the indicator.
pub fn aggregate_states(states: &[ExecutionState]) -> Option<ExecutionState> {
    if states.is_empty() {
        return None;
    }

    if states.contains(&ExecutionState::Running) {
        Some(ExecutionState::Running)
    } else if states.contains(&ExecutionState::Skipped) {
        Some(ExecutionState::Skipped)
    } else if states.iter().all(|s| *s == ExecutionState::Succeeded) {
        Some(ExecutionState::Succeeded)
    } else {
        Some(ExecutionState::Failed)
    }
}

/// Compute a display status for every node that has at least one
/// constituent step with a recorded state.
///
/// A node's constituents are the members of the log-capture group that
/// contains its op, or the op alone when it is not grouped. Hidden nodes
/// and nodes without an op name never get a status.
pub fn aggregate_statuses(
    graph: &GraphData,
    steps: &StepMetadata,
) -> BTreeMap<NodeId, ExecutionState> {
    // Invert the group map once: member step -> group members.
    let mut group_of: BTreeMap<&str, &[String]> = BTreeMap::new();
    for members in steps.groups.values() {
        for member in members.iter() {
            group_of.insert(member.as_str(), members.as_slice());
        }
    }

    let mut statuses = BTreeMap::new();

    for node in graph.nodes() {
        if node.hidden {
            continue;
        }
        let Some(op) = node.op_name.as_deref() else {
            continue;
        };

        let states: Vec<ExecutionState> = match group_of.get(op) {
            Some(members) => members
                .iter()
                .filter_map(|step| steps.states.get(step))
                .map(|raw| ExecutionState::from_raw(raw))
                .collect(),
            None => steps
                .states
                .get(op)
                .map(|raw| ExecutionState::from_raw(raw))
                .into_iter()
                .collect(),
        };

        if let Some(status) = aggregate_states(&states) {
            statuses.insert(node.id.clone(), status);
        }
    }

    statuses
}
