//! Resolution of relative focus positions.
//!
//! A focus with `relative_position_id` stores its coordinates as an offset
//! from the anchor's final position. Resolution runs over a worklist of
//! pending nodes: a node resolves once its anchor has no pending anchor of
//! its own. Every pass must resolve at least one node, so an acyclic chain
//! finishes within as many passes as there are nodes.

use log::{debug, info, trace};

use crate::{
    error::LayoutError,
    graph::{FocusGraph, NodeIndex},
};

/// Resolves every node to an absolute grid position.
///
/// Returns the number of passes over the worklist.
///
/// # Errors
///
/// Returns [`LayoutError::MalformedPositionChain`] naming the first pending
/// node in declaration order when a pass resolves nothing. That happens for
/// cyclic chains and for anchors missing from the tree.
pub fn resolve_positions(graph: &mut FocusGraph) -> Result<usize, LayoutError> {
    let mut pending: Vec<NodeIndex> = graph
        .nodes()
        .filter(|(_, node)| node.pending_anchor().is_some())
        .map(|(index, _)| index)
        .collect();
    info!(pending = pending.len(); "Resolving relative positions");

    let mut passes = 0;
    while !pending.is_empty() {
        passes += 1;
        let before = pending.len();

        pending.retain(|&index| !try_resolve(graph, index));

        if pending.len() == before {
            let focus = graph.node(pending[0]).id();
            debug!(focus:% = focus, unresolved = pending.len(); "Position chain is stuck");
            return Err(LayoutError::MalformedPositionChain { focus });
        }
    }

    debug!(passes; "Relative positions resolved");
    Ok(passes)
}

/// Resolves `index` if its anchor is already absolute.
fn try_resolve(graph: &mut FocusGraph, index: NodeIndex) -> bool {
    let Some(anchor_id) = graph.node(index).pending_anchor() else {
        return true;
    };
    let Some(anchor) = graph.index_of(anchor_id) else {
        return false;
    };
    let anchor = graph.node(anchor);
    if anchor.pending_anchor().is_some() {
        return false;
    }

    let origin = anchor.position();
    let node = graph.node_mut(index);
    node.resolve_against(origin);
    trace!(focus:% = node.id(), anchor:% = anchor_id, x = node.x(), y = node.y(); "Position resolved");
    true
}
