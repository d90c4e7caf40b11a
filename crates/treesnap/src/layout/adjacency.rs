//! Parent to child adjacency from prerequisite groups.

use log::{debug, info, trace};

use crate::{
    graph::{Child, FocusGraph, NodeIndex},
    warning::{ReferenceKind, Warning, Warnings},
};

/// Attaches every focus as a child of each of its prerequisites, then sorts
/// each child list by column.
///
/// An edge is mandatory when its prerequisite group has a single member.
/// Members missing from the tree still count toward the group size, so a
/// group of one real and one missing focus gives an optional edge; the
/// missing member is skipped with a warning. Returns
/// the number of edges added.
pub fn build_adjacency(graph: &mut FocusGraph, warnings: &mut Warnings) -> usize {
    info!(node_count = graph.len(); "Building adjacency");

    let mut edges: Vec<(NodeIndex, Child)> = Vec::new();
    for (index, node) in graph.nodes() {
        for group in node.focus().prerequisites() {
            let mandatory = group.len() == 1;
            for &parent_id in group {
                let Some(parent) = graph.index_of(parent_id) else {
                    warnings.push(Warning::DanglingReference {
                        focus: node.id(),
                        target: parent_id,
                        kind: ReferenceKind::Prerequisite,
                    });
                    continue;
                };
                edges.push((
                    parent,
                    Child {
                        node: index,
                        mandatory,
                    },
                ));
            }
        }
    }

    let edge_count = edges.len();
    for (parent, child) in edges {
        graph.node_mut(parent).children_mut().push(child);
    }

    let columns: Vec<i32> = graph.nodes().map(|(_, node)| node.x()).collect();
    for index in graph.indices() {
        let children = graph.node_mut(index).children_mut();
        // Stable: equal columns keep declaration order.
        children.sort_by_key(|child| columns[child.node.index()]);
        if !children.is_empty() {
            trace!(parent = index.index(), children = children.len(); "Children sorted");
        }
    }

    debug!(edge_count; "Adjacency built");
    edge_count
}
