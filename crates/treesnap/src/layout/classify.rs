//! Edge direction classification.
//!
//! Every visible parent to child edge contributes sides to the child's
//! incoming mask at the parent's row and to the parent's outgoing mask. The
//! masks later select connector tiles.
//!
//! | Child column | Child incoming          | Parent outgoing |
//! |--------------|-------------------------|-----------------|
//! | left         | D R, L unless first     | U L             |
//! | equal        | U D, L/R toward visible neighbours | U D  |
//! | right        | D L, R unless last      | U R             |
//!
//! The solid flag marks mandatory lines. A non-mandatory child still gets a
//! solid corner when a solid line passes through it: a visible mandatory
//! sibling farther out on the same side, or, for a child in the parent's own
//! column, a visible mandatory sibling in any column. A child that also has a
//! prerequisite above this parent's row gets `U`, since that line ends in
//! this corner.

use std::cmp::Ordering;

use log::{debug, info, trace};

use treesnap_core::draw::Direction;

use crate::graph::{Child, FocusGraph, NodeIndex};

/// Computes incoming and outgoing masks for every visible edge.
///
/// Returns the number of classified edges.
pub fn classify_edges(graph: &mut FocusGraph) -> usize {
    info!("Classifying edge directions");

    let mut classified = 0;
    for parent in graph.indices() {
        if !graph.node(parent).is_visible() {
            continue;
        }
        let (incoming, outgoing) = classify_parent(graph, parent);
        let row = graph.node(parent).y();

        classified += incoming.len();
        for (child, mask) in incoming {
            graph.node_mut(child).add_incoming(row, mask);
        }
        graph.node_mut(parent).add_outgoing(outgoing);
    }

    debug!(classified; "Edge directions classified");
    classified
}

fn classify_parent(graph: &FocusGraph, parent: NodeIndex) -> (Vec<(NodeIndex, Direction)>, Direction) {
    let parent_node = graph.node(parent);
    let (px, py) = (parent_node.x(), parent_node.y());
    let children = parent_node.children();
    let visible = |child: &Child| graph.node(child.node).is_visible();
    let column = |child: &Child| graph.node(child.node).x();

    let mut incoming = Vec::new();
    let mut outgoing = Direction::NONE;

    for (i, child) in children.iter().enumerate() {
        if !visible(child) {
            continue;
        }
        let cx = column(child);
        let mut mask = Direction::NONE;

        if child.mandatory {
            mask |= Direction::SOLID;
            outgoing |= Direction::SOLID;
        } else {
            let solid_through = children.iter().any(|sibling| {
                sibling.mandatory
                    && visible(sibling)
                    && match cx.cmp(&px) {
                        Ordering::Less => column(sibling) < cx,
                        Ordering::Greater => column(sibling) > cx,
                        Ordering::Equal => true,
                    }
            });
            if solid_through {
                mask |= Direction::SOLID;
            }
        }

        let first = i == 0;
        let last = i + 1 == children.len();
        match cx.cmp(&px) {
            Ordering::Less => {
                mask |= Direction::DOWN | Direction::RIGHT;
                if !first {
                    mask |= Direction::LEFT;
                }
                outgoing |= Direction::UP | Direction::LEFT;
            }
            Ordering::Equal => {
                mask |= Direction::UP | Direction::DOWN;
                if !first && visible(&children[i - 1]) {
                    mask |= Direction::LEFT;
                }
                if !last && visible(&children[i + 1]) {
                    mask |= Direction::RIGHT;
                }
                outgoing |= Direction::UP | Direction::DOWN;
            }
            Ordering::Greater => {
                mask |= Direction::DOWN | Direction::LEFT;
                if !last {
                    mask |= Direction::RIGHT;
                }
                outgoing |= Direction::UP | Direction::RIGHT;
            }
        }

        if has_prerequisite_above(graph, child.node, py) {
            mask |= Direction::UP;
        }

        trace!(
            parent:% = parent_node.id(),
            child:% = graph.node(child.node).id(),
            mask = mask.bits();
            "Edge classified"
        );
        incoming.push((child.node, mask));
    }

    (incoming, outgoing)
}

/// Whether `child` has a visible prerequisite on a row above `row`.
fn has_prerequisite_above(graph: &FocusGraph, child: NodeIndex, row: i32) -> bool {
    graph
        .node(child)
        .focus()
        .prerequisites()
        .iter()
        .flatten()
        .filter_map(|&id| graph.get(id))
        .any(|prerequisite| prerequisite.is_visible() && prerequisite.y() < row)
}
