//! Branch suppression and downward visibility propagation.
//!
//! Whether a branch starts hidden is decided by a [`BranchFilter`] from the
//! focus's `allow_branch` conditions. A hidden focus hides every descendant.

use log::{debug, info, trace};

use treesnap_core::semantic::{BranchCondition, Focus};

use crate::{config::VisibilityConfig, graph::FocusGraph};

/// Decides which focuses start out hidden.
pub trait BranchFilter {
    /// Returns `true` when `focus` and its descendants must not be drawn.
    fn hides(&self, focus: &Focus) -> bool;
}

/// The configurable suppression predicate.
///
/// - `always = no` always hides.
/// - `has_country_flag` hides when the flag is listed (case-insensitive).
/// - `NOT = { has_dlc = ... }` hides when DLC-gated branches are hidden.
#[derive(Debug, Clone)]
pub struct SuppressionRules {
    flags: Vec<String>,
    dlc_gated_hidden: bool,
}

impl SuppressionRules {
    pub fn new(flags: impl IntoIterator<Item = impl AsRef<str>>, dlc_gated_hidden: bool) -> Self {
        Self {
            flags: flags
                .into_iter()
                .map(|flag| flag.as_ref().to_ascii_lowercase())
                .collect(),
            dlc_gated_hidden,
        }
    }

    fn hides_condition(&self, condition: &BranchCondition) -> bool {
        match condition {
            BranchCondition::AlwaysNo => true,
            BranchCondition::CountryFlag(flag) => {
                let flag = flag.as_string().to_ascii_lowercase();
                self.flags.contains(&flag)
            }
            BranchCondition::NotDlc(_) => self.dlc_gated_hidden,
        }
    }
}

impl From<&VisibilityConfig> for SuppressionRules {
    fn from(config: &VisibilityConfig) -> Self {
        Self::new(&config.suppressing_flags, config.dlc_gated_hidden)
    }
}

impl Default for SuppressionRules {
    fn default() -> Self {
        Self::from(&VisibilityConfig::default())
    }
}

impl BranchFilter for SuppressionRules {
    fn hides(&self, focus: &Focus) -> bool {
        focus
            .branch_conditions()
            .iter()
            .any(|condition| self.hides_condition(condition))
    }
}

/// Hides every focus the filter rejects, then every node reachable from a
/// hidden one through its children.
///
/// Each node is hidden at most once; already hidden subtrees are not walked
/// again. Returns the number of hidden nodes.
pub fn propagate_visibility(graph: &mut FocusGraph, filter: &dyn BranchFilter) -> usize {
    info!("Propagating branch visibility");

    let mut worklist = Vec::new();
    for index in graph.indices() {
        let node = graph.node_mut(index);
        if filter.hides(node.focus()) {
            trace!(focus:% = node.id(); "Branch suppressed");
            node.hide();
            worklist.push(index);
        }
    }
    let mut hidden = worklist.len();

    while let Some(index) = worklist.pop() {
        let children: Vec<_> = graph.node(index).children().iter().map(|c| c.node).collect();
        for child in children {
            let node = graph.node_mut(child);
            if node.is_visible() {
                node.hide();
                hidden += 1;
                worklist.push(child);
            }
        }
    }

    debug!(hidden; "Visibility propagated");
    hidden
}

#[cfg(test)]
mod tests {
    use treesnap_core::{identifier::Id, semantic::FocusTree};

    use super::*;
    use crate::{layout::adjacency::build_adjacency, warning::Warnings};

    fn visible(graph: &FocusGraph, id: &str) -> bool {
        graph.get(Id::new(id)).unwrap().is_visible()
    }

    fn diamond(top_condition: Option<BranchCondition>) -> FocusGraph {
        let mut top = Focus::new(Id::new("top"));
        if let Some(condition) = top_condition {
            top = top.with_branch_condition(condition);
        }
        let tree = FocusTree::new(vec![
            top,
            Focus::new(Id::new("left"))
                .with_position(-1, 1)
                .with_prerequisite_group([Id::new("top")]),
            Focus::new(Id::new("right"))
                .with_position(1, 1)
                .with_prerequisite_group([Id::new("top")]),
            Focus::new(Id::new("bottom"))
                .with_position(0, 2)
                .with_prerequisite_group([Id::new("left"), Id::new("right")]),
            Focus::new(Id::new("unrelated")).with_position(4, 0),
        ]);
        let mut graph = FocusGraph::from_tree(&tree).unwrap();
        build_adjacency(&mut graph, &mut Warnings::new());
        graph
    }

    #[test]
    fn test_hidden_root_hides_diamond_once() {
        let mut graph = diamond(Some(BranchCondition::AlwaysNo));
        let hidden = propagate_visibility(&mut graph, &SuppressionRules::default());

        assert_eq!(hidden, 4);
        for id in ["top", "left", "right", "bottom"] {
            assert!(!visible(&graph, id), "{id} should be hidden");
        }
        assert!(visible(&graph, "unrelated"));
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let mut graph = diamond(Some(BranchCondition::AlwaysNo));
        let rules = SuppressionRules::default();
        propagate_visibility(&mut graph, &rules);
        propagate_visibility(&mut graph, &rules);

        assert!(!visible(&graph, "bottom"));
        assert!(visible(&graph, "unrelated"));
    }

    #[test]
    fn test_flag_rules_are_case_insensitive() {
        let rules = SuppressionRules::new(["Romanov_Enabled"], false);
        let flagged = Focus::new(Id::new("flagged"))
            .with_branch_condition(BranchCondition::CountryFlag(Id::new("ROMANOV_ENABLED")));
        let other_flag = Focus::new(Id::new("other"))
            .with_branch_condition(BranchCondition::CountryFlag(Id::new("civil_war")));
        let dlc = Focus::new(Id::new("dlc"))
            .with_branch_condition(BranchCondition::NotDlc(Id::new("Together for Victory")));

        assert!(rules.hides(&flagged));
        assert!(!rules.hides(&other_flag));
        assert!(!rules.hides(&dlc));
        assert!(SuppressionRules::default().hides(&dlc));
    }

    #[test]
    fn test_no_conditions_hide_nothing() {
        let mut graph = diamond(None);
        assert_eq!(propagate_visibility(&mut graph, &SuppressionRules::default()), 0);
        assert!(graph.nodes().all(|(_, node)| node.is_visible()));
    }
}
