//! Arena of layout nodes addressed by [`NodeIndex`].

use std::collections::BTreeMap;

use indexmap::{IndexMap, map::Entry};
use log::trace;

use treesnap_core::{
    draw::Direction,
    geometry::GridPoint,
    identifier::Id,
    semantic::{Focus, FocusTree},
};

use crate::error::LayoutError;

/// Stable handle of a node inside a [`FocusGraph`].
///
/// Indices follow declaration order of the focus records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An outgoing prerequisite edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Child {
    pub node: NodeIndex,
    /// The prerequisite group holding the parent has exactly one member.
    pub mandatory: bool,
}

/// One focus and the layout state derived for it.
#[derive(Debug, Clone)]
pub struct Node {
    focus: Focus,
    position: GridPoint,
    pending_anchor: Option<Id>,
    visible: bool,
    children: Vec<Child>,
    incoming: BTreeMap<i32, Direction>,
    outgoing: Direction,
}

impl Node {
    fn new(focus: Focus) -> Self {
        Self {
            position: focus.position(),
            pending_anchor: focus.relative_to(),
            visible: true,
            children: Vec::new(),
            incoming: BTreeMap::new(),
            outgoing: Direction::NONE,
            focus,
        }
    }

    pub fn id(&self) -> Id {
        self.focus.id()
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    /// Returns the grid position. Absolute once positions are resolved.
    pub fn position(&self) -> GridPoint {
        self.position
    }

    pub fn x(&self) -> i32 {
        self.position.x()
    }

    pub fn y(&self) -> i32 {
        self.position.y()
    }

    /// Returns the focus this node is still positioned relative to.
    pub fn pending_anchor(&self) -> Option<Id> {
        self.pending_anchor
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Children sorted by column once adjacency is built.
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Incoming connector masks keyed by the row of the parent.
    pub fn incoming(&self) -> &BTreeMap<i32, Direction> {
        &self.incoming
    }

    pub fn incoming_at(&self, row: i32) -> Direction {
        self.incoming.get(&row).copied().unwrap_or(Direction::NONE)
    }

    pub fn outgoing(&self) -> Direction {
        self.outgoing
    }

    pub(crate) fn resolve_against(&mut self, anchor: GridPoint) {
        self.position = self.position + anchor;
        self.pending_anchor = None;
    }

    pub(crate) fn hide(&mut self) {
        self.visible = false;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Child> {
        &mut self.children
    }

    pub(crate) fn add_incoming(&mut self, row: i32, mask: Direction) {
        *self.incoming.entry(row).or_insert(Direction::NONE) |= mask;
    }

    pub(crate) fn add_outgoing(&mut self, mask: Direction) {
        self.outgoing |= mask;
    }
}

/// The node graph of one tree, owned by a single layout run.
#[derive(Debug, Clone, Default)]
pub struct FocusGraph {
    nodes: IndexMap<Id, Node>,
}

impl FocusGraph {
    /// Builds the store from extracted records, rejecting duplicate ids.
    pub fn from_tree(tree: &FocusTree) -> Result<Self, LayoutError> {
        let mut nodes = IndexMap::with_capacity(tree.len());
        for focus in tree.focuses() {
            match nodes.entry(focus.id()) {
                Entry::Occupied(_) => {
                    return Err(LayoutError::DuplicateFocus { focus: focus.id() });
                }
                Entry::Vacant(slot) => {
                    trace!(focus:% = focus.id(); "Node added");
                    slot.insert(Node::new(focus.clone()));
                }
            }
        }
        Ok(Self { nodes })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: Id) -> Option<NodeIndex> {
        self.nodes.get_index_of(&id).map(NodeIndex)
    }

    /// # Panics
    ///
    /// Panics if `index` does not belong to this graph.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0]
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index.0]
    }

    pub fn get(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Iterates node indices in declaration order.
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> + use<> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    /// Iterates nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes
            .values()
            .enumerate()
            .map(|(index, node)| (NodeIndex(index), node))
    }
}
