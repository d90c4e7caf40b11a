//! Focus records as declared in a focus tree file.

use crate::{geometry::GridPoint, identifier::Id};

/// A condition from a focus's `allow_branch` block.
///
/// The layout engine never evaluates these against game state. A
/// suppression rule decides which of them hide a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchCondition {
    /// `always = no`
    AlwaysNo,
    /// `has_country_flag = <flag>`
    CountryFlag(Id),
    /// `NOT = { has_dlc = <dlc> }`
    NotDlc(Id),
}

/// One unlockable node of a focus tree.
///
/// Coordinates are stored as declared: when [`Focus::relative_to`] is set they
/// are an offset from that focus's final position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focus {
    id: Id,
    icon: Option<Id>,
    text: Option<Id>,
    position: GridPoint,
    relative_to: Option<Id>,
    prerequisites: Vec<Vec<Id>>,
    mutually_exclusive: Vec<Id>,
    branch_conditions: Vec<BranchCondition>,
    available: bool,
}

impl Focus {
    /// Creates a focus at the grid origin with no relations.
    pub fn new(id: Id) -> Self {
        Self {
            id,
            icon: None,
            text: None,
            position: GridPoint::default(),
            relative_to: None,
            prerequisites: Vec::new(),
            mutually_exclusive: Vec::new(),
            branch_conditions: Vec::new(),
            available: true,
        }
    }

    pub fn with_icon(mut self, icon: Id) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_text(mut self, text: Id) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = GridPoint::new(x, y);
        self
    }

    pub fn with_relative_to(mut self, anchor: Id) -> Self {
        self.relative_to = Some(anchor);
        self
    }

    /// Adds one prerequisite group: at least one member must be completed.
    pub fn with_prerequisite_group(mut self, group: impl IntoIterator<Item = Id>) -> Self {
        self.prerequisites.push(group.into_iter().collect());
        self
    }

    pub fn with_mutually_exclusive(mut self, other: Id) -> Self {
        self.mutually_exclusive.push(other);
        self
    }

    pub fn with_branch_condition(mut self, condition: BranchCondition) -> Self {
        self.branch_conditions.push(condition);
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn icon(&self) -> Option<Id> {
        self.icon
    }

    /// Returns the localisation key of the title, falling back to the id.
    pub fn text_key(&self) -> Id {
        self.text.unwrap_or(self.id)
    }

    /// Returns the declared position (an offset when relative).
    pub fn position(&self) -> GridPoint {
        self.position
    }

    pub fn relative_to(&self) -> Option<Id> {
        self.relative_to
    }

    pub fn prerequisites(&self) -> &[Vec<Id>] {
        &self.prerequisites
    }

    pub fn mutually_exclusive(&self) -> &[Id] {
        &self.mutually_exclusive
    }

    pub fn branch_conditions(&self) -> &[BranchCondition] {
        &self.branch_conditions
    }

    /// Returns `false` when the focus declares a non-empty `available` block.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// A focus with no prerequisites that is available can be started right away.
    pub fn is_unlocked_by_default(&self) -> bool {
        self.prerequisites.is_empty() && self.available
    }
}

/// The focuses of one tree file in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusTree {
    focuses: Vec<Focus>,
}

impl FocusTree {
    pub fn new(focuses: Vec<Focus>) -> Self {
        Self { focuses }
    }

    pub fn push(&mut self, focus: Focus) {
        self.focuses.push(focus);
    }

    pub fn focuses(&self) -> &[Focus] {
        &self.focuses
    }

    pub fn len(&self) -> usize {
        self.focuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.focuses.is_empty()
    }
}

impl FromIterator<Focus> for FocusTree {
    fn from_iter<T: IntoIterator<Item = Focus>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
