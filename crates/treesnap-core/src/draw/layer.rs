//! Layer-grouped draw intent collection.
//!
//! Stages of the layout pipeline emit intents independently; [`DrawList`]
//! keeps them tagged with a [`RenderLayer`] so the final list comes out in
//! z-order no matter which stage ran first.
//!
//! # Example
//!
//! ```
//! # use treesnap_core::draw::{DrawIntent, DrawList, Graphic, RenderLayer, SpriteFrame};
//! # use treesnap_core::{geometry::Point, identifier::Id};
//! let mut list = DrawList::new();
//!
//! let icon = SpriteFrame::first(Id::new("GFX_goal_unknown"));
//! list.push(RenderLayer::Icon, DrawIntent::new(Graphic::Sprite(icon), Point::new(4, 4)));
//!
//! let bg = SpriteFrame::first(Id::new("GFX_focus_unavailable"));
//! list.push(RenderLayer::Background, DrawIntent::new(Graphic::Sprite(bg), Point::new(0, 0)));
//!
//! let ordered = list.into_ordered();
//! assert_eq!(ordered[0].position(), Point::new(0, 0));
//! ```

use crate::draw::DrawIntent;

/// Defines the rendering layers, bottom to top.
///
/// The `Ord` derive uses declaration order, so the first variant renders first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Prerequisite connector tiles.
    Connector,
    /// Mutual-exclusion spans.
    Exclusive,
    /// Focus background frames.
    Background,
    /// Focus icons.
    Icon,
    /// Focus titles.
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connector => "connector",
            Self::Exclusive => "exclusive",
            Self::Background => "background",
            Self::Icon => "icon",
            Self::Text => "text",
        }
    }
}

/// Draw intents grouped by layer, in emission order within each layer.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    items: Vec<(RenderLayer, DrawIntent)>,
}

impl DrawList {
    /// Creates a new empty `DrawList`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an intent to a layer.
    pub fn push(&mut self, layer: RenderLayer, intent: DrawIntent) {
        self.items.push((layer, intent));
    }

    /// Appends all intents from another list.
    pub fn merge(&mut self, other: DrawList) {
        self.items.extend(other.items);
    }

    /// Returns `true` if no intent was pushed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of intents across all layers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterates over the intents of one layer in emission order.
    pub fn layer(&self, layer: RenderLayer) -> impl Iterator<Item = &DrawIntent> {
        self.items
            .iter()
            .filter(move |(item_layer, _)| *item_layer == layer)
            .map(|(_, intent)| intent)
    }

    /// Flattens the list bottom layer first, consuming it.
    ///
    /// Sorting is stable, so emission order is kept within a layer.
    pub fn into_ordered(mut self) -> Vec<DrawIntent> {
        self.items.sort_by_key(|(layer, _)| *layer);
        self.items.into_iter().map(|(_, intent)| intent).collect()
    }

    /// Like [`DrawList::into_ordered`] but keeps the layer tags.
    pub fn into_layered(mut self) -> Vec<(RenderLayer, DrawIntent)> {
        self.items.sort_by_key(|(layer, _)| *layer);
        self.items
    }
}
