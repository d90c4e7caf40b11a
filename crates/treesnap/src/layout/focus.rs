//! Per-focus draw intents: background, icon and title.

use log::{debug, info};

use treesnap_core::{
    draw::{DrawIntent, DrawList, Graphic, RenderLayer, SpriteFrame, TextBlock},
    geometry::Point,
    identifier::Id,
    semantic::{Button, FocusGui, LocalisationTable, SpriteCatalog},
};

use super::metrics::GridMetrics;
use crate::{
    graph::{FocusGraph, Node},
    warning::{Warning, Warnings},
};

const CAN_START: &str = "GFX_focus_can_start";
const UNAVAILABLE: &str = "GFX_focus_unavailable";
const UNKNOWN_ICON: &str = "GFX_goal_unknown";

/// Read-only tables a focus is drawn from.
pub struct FocusPainter<'a> {
    pub gui: &'a FocusGui,
    pub metrics: GridMetrics,
    pub catalog: &'a SpriteCatalog,
    pub localisation: &'a LocalisationTable,
    pub language: &'a str,
}

impl FocusPainter<'_> {
    /// Draws every visible focus in declaration order.
    pub fn paint(&self, graph: &FocusGraph, warnings: &mut Warnings) -> DrawList {
        info!("Placing focus sprites and titles");
        let mut list = DrawList::new();
        let mut painted = 0;
        for (_, node) in graph.nodes().filter(|(_, node)| node.is_visible()) {
            self.paint_node(node, &mut list, warnings);
            painted += 1;
        }
        debug!(painted; "Focuses placed");
        list
    }

    fn paint_node(&self, node: &Node, list: &mut DrawList, warnings: &mut Warnings) {
        let focus = node.focus();
        let origin = self.metrics.cell_origin(node.position());

        let background = if focus.is_unlocked_by_default() {
            CAN_START
        } else {
            UNAVAILABLE
        };
        let background = Id::new(background);
        if self.catalog.sprite(background).is_some() {
            let position = self.sprite_position(origin, &self.gui.background, background, warnings);
            list.push(RenderLayer::Background, sprite_intent(background, position));
        } else {
            warnings.push(Warning::MissingSprite {
                focus: Some(node.id()),
                sprite: background,
            });
        }

        let unknown = Id::new(UNKNOWN_ICON);
        let icon = match focus.icon() {
            Some(icon) if self.catalog.sprite(icon).is_some() => Some(icon),
            Some(icon) => {
                warnings.push(Warning::MissingSprite {
                    focus: Some(node.id()),
                    sprite: icon,
                });
                self.catalog.sprite(unknown).map(|_| unknown)
            }
            None => self.catalog.sprite(unknown).map(|_| unknown),
        };
        match icon {
            Some(icon) => {
                let position = self.sprite_position(origin, &self.gui.symbol, icon, warnings);
                list.push(RenderLayer::Icon, sprite_intent(icon, position));
            }
            None => warnings.push(Warning::MissingSprite {
                focus: Some(node.id()),
                sprite: unknown,
            }),
        }

        list.push(RenderLayer::Text, self.title(node, origin, warnings));
    }

    /// Applies the button's offset and centering flags.
    fn sprite_position(
        &self,
        origin: Point,
        button: &Button,
        sprite: Id,
        warnings: &mut Warnings,
    ) -> Point {
        let mut position = origin + button.position;
        if button.orientation_center {
            position = position + self.gui.focus_item.size.half();
        }
        if button.center_position {
            match self.catalog.sprite(sprite).and_then(|entry| entry.frame_size()) {
                Some(size) => position = position - size.half(),
                None => warnings.push(Warning::MissingSpriteSize { sprite }),
            }
        }
        position
    }

    fn title(&self, node: &Node, origin: Point, warnings: &mut Warnings) -> DrawIntent {
        let name = &self.gui.name;
        let key = node.focus().text_key();
        let text = match self.localisation.get(self.language, key) {
            Some(text) => text.to_string(),
            None => {
                warnings.push(Warning::MissingLocalisation {
                    focus: node.id(),
                    key,
                });
                key.as_string()
            }
        };

        let mut position = origin + name.position;
        if name.format_center {
            position = position.offset(name.max_width / 2, 0);
        }
        if name.vertical_center {
            position = position.offset(0, name.max_height / 2);
        }

        DrawIntent::new(
            Graphic::Text(TextBlock::new(text, name.font, name.max_size())),
            position,
        )
    }
}

fn sprite_intent(sprite: Id, position: Point) -> DrawIntent {
    DrawIntent::new(Graphic::Sprite(SpriteFrame::first(sprite)), position)
}
