//! Shared fixtures for the layout integration tests.

#![allow(dead_code)]

use treesnap::{
    Assets,
    draw::LinkShape,
    geometry::{Point, Size},
    identifier::Id,
    semantic::{Focus, FocusGui, Icon, SpriteCatalog, SpriteType},
};

pub const EXCLUSIVE_LINK: &str = "GFX_focus_exclusive_link";
pub const EXCLUSIVE_LEFT: &str = "GFX_focus_exclusive_left";
pub const EXCLUSIVE_RIGHT: &str = "GFX_focus_exclusive_right";
pub const EXCLUSIVE_MID: &str = "GFX_focus_exclusive_mid";

fn icon(sprite: &str, position: Point) -> Icon {
    Icon {
        name: sprite.to_string(),
        position,
        sprite: Some(Id::new(sprite)),
        frame: 1,
    }
}

/// Vanilla-like focus view constants.
pub fn gui() -> FocusGui {
    let mut gui = FocusGui::default();
    gui.spacing.focus = Point::new(96, 130);
    gui.spacing.link = Point::new(16, 16);
    gui.spacing.link_begin = Point::new(48, 64);
    gui.spacing.link_end = Point::new(48, 0);
    gui.spacing.exclusive_offset = Point::new(40, 50);
    gui.focus_item.size = Size::new(96, 130);

    gui.exclusive_link1 = icon(EXCLUSIVE_LINK, Point::new(0, 0));
    gui.exclusive_left = icon(EXCLUSIVE_LEFT, Point::new(-10, -5));
    gui.exclusive_right = icon(EXCLUSIVE_RIGHT, Point::new(10, -5));
    gui.exclusive_mid = icon(EXCLUSIVE_MID, Point::new(0, -5));
    gui
}

/// A catalog with every connector shape plus focus and exclusion sprites.
pub fn catalog() -> SpriteCatalog {
    let mut catalog = SpriteCatalog::new();
    for shape in LinkShape::ALL {
        catalog.insert_sprite(
            SpriteType::new(
                Id::new(shape.sprite_name()),
                format!("gfx/interface/focusview/{}.dds", shape.sprite_name()),
                4,
            )
            .with_texture_size(Size::new(64, 16)),
        );
    }
    for name in [
        "GFX_focus_can_start",
        "GFX_focus_unavailable",
        "GFX_goal_unknown",
        EXCLUSIVE_LINK,
        EXCLUSIVE_LEFT,
        EXCLUSIVE_RIGHT,
        EXCLUSIVE_MID,
    ] {
        catalog.insert_sprite(
            SpriteType::new(Id::new(name), format!("gfx/{name}.dds"), 1)
                .with_texture_size(Size::new(32, 32)),
        );
    }
    catalog
}

pub fn assets() -> Assets {
    Assets {
        gui: gui(),
        catalog: catalog(),
        ..Assets::default()
    }
}

pub fn focus(id: &str, x: i32, y: i32) -> Focus {
    Focus::new(Id::new(id)).with_position(x, y)
}

/// A focus requiring any one of `group`.
pub fn child(id: &str, x: i32, y: i32, group: &[&str]) -> Focus {
    focus(id, x, y).with_prerequisite_group(group.iter().map(|parent| Id::new(parent)))
}
