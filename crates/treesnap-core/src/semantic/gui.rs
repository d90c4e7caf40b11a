//! Layout constants from the focus view GUI definition.
//!
//! All fields are plain data: the extractor fills whatever the GUI file
//! declares and leaves the rest at their zero defaults.

use crate::{
    geometry::{Point, Size},
    identifier::Id,
};

/// A `containerWindowType` block: a positioned, sized frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerWindow {
    pub name: String,
    pub position: Point,
    pub size: Size,
}

/// A `buttonType` block used as a sprite slot of the focus item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Button {
    pub name: String,
    pub position: Point,
    pub sprite: Option<Id>,
    /// `orientation = center`: anchored at the middle of the focus item.
    pub orientation_center: bool,
    /// `centerPosition = yes`: the sprite's own center sits on the anchor.
    pub center_position: bool,
}

/// An `iconType` block naming a sprite frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Icon {
    pub name: String,
    pub position: Point,
    pub sprite: Option<Id>,
    pub frame: u32,
}

impl Icon {
    /// Returns the 1-based frame, treating an undeclared frame as the first.
    pub fn frame(&self) -> u32 {
        self.frame.max(1)
    }
}

/// An `instantTextBoxType` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBox {
    pub name: String,
    pub position: Point,
    pub font: Option<Id>,
    pub max_width: i32,
    pub max_height: i32,
    /// `format = center`
    pub format_center: bool,
    /// `vertical_alignment = center`
    pub vertical_center: bool,
}

impl TextBox {
    pub fn max_size(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }
}

/// Every GUI constant the layout engine reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusGui {
    pub title: TextBox,

    pub focus_item: ContainerWindow,
    pub background: Button,
    pub symbol: Button,
    pub name: TextBox,

    pub focus_link: ContainerWindow,
    pub link: Icon,

    pub exclusive_item: ContainerWindow,
    pub exclusive_link1: Icon,
    pub exclusive_link2: Icon,
    pub exclusive_left: Icon,
    pub exclusive_right: Icon,
    pub exclusive_mid: Icon,

    pub spacing: GuiSpacing,
}

/// The named `positionType` entries of the focus view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuiSpacing {
    /// `focus_spacing`: grid cell pitch.
    pub focus: Point,
    /// `link_spacing`: connector tile pitch.
    pub link: Point,
    pub link_offsets: Point,
    pub link_begin: Point,
    pub link_end: Point,
    pub exclusive_offset: Point,
    pub exclusive_offset_left: Point,
    pub exclusive_positioning: Point,
}

impl GuiSpacing {
    /// Assigns a `positionType` by name. Returns `false` for unknown names.
    pub fn set(&mut self, name: &str, position: Point) -> bool {
        let slot = match name.to_ascii_lowercase().as_str() {
            "focus_spacing" => &mut self.focus,
            "link_spacing" => &mut self.link,
            "link_offsets" => &mut self.link_offsets,
            "link_begin" => &mut self.link_begin,
            "link_end" => &mut self.link_end,
            "exclusive_offset" => &mut self.exclusive_offset,
            "exclusive_offset_left" => &mut self.exclusive_offset_left,
            "exclusive_positioning" => &mut self.exclusive_positioning,
            _ => return false,
        };
        *slot = position;
        true
    }
}
