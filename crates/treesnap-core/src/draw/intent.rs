//! Draw intents: the output contract between layout and rasterization.

use crate::{
    draw::LinkTile,
    geometry::{Point, Size},
    identifier::Id,
};

/// A single frame of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteFrame {
    sprite: Id,
    frame: u32,
}

impl SpriteFrame {
    /// Create a reference to frame `frame` (1-based) of `sprite`.
    pub fn new(sprite: Id, frame: u32) -> Self {
        Self { sprite, frame }
    }

    /// Create a reference to the first frame of `sprite`.
    pub fn first(sprite: Id) -> Self {
        Self::new(sprite, 1)
    }

    /// Returns the sprite name.
    pub fn sprite(&self) -> Id {
        self.sprite
    }

    /// Returns the 1-based frame index.
    pub fn frame(&self) -> u32 {
        self.frame
    }
}

/// A block of text placed inside a bounded box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    text: String,
    font: Option<Id>,
    max_size: Size,
}

impl TextBlock {
    /// Create a text block.
    pub fn new(text: impl Into<String>, font: Option<Id>, max_size: Size) -> Self {
        Self {
            text: text.into(),
            font,
            max_size,
        }
    }

    /// Returns the text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the bitmap font to render with, if declared.
    pub fn font(&self) -> Option<Id> {
        self.font
    }

    /// Returns the box the text must fit in.
    pub fn max_size(&self) -> Size {
        self.max_size
    }
}

/// What a [`DrawIntent`] places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Graphic {
    /// A connector tile between focuses.
    Link(LinkTile),
    /// Any other sprite frame: focus backgrounds, icons, exclusion tiles.
    Sprite(SpriteFrame),
    /// A focus title.
    Text(TextBlock),
}

impl Graphic {
    /// Returns the sprite frame this graphic draws, or `None` for text.
    pub fn sprite_frame(&self) -> Option<SpriteFrame> {
        match self {
            Graphic::Link(tile) => Some(tile.sprite()),
            Graphic::Sprite(frame) => Some(*frame),
            Graphic::Text(_) => None,
        }
    }
}

/// "Place graphic G with its top-left corner at (x, y)."
///
/// An optional crop limits how much of the graphic is drawn, measured from its
/// top-left corner. Vertical connector runs use it for a final partial tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawIntent {
    graphic: Graphic,
    position: Point,
    crop: Option<Size>,
}

impl DrawIntent {
    /// Create an uncropped intent.
    pub fn new(graphic: Graphic, position: Point) -> Self {
        Self {
            graphic,
            position,
            crop: None,
        }
    }

    /// Limit the drawn area of this intent (builder style).
    pub fn with_crop(mut self, crop: Size) -> Self {
        self.crop = Some(crop);
        self
    }

    /// Returns the graphic.
    pub fn graphic(&self) -> &Graphic {
        &self.graphic
    }

    /// Returns the top-left pixel position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the crop, if any.
    pub fn crop(&self) -> Option<Size> {
        self.crop
    }

    /// Returns the connector tile if this intent places one.
    pub fn link_tile(&self) -> Option<LinkTile> {
        match self.graphic {
            Graphic::Link(tile) => Some(tile),
            _ => None,
        }
    }
}
