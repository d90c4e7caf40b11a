//! Sprite and font catalog built from `*.gfx` files.

use indexmap::IndexMap;
use log::trace;

use crate::{geometry::Size, identifier::Id};

/// A `spriteType` (or `corneredTileSpriteType`) entry.
///
/// The texture is a horizontal strip of `frames` equally wide frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteType {
    name: Id,
    texture: String,
    frames: u32,
    texture_size: Option<Size>,
}

impl SpriteType {
    /// Creates a sprite entry. A frame count of zero is read as one.
    pub fn new(name: Id, texture: impl Into<String>, frames: u32) -> Self {
        Self {
            name,
            texture: texture.into(),
            frames: frames.max(1),
            texture_size: None,
        }
    }

    /// Sets the full texture dimensions (builder style).
    pub fn with_texture_size(mut self, size: Size) -> Self {
        self.texture_size = Some(size);
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    /// Returns the texture path as declared or as resolved on disk.
    pub fn texture(&self) -> &str {
        &self.texture
    }

    pub fn set_texture(&mut self, texture: impl Into<String>) {
        self.texture = texture.into();
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn texture_size(&self) -> Option<Size> {
        self.texture_size
    }

    pub fn set_texture_size(&mut self, size: Size) {
        self.texture_size = Some(size);
    }

    /// Returns the size of one frame, if the texture size is known.
    pub fn frame_size(&self) -> Option<Size> {
        self.texture_size.map(|size| {
            let frames = i32::try_from(self.frames).unwrap_or(1);
            Size::new(size.width() / frames, size.height())
        })
    }
}

/// A `bitmapfont` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapFont {
    pub name: Id,
    pub path: String,
    pub font_files: Vec<String>,
}

/// Every sprite and font declared across the loaded `*.gfx` files.
///
/// Later declarations override earlier ones with the same name.
#[derive(Debug, Clone, Default)]
pub struct SpriteCatalog {
    sprites: IndexMap<Id, SpriteType>,
    fonts: IndexMap<Id, BitmapFont>,
}

impl SpriteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_sprite(&mut self, sprite: SpriteType) {
        if let Some(previous) = self.sprites.insert(sprite.name(), sprite) {
            trace!(sprite:% = previous.name(); "Sprite overridden");
        }
    }

    pub fn insert_font(&mut self, font: BitmapFont) {
        self.fonts.insert(font.name, font);
    }

    /// Moves every entry of `other` into this catalog, `other` winning.
    pub fn merge(&mut self, other: SpriteCatalog) {
        for (_, sprite) in other.sprites {
            self.insert_sprite(sprite);
        }
        self.fonts.extend(other.fonts);
    }

    pub fn sprite(&self, name: Id) -> Option<&SpriteType> {
        self.sprites.get(&name)
    }

    pub fn font(&self, name: Id) -> Option<&BitmapFont> {
        self.fonts.get(&name)
    }

    pub fn sprites(&self) -> impl Iterator<Item = &SpriteType> {
        self.sprites.values()
    }

    pub fn sprites_mut(&mut self) -> impl Iterator<Item = &mut SpriteType> {
        self.sprites.values_mut()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
