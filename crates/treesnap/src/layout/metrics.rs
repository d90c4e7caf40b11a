//! Grid to pixel conversion shared by the drawing stages.

use treesnap_core::{
    geometry::{GridPoint, Point, Size},
    identifier::Id,
    semantic::{FocusGui, SpriteCatalog},
};

use crate::{
    config::LayoutConfig,
    warning::{Warning, Warnings},
};

/// Pixel geometry of one tree: GUI spacing plus configured margins.
#[derive(Debug, Clone, Copy)]
pub struct GridMetrics {
    /// Pixel pitch of one grid cell.
    pub cell: Point,
    /// Pixel pitch of one connector tile.
    pub link_pitch: Point,
    /// Pixel offset of the grid origin.
    pub origin: Point,
}

impl GridMetrics {
    pub fn new(gui: &FocusGui, layout: &LayoutConfig) -> Self {
        Self {
            cell: gui.spacing.focus,
            link_pitch: gui.spacing.link,
            origin: Point::new(layout.margin_x, layout.margin_y),
        }
    }

    /// Top-left pixel of the cell at `position`.
    pub fn cell_origin(&self, position: GridPoint) -> Point {
        position.to_pixels(self.cell, self.origin)
    }
}

/// Returns the size of one frame of `sprite`.
///
/// Falls back to `fallback` with a warning when the sprite or its texture
/// size is unknown.
pub fn frame_size_or(
    catalog: &SpriteCatalog,
    sprite: Id,
    fallback: Size,
    warnings: &mut Warnings,
) -> Size {
    match catalog.sprite(sprite) {
        Some(entry) => entry.frame_size().unwrap_or_else(|| {
            warnings.push(Warning::MissingSpriteSize { sprite });
            fallback
        }),
        None => {
            warnings.push(Warning::MissingSprite {
                focus: None,
                sprite,
            });
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use treesnap_core::semantic::SpriteType;

    use super::*;

    #[test]
    fn test_cell_origin_applies_margins() {
        let mut gui = FocusGui::default();
        gui.spacing.focus = Point::new(96, 130);
        let metrics = GridMetrics::new(&gui, &LayoutConfig::default());

        assert_eq!(
            metrics.cell_origin(GridPoint::new(2, 1)),
            Point::new(2 * 96 + 131, 130 + 63)
        );
    }

    #[test]
    fn test_frame_size_fallbacks_warn() {
        let mut catalog = SpriteCatalog::new();
        catalog.insert_sprite(
            SpriteType::new(Id::new("GFX_sized"), "gfx/sized.dds", 4)
                .with_texture_size(Size::new(64, 16)),
        );
        catalog.insert_sprite(SpriteType::new(Id::new("GFX_unsized"), "gfx/unsized.dds", 1));

        let fallback = Size::new(16, 16);
        let mut warnings = Warnings::new();
        assert_eq!(
            frame_size_or(&catalog, Id::new("GFX_sized"), fallback, &mut warnings),
            Size::new(16, 16)
        );
        assert!(warnings.is_empty());

        frame_size_or(&catalog, Id::new("GFX_unsized"), fallback, &mut warnings);
        frame_size_or(&catalog, Id::new("GFX_absent"), fallback, &mut warnings);
        assert_eq!(
            warnings.into_vec(),
            [
                Warning::MissingSpriteSize {
                    sprite: Id::new("GFX_unsized")
                },
                Warning::MissingSprite {
                    focus: None,
                    sprite: Id::new("GFX_absent")
                },
            ]
        );
    }
}
