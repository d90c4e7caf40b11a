//! Sprite and font declarations from `interface/*.gfx`.

use log::debug;
use treesnap_core::semantic::{BitmapFont, SpriteCatalog, SpriteType};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    extract::{id_field, number_field, text_field},
    tree::{Block, Item, Value},
};

/// Extract every `spriteType`, `corneredTileSpriteType` and `bitmapfont`.
///
/// Texture and font paths are kept as declared, relative to the game or mod
/// root the file was loaded from.
pub fn extract_sprite_catalog(root: &Block) -> Result<SpriteCatalog, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut catalog = SpriteCatalog::new();

    let mut pending: Vec<&Block> = vec![root];
    while let Some(block) = pending.pop() {
        let mut nested = Vec::new();
        for item in block.items() {
            let Item::Pair {
                key,
                value: Value::Block(body),
                ..
            } = item
            else {
                continue;
            };

            if key.inner().is("spriteType") || key.inner().is("corneredTileSpriteType") {
                if let Some(sprite) = sprite(body, &mut collector) {
                    catalog.insert_sprite(sprite);
                }
            } else if key.inner().is("bitmapfont") {
                if let Some(font) = font(body, &mut collector) {
                    catalog.insert_font(font);
                }
            } else {
                nested.push(body);
            }
        }
        pending.extend(nested.into_iter().rev());
    }

    debug!(sprite_count = catalog.len(); "Sprite catalog extracted");
    collector.finish_with(catalog)
}

fn unnamed(body: &Block, kind: &str) -> Diagnostic {
    Diagnostic::warning(format!("{kind} has no `name`"))
        .with_code(ErrorCode::E201)
        .with_label(body.span(), "skipped")
}

fn sprite(body: &Block, collector: &mut DiagnosticCollector) -> Option<SpriteType> {
    let Some(name) = id_field(body, "name") else {
        collector.emit(unnamed(body, "sprite"));
        return None;
    };
    let texture = text_field(body, "texturefile").unwrap_or_default();
    let frames = number_field(body, "noOfFrames", collector)
        .and_then(|frames| u32::try_from(frames).ok())
        .unwrap_or(1);
    Some(SpriteType::new(name, texture, frames))
}

fn font(body: &Block, collector: &mut DiagnosticCollector) -> Option<BitmapFont> {
    let Some(name) = id_field(body, "name") else {
        collector.emit(unnamed(body, "bitmap font"));
        return None;
    };
    let font_files = body
        .blocks("fontfiles")
        .flat_map(Block::bare_scalars)
        .map(|file| file.inner().as_str().to_string())
        .collect();
    Some(BitmapFont {
        name,
        path: text_field(body, "path").unwrap_or_default().to_string(),
        font_files,
    })
}

#[cfg(test)]
mod tests {
    use treesnap_core::identifier::Id;

    use super::*;
    use crate::parse;

    #[test]
    fn test_sprites_and_fonts() {
        let root = parse(
            r#"
            spriteTypes = {
                spriteType = {
                    name = "GFX_focus_link_up_down"
                    texturefile = "gfx/interface/focusview/focus_link_up_down.dds"
                    noOfFrames = 4
                }
                corneredTileSpriteType = {
                    name = "GFX_focus_unavailable"
                    textureFile = "gfx/interface/focusview/focus_unavailable_bg.dds"
                }
                spriteType = { texturefile = "gfx/orphan.dds" }
            }
            bitmapfonts = {
                bitmapfont = {
                    name = "hoi_18mbs"
                    path = "gfx/fonts/hoi4_18mbs"
                    fontfiles = { "gfx/fonts/hoi4_18mbs" "gfx/fonts/hoi4_18mbs_cyrillic" }
                }
            }
            "#,
        )
        .unwrap();

        let catalog = extract_sprite_catalog(&root).unwrap();
        assert_eq!(catalog.len(), 2);

        let link = catalog.sprite(Id::new("GFX_focus_link_up_down")).unwrap();
        assert_eq!(link.frames(), 4);
        assert_eq!(link.texture(), "gfx/interface/focusview/focus_link_up_down.dds");

        let background = catalog.sprite(Id::new("GFX_focus_unavailable")).unwrap();
        assert_eq!(background.frames(), 1);

        let font = catalog.font(Id::new("hoi_18mbs")).unwrap();
        assert_eq!(font.font_files.len(), 2);
        assert_eq!(font.path, "gfx/fonts/hoi4_18mbs");
    }
}
