//! SVG export of draw intents.
//!
//! Each sprite intent becomes a nested `<svg>` viewport showing one frame of
//! the sprite's texture strip, cropped when the intent carries a crop. Titles
//! become `<text>` elements. Intents are grouped per render layer.

use std::{fs::File, io::Write};

use log::{debug, error, info, trace};
use svg::{
    Document, Node,
    node::element::{Group, Image, Rectangle, SVG, Text},
};

use treesnap_core::{
    color::Color,
    draw::{DrawIntent, Graphic, RenderLayer, SpriteFrame, TextBlock},
    geometry::Point,
    semantic::SpriteCatalog,
};

use super::{Error, Exporter};
use crate::{config::StyleConfig, layout::TreeLayout};

const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Builder for [`Svg`].
pub struct SvgBuilder<'a> {
    file_name: String,
    style: Option<&'a StyleConfig>,
    catalog: Option<&'a SpriteCatalog>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            style: None,
            catalog: None,
        }
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets the catalog that resolves sprites to textures.
    pub fn with_catalog(mut self, catalog: &'a SpriteCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::Render`] when no catalog is set or the configured
    /// background color is invalid.
    pub fn build(self) -> Result<Svg<'a>, Error> {
        let catalog = self
            .catalog
            .ok_or_else(|| Error::Render("no sprite catalog to resolve textures".to_string()))?;
        let background = match self.style {
            Some(style) => style.background_color().map_err(Error::Render)?,
            None => None,
        };
        Ok(Svg {
            file_name: self.file_name,
            background,
            catalog,
        })
    }
}

/// SVG exporter for one output file.
pub struct Svg<'a> {
    file_name: String,
    background: Option<Color>,
    catalog: &'a SpriteCatalog,
}

impl Svg<'_> {
    /// Renders a laid-out tree to an SVG document.
    pub fn render(&self, layout: &TreeLayout) -> Document {
        let canvas = layout.canvas();
        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", canvas.width(), canvas.height()),
            )
            .set("width", canvas.width())
            .set("height", canvas.height());

        if let Some(color) = &self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", color.to_string()),
            );
        }

        let mut rendered = 0;
        let mut current: Option<(RenderLayer, Group)> = None;
        for (layer, intent) in layout.draw_list().clone().into_layered() {
            let Some(node) = self.render_intent(&intent) else {
                continue;
            };
            rendered += 1;
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((layer, group.add(node)))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        doc = doc.add(group);
                    }
                    let group = Group::new().set("data-layer", layer.name()).add(node);
                    Some((layer, group))
                }
            };
        }
        if let Some((_, group)) = current {
            doc = doc.add(group);
        }

        debug!(rendered; "SVG document rendered");
        doc
    }

    fn render_intent(&self, intent: &DrawIntent) -> Option<Box<dyn Node>> {
        match intent.graphic() {
            Graphic::Text(text) => Some(Box::new(render_text(text, intent.position()))),
            graphic => {
                let frame = graphic.sprite_frame()?;
                self.render_sprite(frame, intent)
            }
        }
    }

    fn render_sprite(&self, frame: SpriteFrame, intent: &DrawIntent) -> Option<Box<dyn Node>> {
        let Some(sprite) = self.catalog.sprite(frame.sprite()) else {
            trace!(sprite:% = frame.sprite(); "Sprite not in catalog, skipped");
            return None;
        };
        let position = intent.position();
        let href = sprite.texture().to_string();

        let (Some(texture), Some(frame_size)) = (sprite.texture_size(), sprite.frame_size()) else {
            return Some(Box::new(
                Image::new()
                    .set("x", position.x())
                    .set("y", position.y())
                    .set("href", href),
            ));
        };

        let shown = intent.crop().unwrap_or(frame_size);
        let index = frame.frame().clamp(1, sprite.frames()) - 1;
        let offset_x = i64::from(index) * i64::from(frame_size.width());

        let image = Image::new()
            .set("width", texture.width())
            .set("height", texture.height())
            .set("href", href);
        Some(Box::new(
            SVG::new()
                .set("x", position.x())
                .set("y", position.y())
                .set("width", shown.width())
                .set("height", shown.height())
                .set(
                    "viewBox",
                    format!("{offset_x} 0 {} {}", shown.width(), shown.height()),
                )
                .add(image),
        ))
    }

    /// Writes an SVG document to the output file.
    pub fn write_document(&self, doc: &Document) -> Result<(), Error> {
        info!(file_name = self.file_name; "Creating SVG file");
        let mut file = File::create(&self.file_name).map_err(|err| {
            error!(file_name = self.file_name, err:err; "Failed to create SVG file");
            Error::Io(err)
        })?;

        write!(file, "{doc}").map_err(|err| {
            error!(file_name = self.file_name, err:err; "Failed to write SVG content");
            Error::Io(err)
        })
    }
}

impl Exporter for Svg<'_> {
    fn export_tree_layout(&mut self, layout: &TreeLayout) -> Result<(), Error> {
        let doc = self.render(layout);
        self.write_document(&doc)
    }
}

fn render_text(text: &TextBlock, position: Point) -> Text {
    let family = text
        .font()
        .map(|font| font.as_string())
        .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string());
    Text::new(text.text())
        .set("x", position.x())
        .set("y", position.y())
        .set("font-family", family)
        .set("dominant-baseline", "hanging")
}
