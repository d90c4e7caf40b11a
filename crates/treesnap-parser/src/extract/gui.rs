//! Focus view layout constants from `interface/nationalfocusview.gui`.

use log::{debug, trace};
use treesnap_core::semantic::{Button, ContainerWindow, FocusGui, Icon, TextBox};

use crate::{
    error::{DiagnosticCollector, ParseError},
    extract::{flag_field, id_field, number_field, position_field, size_field, text_field},
    tree::{Block, Item, Value},
};

/// Extract the focus view constants.
///
/// Container windows and position types are found at any depth. Anything the
/// file does not declare keeps its zero default.
pub fn extract_focus_gui(root: &Block) -> Result<FocusGui, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut gui = FocusGui::default();

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

            if key.inner().is("containerWindowType") {
                container(body, &mut gui, &mut collector);
                nested.push(body);
            } else if key.inner().is("positionType") {
                position_type(body, &mut gui, &mut collector);
            } else {
                nested.push(body);
            }
        }
        // Reversed so that later declarations are visited later and win.
        pending.extend(nested.into_iter().rev());
    }

    debug!(
        focus_spacing:? = gui.spacing.focus,
        link_spacing:? = gui.spacing.link;
        "Focus GUI extracted"
    );
    collector.finish_with(gui)
}

fn container(body: &Block, gui: &mut FocusGui, collector: &mut DiagnosticCollector) {
    let name = text_field(body, "name").unwrap_or_default();
    match name {
        "nationalfocusview" => {
            for text_box in body.blocks("instantTextBoxType") {
                if text_field(text_box, "name") == Some("national_focus_title") {
                    gui.title = extract_text_box(text_box, collector);
                }
            }
        }
        "national_focus_item" => {
            gui.focus_item = window(body, name, collector);
            for button in body.blocks("buttonType") {
                let button = extract_button(button, collector);
                if button.name.eq_ignore_ascii_case("bg") {
                    gui.background = button;
                } else if button.name.eq_ignore_ascii_case("symbol") {
                    gui.symbol = button;
                }
            }
            for text_box in body.blocks("instantTextBoxType") {
                if text_field(text_box, "name") == Some("name") {
                    gui.name = extract_text_box(text_box, collector);
                }
            }
        }
        "national_focus_link" => {
            gui.focus_link = window(body, name, collector);
            for icon in body.blocks("iconType") {
                let icon = extract_icon(icon, collector);
                if icon.name.eq_ignore_ascii_case("link") {
                    gui.link = icon;
                }
            }
        }
        "national_focus_exclusive_item" => {
            gui.exclusive_item = window(body, name, collector);
            for icon in body.blocks("iconType") {
                let icon = extract_icon(icon, collector);
                let slot = match icon.name.to_ascii_lowercase().as_str() {
                    "link1" => &mut gui.exclusive_link1,
                    "link2" => &mut gui.exclusive_link2,
                    "left" => &mut gui.exclusive_left,
                    "right" => &mut gui.exclusive_right,
                    "mid" => &mut gui.exclusive_mid,
                    _ => continue,
                };
                *slot = icon;
            }
        }
        _ => {}
    }
}

fn position_type(body: &Block, gui: &mut FocusGui, collector: &mut DiagnosticCollector) {
    let name = text_field(body, "name").unwrap_or_default();
    let position = position_field(body, collector);
    if !gui.spacing.set(name, position) {
        trace!(name; "Ignoring position type");
    }
}

fn window(body: &Block, name: &str, collector: &mut DiagnosticCollector) -> ContainerWindow {
    ContainerWindow {
        name: name.to_string(),
        position: position_field(body, collector),
        size: size_field(body, collector),
    }
}

fn extract_button(body: &Block, collector: &mut DiagnosticCollector) -> Button {
    Button {
        name: text_field(body, "name").unwrap_or_default().to_string(),
        position: position_field(body, collector),
        sprite: id_field(body, "spriteType").or_else(|| id_field(body, "quadTextureSprite")),
        orientation_center: flag_field(body, "orientation", "center"),
        center_position: flag_field(body, "centerPosition", "yes"),
    }
}

fn extract_icon(body: &Block, collector: &mut DiagnosticCollector) -> Icon {
    Icon {
        name: text_field(body, "name").unwrap_or_default().to_string(),
        position: position_field(body, collector),
        sprite: id_field(body, "spriteType"),
        frame: number_field(body, "frame", collector)
            .and_then(|frame| u32::try_from(frame).ok())
            .unwrap_or(0),
    }
}

fn extract_text_box(body: &Block, collector: &mut DiagnosticCollector) -> TextBox {
    TextBox {
        name: text_field(body, "name").unwrap_or_default().to_string(),
        position: position_field(body, collector),
        font: id_field(body, "font"),
        max_width: number_field(body, "maxWidth", collector).unwrap_or(0),
        max_height: number_field(body, "maxHeight", collector).unwrap_or(0),
        format_center: flag_field(body, "format", "center"),
        vertical_center: flag_field(body, "vertical_alignment", "center"),
    }
}
