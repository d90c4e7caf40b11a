//! Mutual exclusion spans between focuses on the same row.
//!
//! A span is drawn from the left focus of each exclusive pair. Spans two
//! columns wide are a single mid piece; wider spans are a run of link
//! segments with a cap at each end and the mid piece over the center. A
//! span is skipped when a nearer exclusive partner of the left focus lies
//! between the two.

use log::{debug, info, trace};

use treesnap_core::{
    draw::{DrawIntent, Graphic, SpriteFrame},
    geometry::Point,
    semantic::{FocusGui, Icon, SpriteCatalog},
};

use super::metrics::GridMetrics;
use crate::{
    config::{CapOffset, LayoutConfig},
    graph::{FocusGraph, Node},
    warning::{ReferenceKind, Warning, Warnings},
};

/// Link segments sit this many pixels above their declared offset.
const LINK_RAISE: i32 = 2;

/// Pixel constants and sprites of exclusion spans.
#[derive(Debug, Clone)]
pub struct ExclusiveGeometry {
    metrics: GridMetrics,
    /// Offset of the span anchor inside a cell.
    anchor: Point,
    link_width: i32,
    span_factor: i32,
    left_cap_offset: CapOffset,
    link: Icon,
    left: Icon,
    right: Icon,
    mid: Icon,
}

impl ExclusiveGeometry {
    pub fn new(gui: &FocusGui, layout: &LayoutConfig) -> Self {
        Self {
            metrics: GridMetrics::new(gui, layout),
            anchor: gui.exclusive_item.position + gui.spacing.exclusive_offset,
            link_width: layout.exclusive_link_width,
            span_factor: layout.exclusive_span_factor,
            left_cap_offset: layout.left_cap_offset,
            link: gui.exclusive_link1.clone(),
            left: gui.exclusive_left.clone(),
            right: gui.exclusive_right.clone(),
            mid: gui.exclusive_mid.clone(),
        }
    }

    /// Length in pixels of the link run for a span of `dx` columns.
    pub fn line_size(&self, dx: i32) -> i32 {
        (dx - 2) * self.span_factor * self.link_width
    }

    fn left_cap_position(&self) -> Point {
        match self.left_cap_offset {
            CapOffset::Right => self.right.position,
            CapOffset::Left => self.left.position,
        }
    }
}

/// Draws every unshadowed same-row exclusion span.
pub fn route_exclusions(
    graph: &FocusGraph,
    geometry: &ExclusiveGeometry,
    catalog: &SpriteCatalog,
    warnings: &mut Warnings,
) -> Vec<DrawIntent> {
    info!("Routing mutual exclusion spans");

    let mut spans = SpanWriter {
        geometry,
        catalog,
        warnings,
        intents: Vec::new(),
    };
    let mut span_count = 0;

    for (_, left) in graph.nodes().filter(|(_, node)| node.is_visible()) {
        for &partner_id in left.focus().mutually_exclusive() {
            let Some(right) = graph.get(partner_id) else {
                spans.warnings.push(Warning::DanglingReference {
                    focus: left.id(),
                    target: partner_id,
                    kind: ReferenceKind::MutuallyExclusive,
                });
                continue;
            };
            if !right.is_visible() || right.y() != left.y() || right.x() <= left.x() {
                continue;
            }
            if is_shadowed(graph, left, right) {
                trace!(left:% = left.id(), right:% = right.id(); "Span shadowed");
                continue;
            }

            let anchor = geometry.metrics.cell_origin(left.position()) + geometry.anchor;
            if spans.span(anchor, right.x() - left.x()) {
                span_count += 1;
            }
        }
    }

    debug!(span_count; "Mutual exclusion spans routed");
    spans.intents
}

/// Whether a visible exclusive partner of `left` sits strictly between the pair.
fn is_shadowed(graph: &FocusGraph, left: &Node, right: &Node) -> bool {
    left.focus()
        .mutually_exclusive()
        .iter()
        .filter_map(|&id| graph.get(id))
        .any(|between| {
            between.is_visible()
                && between.y() == left.y()
                && left.x() < between.x()
                && between.x() < right.x()
        })
}

struct SpanWriter<'a> {
    geometry: &'a ExclusiveGeometry,
    catalog: &'a SpriteCatalog,
    warnings: &'a mut Warnings,
    intents: Vec<DrawIntent>,
}

impl SpanWriter<'_> {
    /// Emits one span of `dx` columns. Returns `false` when nothing is drawn.
    fn span(&mut self, anchor: Point, dx: i32) -> bool {
        let geometry = self.geometry;
        match dx {
            2 => {
                self.place(&geometry.mid, anchor);
            }
            dx if dx > 2 => {
                let line_size = geometry.line_size(dx);
                let pitch = geometry.metrics.link_pitch.x();
                if pitch > 0 {
                    let origin =
                        anchor + geometry.link.position + Point::new(0, -LINK_RAISE);
                    for i in 0..line_size / pitch {
                        self.place(&geometry.link, origin.offset(pitch * i, 0));
                    }
                }

                let right_offset = geometry.right.position;
                self.place(&geometry.left, anchor + geometry.left_cap_position());
                self.place(&geometry.right, anchor.offset(line_size, 0) + right_offset);
                self.place(&geometry.mid, anchor.offset(line_size / 2, 0) + right_offset);
            }
            _ => return false,
        }
        true
    }

    fn place(&mut self, icon: &Icon, position: Point) {
        let Some(sprite) = icon.sprite else {
            return;
        };
        if self.catalog.sprite(sprite).is_none() {
            self.warnings.push(Warning::MissingSprite {
                focus: None,
                sprite,
            });
            return;
        }
        self.intents.push(DrawIntent::new(
            Graphic::Sprite(SpriteFrame::new(sprite, icon.frame())),
            position,
        ));
    }
}
