//! Connector line synthesis.
//!
//! Turns the classified graph into connector tile placements. For each
//! visible parent, in row then column order:
//!
//! 1. a trunk tile below the parent,
//! 2. the parent's corner, unless a child sits directly below,
//! 3. per visible child, a horizontal run toward the child's column that
//!    stops at the first column holding another corner,
//! 4. the child's corner at the end of the run,
//! 5. a vertical run down to the child, or to the next row where the child
//!    receives another line, ending in a cropped tile for any remainder.
//!
//! Every corner and vertical tile is placed at most once per position across
//! the whole tree. When a full tile lands on a cropped leftover placed
//! earlier, the full tile takes the leftover's slot.

use std::collections::{HashMap, HashSet};

use log::{debug, info, trace};

use treesnap_core::{
    draw::{DrawIntent, Graphic, LinkShape, LinkStyle, LinkTile},
    geometry::{Point, Size},
    semantic::FocusGui,
};

use super::metrics::GridMetrics;
use crate::{
    config::LayoutConfig,
    graph::{FocusGraph, Node, NodeIndex},
};

/// Pixel constants of connector placement.
#[derive(Debug, Clone, Copy)]
pub struct ConnectorGeometry {
    metrics: GridMetrics,
    /// Offset of the trunk column and row inside a cell.
    begin: Point,
    /// Offset of the child corner column inside a cell.
    end_x: i32,
    /// Vertical overhang of the line into the child cell.
    end_y: i32,
    trunk_lift: i32,
    tile: Size,
}

impl ConnectorGeometry {
    pub fn new(gui: &FocusGui, layout: &LayoutConfig, tile: Size) -> Self {
        let spacing = &gui.spacing;
        let link = gui.focus_link.position + spacing.link_offsets;
        Self {
            metrics: GridMetrics::new(gui, layout),
            begin: link + spacing.link_begin,
            end_x: link.x() + spacing.link_end.x(),
            end_y: spacing.link_end.y(),
            trunk_lift: layout.trunk_lift,
            tile,
        }
    }

    fn trunk_column(&self, x: i32) -> i32 {
        x * self.metrics.cell.x() + self.begin.x() + self.metrics.origin.x()
    }

    fn corner_column(&self, x: i32) -> i32 {
        x * self.metrics.cell.x() + self.end_x + self.metrics.origin.x()
    }

    fn trunk_row(&self, y: i32) -> i32 {
        y * self.metrics.cell.y() + self.begin.y() + self.metrics.origin.y() - self.trunk_lift
    }
}

/// Synthesizes connector tiles for the classified graph.
pub fn route_connectors(graph: &FocusGraph, geometry: &ConnectorGeometry) -> Vec<DrawIntent> {
    info!("Routing connector lines");

    let mut parents: Vec<NodeIndex> = graph
        .nodes()
        .filter(|(_, node)| node.is_visible() && visible_children(graph, node).next().is_some())
        .map(|(index, _)| index)
        .collect();
    parents.sort_by_key(|&index| {
        let node = graph.node(index);
        (node.y(), node.x(), index)
    });

    let mut router = Router {
        graph,
        geometry,
        placed: HashMap::new(),
        intents: Vec::new(),
    };
    for parent in parents {
        router.route_parent(graph.node(parent));
    }

    debug!(tile_count = router.intents.len(); "Connector lines routed");
    router.intents
}

fn visible_children<'a>(graph: &'a FocusGraph, node: &'a Node) -> impl Iterator<Item = &'a Node> {
    node.children()
        .iter()
        .map(|child| graph.node(child.node))
        .filter(|child| child.is_visible())
}

struct Router<'a> {
    graph: &'a FocusGraph,
    geometry: &'a ConnectorGeometry,
    /// Positions already taken, with the index of the intent drawn there.
    placed: HashMap<Point, Option<usize>>,
    intents: Vec<DrawIntent>,
}

impl Router<'_> {
    fn push(&mut self, tile: LinkTile, position: Point) -> usize {
        self.intents.push(DrawIntent::new(Graphic::Link(tile), position));
        self.intents.len() - 1
    }

    /// Places a tile unless one was already placed at `position`. A cropped
    /// tile at `position` is widened to the full tile instead.
    fn push_once(&mut self, tile: Option<LinkTile>, position: Point) {
        match self.placed.get(&position).copied() {
            None => {
                let index = tile.map(|tile| self.push(tile, position));
                self.placed.insert(position, index);
            }
            Some(Some(index)) => {
                if let Some(tile) = tile {
                    if self.intents[index].crop().is_some() {
                        self.intents[index] = DrawIntent::new(Graphic::Link(tile), position);
                    }
                }
            }
            Some(None) => {}
        }
    }

    /// Places a tile cropped to `crop` unless `position` is taken.
    fn push_cropped_once(&mut self, tile: LinkTile, position: Point, crop: Size) {
        if self.placed.contains_key(&position) {
            return;
        }
        self.intents
            .push(DrawIntent::new(Graphic::Link(tile), position).with_crop(crop));
        self.placed.insert(position, Some(self.intents.len() - 1));
    }

    fn route_parent(&mut self, parent: &Node) {
        let geometry = self.geometry;
        let graph = self.graph;
        let (px, py) = (parent.x(), parent.y());
        let outgoing = parent.outgoing();

        let trunk_x = geometry.trunk_column(px);
        let mut y = geometry.trunk_row(py);
        self.push(
            LinkTile::new(LinkShape::UpDown, LinkStyle::of(outgoing)),
            Point::new(trunk_x, y),
        );
        y += geometry.tile.height();

        let child_below =
            visible_children(graph, parent).any(|child| child.x() == px && child.y() == py + 1);
        if !child_below {
            self.push_once(LinkTile::from_mask(outgoing), Point::new(trunk_x, y));
        }

        let corner_columns: HashSet<i32> = std::iter::once(trunk_x)
            .chain(visible_children(graph, parent).map(|child| geometry.trunk_column(child.x())))
            .collect();

        let mut previous_solid = false;
        for child in visible_children(graph, parent) {
            let (cx, cy) = (child.x(), child.y());
            let incoming = child.incoming_at(py);

            if cx != px {
                if cx > px {
                    previous_solid = visible_children(graph, parent)
                        .any(|sibling| sibling.x() > cx && sibling.incoming_at(py).is_solid());
                }
                let solid = (incoming.is_solid() || previous_solid) && outgoing.is_solid();
                if solid {
                    previous_solid = true;
                }
                self.horizontal_run(cx - px, geometry.trunk_column(cx), y, solid, &corner_columns);
            }

            let corner_x = geometry.corner_column(cx);
            trace!(child:% = child.id(), x = corner_x, y, mask = incoming.bits(); "Child corner");
            self.push_once(LinkTile::from_mask(incoming), Point::new(corner_x, y));

            if cy > py {
                self.vertical_run(child, py, corner_x, y);
            }
        }
    }

    /// Steps from the child's column toward the parent's trunk.
    fn horizontal_run(
        &mut self,
        dx: i32,
        start_x: i32,
        y: i32,
        solid: bool,
        corner_columns: &HashSet<i32>,
    ) {
        let pitch = self.geometry.metrics.link_pitch.x();
        if pitch <= 0 {
            return;
        }
        let step = if dx < 0 { pitch } else { -pitch };
        let steps = dx.abs() * self.geometry.metrics.cell.x() / pitch;
        let style = if solid {
            LinkStyle::Solid
        } else {
            LinkStyle::Dashed
        };
        let tile = LinkTile::new(LinkShape::LeftRight, style);

        let mut x = start_x;
        for _ in 1..steps {
            x += step;
            if corner_columns.contains(&x) {
                break;
            }
            self.push(tile, Point::new(x, y));
        }
    }

    /// Runs down from the child's corner at `top` on the parent's row.
    fn vertical_run(&mut self, child: &Node, parent_row: i32, x: i32, top: i32) {
        let geometry = self.geometry;
        let pitch = geometry.metrics.link_pitch.y();
        let incoming = child.incoming_at(parent_row);

        let next_corner = child
            .incoming()
            .range(parent_row + 1..child.y())
            .next()
            .map(|(row, _)| *row);
        let target_row = next_corner.unwrap_or(child.y());

        let mut length =
            (target_row - parent_row) * geometry.metrics.cell.y() + geometry.end_y - 2 * pitch;
        if next_corner.is_some() {
            length += pitch;
        }
        if length <= 0 || pitch <= 0 {
            return;
        }

        let tile = LinkTile::new(LinkShape::UpDown, LinkStyle::of(incoming));
        let count = length / pitch;
        for i in 1..=count {
            self.push_once(Some(tile), Point::new(x, top + pitch * i));
        }

        let leftover = length - count * pitch;
        if leftover > 0 {
            let position = Point::new(x, top + pitch * (count + 1));
            self.push_cropped_once(tile, position, geometry.tile.with_height(leftover));
        }
    }
}
