//! Output surface size.

use treesnap_core::geometry::Size;

use super::metrics::GridMetrics;
use crate::{config::LayoutConfig, graph::FocusGraph};

/// Sizes the canvas to the largest visible grid position plus margins.
///
/// The grid extends two columns and one row past the last visible focus.
pub fn canvas_size(graph: &FocusGraph, metrics: &GridMetrics, layout: &LayoutConfig) -> Size {
    let (max_x, max_y) = graph
        .nodes()
        .filter(|(_, node)| node.is_visible())
        .fold((0, 0), |(x, y), (_, node)| (x.max(node.x()), y.max(node.y())));

    Size::new(
        (max_x + 2) * metrics.cell.x() + layout.margin_x + layout.margin_right,
        (max_y + 1) * metrics.cell.y() + layout.margin_y,
    )
}
