//! The layout pipeline.
//!
//! ```text
//! FocusTree
//!     ↓ store        (graph)
//! FocusGraph
//!     ↓ resolve      (position)
//!     ↓ adjacency    (adjacency)
//!     ↓ visibility   (visibility)
//!     ↓ classify     (classify)
//! Classified graph
//!     ↓ connectors   (connector)
//!     ↓ exclusions   (exclusive)
//!     ↓ focuses      (focus)
//! TreeLayout: DrawList + canvas size + warnings
//! ```
//!
//! Every stage runs once, in this order, on a graph owned by the run.

pub mod adjacency;
pub mod canvas;
pub mod classify;
pub mod connector;
pub mod exclusive;
pub mod focus;
pub mod metrics;
pub mod position;
pub mod visibility;

pub use visibility::{BranchFilter, SuppressionRules};

use log::{debug, info};

use treesnap_core::{
    draw::{DrawIntent, DrawList, LinkShape, RenderLayer},
    geometry::Size,
    identifier::Id,
    semantic::{FocusGui, FocusTree, LocalisationTable, SpriteCatalog},
};

use crate::{
    config::AppConfig,
    error::LayoutError,
    graph::FocusGraph,
    warning::{Warning, Warnings},
};

use connector::ConnectorGeometry;
use exclusive::ExclusiveGeometry;
use focus::FocusPainter;
use metrics::GridMetrics;

/// Read-only tables the layout draws from.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    pub gui: FocusGui,
    pub catalog: SpriteCatalog,
    pub localisation: LocalisationTable,
}

/// The laid-out tree.
#[derive(Debug, Clone)]
pub struct TreeLayout {
    graph: FocusGraph,
    draw_list: DrawList,
    canvas: Size,
    warnings: Vec<Warning>,
}

impl TreeLayout {
    /// The graph with resolved positions, visibility and masks.
    pub fn graph(&self) -> &FocusGraph {
        &self.graph
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Draw intents flattened bottom layer first.
    pub fn intents(&self) -> Vec<DrawIntent> {
        self.draw_list.clone().into_ordered()
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    #[cfg(test)]
    pub(crate) fn from_parts(draw_list: DrawList, canvas: Size) -> Self {
        Self {
            graph: FocusGraph::default(),
            draw_list,
            canvas,
            warnings: Vec::new(),
        }
    }
}

/// Runs the layout stages for one tree at a time.
pub struct LayoutEngine<'a> {
    config: &'a AppConfig,
    filter: Box<dyn BranchFilter + 'a>,
}

impl<'a> LayoutEngine<'a> {
    /// Creates an engine suppressing branches per `config.visibility`.
    pub fn new(config: &'a AppConfig) -> Self {
        Self {
            config,
            filter: Box::new(SuppressionRules::from(&config.visibility)),
        }
    }

    /// Replaces the branch suppression predicate.
    pub fn with_filter(mut self, filter: impl BranchFilter + 'a) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Lays out `tree`.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] for duplicate focus ids and malformed
    /// position chains. Everything else is reported as a warning.
    pub fn layout(&self, tree: &FocusTree, assets: &Assets) -> Result<TreeLayout, LayoutError> {
        info!(focus_count = tree.len(); "Laying out focus tree");
        let layout_config = &self.config.layout;
        let mut warnings = Warnings::new();

        let mut graph = FocusGraph::from_tree(tree)?;
        position::resolve_positions(&mut graph)?;
        adjacency::build_adjacency(&mut graph, &mut warnings);
        visibility::propagate_visibility(&mut graph, self.filter.as_ref());
        classify::classify_edges(&mut graph);

        let mut draw_list = DrawList::new();

        let tile = metrics::frame_size_or(
            &assets.catalog,
            Id::new(LinkShape::UpDown.sprite_name()),
            layout_config.default_tile_size,
            &mut warnings,
        );
        let connectors = connector::route_connectors(
            &graph,
            &ConnectorGeometry::new(&assets.gui, layout_config, tile),
        );
        for intent in connectors {
            if has_sprite(&intent, &assets.catalog, &mut warnings) {
                draw_list.push(RenderLayer::Connector, intent);
            }
        }

        let exclusions = exclusive::route_exclusions(
            &graph,
            &ExclusiveGeometry::new(&assets.gui, layout_config),
            &assets.catalog,
            &mut warnings,
        );
        for intent in exclusions {
            draw_list.push(RenderLayer::Exclusive, intent);
        }

        let metrics = GridMetrics::new(&assets.gui, layout_config);
        let painter = FocusPainter {
            gui: &assets.gui,
            metrics,
            catalog: &assets.catalog,
            localisation: &assets.localisation,
            language: &self.config.text.language,
        };
        draw_list.merge(painter.paint(&graph, &mut warnings));

        let canvas = canvas::canvas_size(&graph, &metrics, layout_config);
        debug!(
            intent_count = draw_list.len(),
            warning_count = warnings.len(),
            width = canvas.width(),
            height = canvas.height();
            "Focus tree laid out"
        );

        Ok(TreeLayout {
            graph,
            draw_list,
            canvas,
            warnings: warnings.into_vec(),
        })
    }
}

/// Keeps a sprite intent only when its sprite is in the catalog.
fn has_sprite(intent: &DrawIntent, catalog: &SpriteCatalog, warnings: &mut Warnings) -> bool {
    let Some(frame) = intent.graphic().sprite_frame() else {
        return true;
    };
    if catalog.sprite(frame.sprite()).is_some() {
        return true;
    }
    warnings.push(Warning::MissingSprite {
        focus: None,
        sprite: frame.sprite(),
    });
    false
}
