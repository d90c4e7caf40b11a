//! TreeSnap - Layout and connector routing for national focus trees
//!
//! This library turns a parsed focus tree into a flat list of draw intents:
//! focus backgrounds, icons, titles, the prerequisite connector tiles between
//! them and the mutual-exclusion markers. It resolves relative positions,
//! hides suppressed branches and classifies every connector tile before
//! routing it on the grid. The intents can be exported to SVG or handed to
//! any rasterizer.

pub mod config;
pub mod export;
pub mod graph;
pub mod layout;
pub mod warning;

mod error;

pub use treesnap_core::{color, draw, geometry, identifier, semantic};

pub use error::{LayoutError, TreeSnapError};
pub use layout::{Assets, BranchFilter, LayoutEngine, SuppressionRules, TreeLayout};
pub use warning::Warning;

use log::{debug, info, trace};

use config::AppConfig;
use semantic::FocusTree;

/// Builder for parsing, laying out and rendering focus trees.
///
/// # Examples
///
/// ```rust,no_run
/// use treesnap::{Assets, TreeBuilder, config::AppConfig};
///
/// let source = "focus_tree = { focus = { id = GER_army x = 4 y = 0 } }";
///
/// let builder = TreeBuilder::new(AppConfig::default());
/// let tree = builder.parse(source).expect("Failed to parse");
///
/// let assets = Assets::default();
/// let layout = builder.layout(&tree, &assets).expect("Failed to lay out");
/// let svg = builder.render_svg(&layout, &assets).expect("Failed to render");
///
/// // Or use default config
/// let builder = TreeBuilder::default();
/// ```
#[derive(Default)]
pub struct TreeBuilder {
    config: AppConfig,
}

impl TreeBuilder {
    /// Create a new tree builder with the given configuration.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use treesnap::{TreeBuilder, config::AppConfig};
    ///
    /// let config = AppConfig::default();
    /// let builder = TreeBuilder::new(config);
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a focus tree file into its focus records.
    ///
    /// # Errors
    ///
    /// Returns [`TreeSnapError::Parse`] with the source attached for lexical,
    /// syntax or extraction errors.
    pub fn parse(&self, source: &str) -> Result<FocusTree, TreeSnapError> {
        info!("Parsing focus tree");
        let tree = treesnap_parser::parse_focus_tree(source)
            .map_err(|err| TreeSnapError::new_parse_error(err, source))?;
        debug!(focus_count = tree.len(); "Focus tree parsed");
        trace!(tree:?; "Focus records");
        Ok(tree)
    }

    /// Lay out a focus tree against the loaded assets.
    ///
    /// # Errors
    ///
    /// Returns [`TreeSnapError::Layout`] for duplicate focus ids and
    /// malformed position chains.
    pub fn layout(&self, tree: &FocusTree, assets: &Assets) -> Result<TreeLayout, TreeSnapError> {
        let layout = LayoutEngine::new(&self.config).layout(tree, assets)?;
        info!(
            intent_count = layout.draw_list().len(),
            warning_count = layout.warnings().len();
            "Layout calculated"
        );
        Ok(layout)
    }

    /// Render a laid-out tree to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`TreeSnapError::Export`] when the configured style is invalid.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use treesnap::{Assets, TreeBuilder};
    ///
    /// let builder = TreeBuilder::default();
    /// let assets = Assets::default();
    /// let tree = builder.parse("focus_tree = { }").expect("Failed to parse");
    /// let layout = builder.layout(&tree, &assets).expect("Failed to lay out");
    ///
    /// let svg = builder.render_svg(&layout, &assets)
    ///     .expect("Failed to render tree");
    ///
    /// println!("{}", svg);
    /// ```
    pub fn render_svg(&self, layout: &TreeLayout, assets: &Assets) -> Result<String, TreeSnapError> {
        let svg = export::svg::SvgBuilder::new("")
            .with_style(self.config.style())
            .with_catalog(&assets.catalog)
            .build()?;
        let svg_string = svg.render(layout).to_string();
        info!("SVG rendered successfully");
        Ok(svg_string)
    }
}
