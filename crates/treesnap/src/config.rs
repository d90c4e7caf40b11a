use serde::Deserialize;

use treesnap_core::{color::Color, geometry::Size};

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Branch visibility section
    #[serde(default)]
    pub visibility: VisibilityConfig,

    /// Text configuration section
    #[serde(default)]
    pub text: TextConfig,

    /// Style configuration section
    #[serde(default)]
    pub style: StyleConfig,
}

/// Which declared exclusion offset positions the left cap of a long span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapOffset {
    /// The left cap uses the right icon's offset, as the game files place it.
    #[default]
    Right,
    /// The left cap uses its own offset.
    Left,
}

/// Pixel constants of the layout that the GUI file does not declare.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal pixel offset of the grid origin.
    pub margin_x: i32,
    /// Vertical pixel offset of the grid origin.
    pub margin_y: i32,
    /// Extra canvas width on the right.
    pub margin_right: i32,
    /// Upward shift of a parent's trunk tile.
    pub trunk_lift: i32,
    /// Width of one exclusion link segment.
    pub exclusive_link_width: i32,
    /// Link segments per grid column of an exclusion span.
    pub exclusive_span_factor: i32,
    pub left_cap_offset: CapOffset,
    /// Size used for tiles whose sprite size is unknown.
    pub default_tile_size: Size,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_x: 131,
            margin_y: 63,
            margin_right: 17,
            trunk_lift: 16,
            exclusive_link_width: 32,
            exclusive_span_factor: 3,
            left_cap_offset: CapOffset::Right,
            default_tile_size: Size::new(16, 16),
        }
    }
}

/// Branch suppression rules applied before visibility propagation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// `has_country_flag` values that hide a branch.
    pub suppressing_flags: Vec<String>,
    /// Hide branches gated behind `NOT = { has_dlc = ... }`.
    pub dlc_gated_hidden: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            suppressing_flags: vec!["romanov_enabled".to_string()],
            dlc_gated_hidden: true,
        }
    }
}

/// Text configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Localisation language key, e.g. `l_english`.
    pub language: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            language: "l_english".to_string(),
        }
    }
}

/// Style configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Default background color for rendered trees
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a style with the given background color string.
    pub fn with_background(color: impl Into<String>) -> Self {
        Self {
            background_color: Some(color.into()),
        }
    }

    /// Get the background color from configuration
    /// Returns None if no background color is configured
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

impl AppConfig {
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}
