//! # TreeSnap Parser
//!
//! Reads the game's script dialect and extracts the typed records the layout
//! engine consumes.
//!
//! ## Usage
//!
//! ```
//! # use treesnap_parser::{parse_focus_tree, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         focus_tree = {
//!             focus = { id = GER_army x = 4 y = 0 }
//!             focus = {
//!                 id = GER_rhineland
//!                 prerequisite = { focus = GER_army }
//!                 relative_position_id = GER_army
//!                 x = 0 y = 1
//!             }
//!         }
//!     "#;
//!
//!     let tree = parse_focus_tree(source)?;
//!     assert_eq!(tree.len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;
mod extract;
mod lexer;
mod parser;
mod span;
mod tokens;
pub mod tree;

pub use extract::{
    extract_focus_gui, extract_focus_tree, extract_localisation, extract_sprite_catalog,
};
pub use span::{Span, Spanned};

use log::{debug, trace};
use treesnap_core::semantic::{FocusGui, FocusTree, LocalisationTable, SpriteCatalog};

use error::ParseError;
use tree::Block;

/// Parse script source into its root block.
///
/// 1. **Tokenize** - Convert source text to tokens, collecting lexical errors
/// 2. **Parse** - Build the generic item tree
pub fn parse(source: &str) -> Result<Block, ParseError> {
    let tokens = lexer::tokenize(source)?;
    trace!(token_count = tokens.len(); "Source tokenized");

    let root = parser::build_tree(&tokens, source.len())?;
    debug!(item_count = root.items().len(); "Script parsed");
    Ok(root)
}

/// Parse a focus tree file.
pub fn parse_focus_tree(source: &str) -> Result<FocusTree, ParseError> {
    extract_focus_tree(&parse(source)?)
}

/// Parse `nationalfocusview.gui`.
pub fn parse_focus_gui(source: &str) -> Result<FocusGui, ParseError> {
    extract_focus_gui(&parse(source)?)
}

/// Parse a `*.gfx` sprite catalog file.
pub fn parse_sprite_catalog(source: &str) -> Result<SpriteCatalog, ParseError> {
    extract_sprite_catalog(&parse(source)?)
}

/// Parse a localisation `*.yml` file, keeping entries only for `language`.
pub fn parse_localisation(source: &str, language: &str) -> Result<LocalisationTable, ParseError> {
    extract_localisation(source, language)
}
