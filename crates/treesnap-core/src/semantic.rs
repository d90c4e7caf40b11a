//! Typed records supplied to the layout engine.
//!
//! These types are the read-only tables the extraction step produces from
//! game script files and the layout engine consumes.
//!
//! # Pipeline Position
//!
//! ```text
//! Script Files
//!     ↓ lexer + parser (treesnap-parser)
//! Script Tree
//!     ↓ extract
//! Semantic Records (these types)
//!     ↓ graph + layout (treesnap)
//! Draw Intents (DrawList)
//!     ↓ export
//! SVG
//! ```
//!
//! # Organization
//!
//! - [`focus`] - Focus records: [`Focus`], [`FocusTree`], [`BranchCondition`]
//! - [`gui`] - Focus view layout constants: [`FocusGui`]
//! - [`catalog`] - Sprites and fonts: [`SpriteCatalog`], [`SpriteType`], [`BitmapFont`]
//! - [`localisation`] - Display text: [`LocalisationTable`]

pub mod catalog;
pub mod focus;
pub mod gui;
pub mod localisation;

pub use catalog::*;
pub use focus::*;
pub use gui::*;
pub use localisation::*;
