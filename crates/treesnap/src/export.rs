//! Export of laid-out trees.
//!
//! # Pipeline Position
//!
//! ```text
//! Focus tree source
//!     ↓ parse
//! FocusTree
//!     ↓ layout
//! TreeLayout (draw intents + canvas)
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! Export operations return [`Error`], which converts into
//! [`TreeSnapError::Export`] at the crate boundary.
//!
//! [`TreeSnapError::Export`]: crate::TreeSnapError::Export

/// SVG export backend.
pub mod svg;

use crate::layout::TreeLayout;

/// Abstraction for export backends.
pub trait Exporter {
    /// Exports a laid-out tree to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_tree_layout(&mut self, layout: &TreeLayout) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
