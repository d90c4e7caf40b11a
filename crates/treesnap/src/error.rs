//! Error types for TreeSnap operations.
//!
//! [`TreeSnapError`] is the crate boundary error. Layout failures are fatal
//! for the tree being rendered and carry a [`LayoutError`] naming the
//! offending focus.

use std::io;

use thiserror::Error;

use treesnap_core::identifier::Id;
use treesnap_parser::error::ParseError;

/// The main error type for TreeSnap operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the diagnostics so a
/// caller can render labelled snippets.
#[derive(Debug, Error)]
pub enum TreeSnapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for TreeSnapError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TreeSnapError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

/// Fatal failures of the layout pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A relative position chain is cyclic or points at a missing focus.
    #[error("malformed position chain at focus `{focus}`")]
    MalformedPositionChain { focus: Id },

    /// Two focus records share one id.
    #[error("duplicate focus id `{focus}`")]
    DuplicateFocus { focus: Id },
}
