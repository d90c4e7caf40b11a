//! The ParseError type for wrapping diagnostics.

use std::fmt;

use crate::error::Diagnostic;

/// Failure of one file.
///
/// Holds every diagnostic of the failed phase, warnings included, in the
/// order they were emitted.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The diagnostics that made the file fail.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity().is_error())
    }
}

impl fmt::Display for ParseError {
    /// Shows the first error, then how many other errors and warnings the
    /// file produced.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(lead) = self.errors().next().or(self.diagnostics.first()) else {
            return write!(f, "invalid script");
        };
        write!(f, "{lead}")?;

        let errors = self.errors().count().saturating_sub(1);
        let warnings = self.diagnostics.len() - self.errors().count();
        match (errors, warnings) {
            (0, 0) => Ok(()),
            (errors, 0) => write!(f, " (+{errors} more)"),
            (0, warnings) => write!(f, " ({warnings} warnings)"),
            (errors, warnings) => write!(f, " (+{errors} more, {warnings} warnings)"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self::new(diagnostics)
    }
}
