//! Collector for accumulating diagnostics during a processing phase.

use log::warn;

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics so a phase can report every problem at once.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection and return a result.
    ///
    /// Warnings are logged and dropped when no error was emitted.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            return Err(ParseError::new(self.diagnostics));
        }
        for diagnostic in &self.diagnostics {
            warn!(diagnostic:% = diagnostic; "Script warning");
        }
        Ok(())
    }

    /// Finish collection, returning `value` when no error was emitted.
    pub fn finish_with<T>(self, value: T) -> Result<T, ParseError> {
        self.finish().map(|()| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_warning_only_is_ok() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("unknown position type"));

        assert!(!collector.has_errors);
        assert_eq!(collector.finish_with(7).ok(), Some(7));
    }

    #[test]
    fn test_collector_keeps_all_diagnostics_on_error() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(
            Diagnostic::error("bad number")
                .with_code(ErrorCode::E200)
                .with_label(Span::new(10..20), "here"),
        );
        collector.emit(Diagnostic::warning("test warning"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "bad number");
    }
}
