//! Turns a [`TreeSnapError`] into `miette` reports for the terminal.
//!
//! A script that fails to parse yields one report per diagnostic, each with
//! the file text attached so labels render as snippets. Warnings found in the
//! same pass keep their severity. Every other error is a single report.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity, SourceCode, SourceSpan};

use treesnap::{LayoutError, TreeSnapError};
use treesnap_parser::{Span, error::Diagnostic};

/// One renderable problem.
#[derive(Debug)]
pub struct Report<'a> {
    message: String,
    severity: Severity,
    code: Option<String>,
    help: Option<&'a str>,
    source: Option<&'a str>,
    labels: Vec<LabeledSpan>,
}

impl<'a> Report<'a> {
    /// A parser diagnostic over the text of the file it came from.
    pub fn from_diagnostic(diag: &'a Diagnostic, source: &'a str) -> Self {
        let labels = diag
            .labels()
            .iter()
            .map(|label| {
                let message = Some(label.message().to_string());
                let span = source_span(label.span());
                if label.is_primary() {
                    LabeledSpan::new_primary_with_span(message, span)
                } else {
                    LabeledSpan::new_with_span(message, span)
                }
            })
            .collect();

        Self {
            message: diag.message().to_string(),
            severity: if diag.severity().is_warning() {
                Severity::Warning
            } else {
                Severity::Error
            },
            code: diag.code().map(|code| code.to_string()),
            help: diag.help(),
            source: Some(source),
            labels,
        }
    }

    /// An error with no location in a script.
    pub fn from_error(err: &TreeSnapError) -> Self {
        let code = match err {
            TreeSnapError::Io(_) => "treesnap::io",
            TreeSnapError::Parse { .. } => "treesnap::parse",
            TreeSnapError::Layout(_) => "treesnap::layout",
            TreeSnapError::Config(_) => "treesnap::config",
            TreeSnapError::Export(_) => "treesnap::export",
        };
        let help = match err {
            TreeSnapError::Layout(LayoutError::MalformedPositionChain { .. }) => {
                Some("check `relative_position_id` for cycles and missing focuses")
            }
            TreeSnapError::Layout(LayoutError::DuplicateFocus { .. }) => {
                Some("every focus of a tree needs a unique `id`")
            }
            _ => None,
        };

        Self {
            message: err.to_string(),
            severity: Severity::Error,
            code: Some(code.to_string()),
            help,
            source: None,
            labels: Vec::new(),
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Report<'_> {}

impl MietteDiagnostic for Report<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display + 'a>)
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help.map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.source.as_ref().map(|source| source as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Box::new(self.labels.iter().cloned()))
    }
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Splits `err` into reports, one per parser diagnostic.
pub fn reports(err: &TreeSnapError) -> Vec<Report<'_>> {
    match err {
        TreeSnapError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Report::from_diagnostic(diag, src))
            .collect(),
        _ => vec![Report::from_error(err)],
    }
}

/// Renders every report of `err` with miette's graphical handler.
pub fn render(err: &TreeSnapError) -> Vec<String> {
    let handler = miette::GraphicalReportHandler::new();
    reports(err)
        .iter()
        .map(|report| {
            let mut out = String::new();
            match handler.render_report(&mut out, report) {
                Ok(()) => out,
                Err(_) => report.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use treesnap::identifier::Id;
    use treesnap_parser::error::{ErrorCode, ParseError};

    use super::*;

    fn parse_failure(diags: Vec<Diagnostic>, src: &str) -> TreeSnapError {
        TreeSnapError::new_parse_error(ParseError::from(diags), src)
    }

    #[test]
    fn test_each_diagnostic_is_reported() {
        let err = parse_failure(
            vec![
                Diagnostic::error("unexpected character")
                    .with_code(ErrorCode::E002)
                    .with_label(Span::new(4..6), "here"),
                Diagnostic::error("focus has no `id`")
                    .with_code(ErrorCode::E201)
                    .with_label(Span::new(10..15), "this focus block")
                    .with_help("add `id = <name>` to the block"),
            ],
            "a = ¬ focus = { }",
        );

        let reports = reports(&err);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].to_string(), "unexpected character");
        assert_eq!(
            reports[1].help().map(|help| help.to_string()).as_deref(),
            Some("add `id = <name>` to the block")
        );
        assert!(reports[1].source_code().is_some());
    }

    #[test]
    fn test_warnings_keep_their_severity() {
        let err = parse_failure(
            vec![
                Diagnostic::warning("unknown orientation"),
                Diagnostic::error("bad number").with_code(ErrorCode::E200),
            ],
            "x = abc",
        );

        let severities: Vec<_> = reports(&err).iter().map(|r| r.severity()).collect();
        assert_eq!(severities, [Some(Severity::Warning), Some(Severity::Error)]);
    }

    #[test]
    fn test_layout_error_has_code_and_help() {
        let err = TreeSnapError::from(LayoutError::MalformedPositionChain {
            focus: Id::new("GER_cycle"),
        });

        let reports = reports(&err);
        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].code().map(|code| code.to_string()).as_deref(),
            Some("treesnap::layout")
        );
        assert!(reports[0].help().is_some());
        assert!(reports[0].source_code().is_none());
        assert!(reports[0].to_string().contains("GER_cycle"));
    }

    #[test]
    fn test_primary_flag_on_labels() {
        let diag = Diagnostic::error("unclosed block")
            .with_label(Span::new(0..5), "opened here")
            .with_secondary_label(Span::new(10..15), "file ends here");

        let report = Report::from_diagnostic(&diag, "focus = { x = 1");
        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
    }

    #[test]
    fn test_render_includes_message() {
        let err = TreeSnapError::Config("bad margin".to_string());
        let rendered = render(&err);
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].contains("bad margin"));
    }
}
