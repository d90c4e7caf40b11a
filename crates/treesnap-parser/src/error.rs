//! Error and diagnostic system for script parsing and record extraction.
//!
//! Every phase (lexing, tree parsing, record extraction) reports problems as
//! [`Diagnostic`]s with an [`ErrorCode`], labelled source spans and optional
//! help. Phases that can keep going accumulate diagnostics in a collector and
//! return them together in a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use treesnap_parser::error::{Diagnostic, ErrorCode};
//! # use treesnap_parser::Span;
//!
//! let diag = Diagnostic::error("focus has no `id`")
//!     .with_code(ErrorCode::E201)
//!     .with_label(Span::new(0..5), "this focus block")
//!     .with_help("add `id = <name>` to the block");
//! assert_eq!(diag.to_string(), "error[E201]: focus has no `id`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
