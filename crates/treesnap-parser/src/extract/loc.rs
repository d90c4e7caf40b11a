//! Localisation entries from `localisation/**/*.yml`.
//!
//! The format is line based:
//!
//! ```text
//! l_english:
//!  GER_rhineland:0 "Reoccupy the Rhineland"
//!  # comment
//! ```

use log::debug;
use treesnap_core::{identifier::Id, semantic::LocalisationTable};
use winnow::{
    Parser as _,
    ascii::{digit1, space0},
    combinator::{opt, terminated},
    error::ModalResult,
    token::take_while,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '@' | '.' | '-')
}

/// Parse the `key:N "` prefix of an entry, leaving the value in `line`.
fn entry_key<'a>(line: &mut &'a str) -> ModalResult<&'a str> {
    terminated(
        take_while(1.., is_key_char),
        (':', opt(digit1), space0, '"'),
    )
    .parse_next(line)
}

/// Strip the closing quote and anything after it, such as a trailing comment.
fn unquote(rest: &str) -> &str {
    match rest.rfind('"') {
        Some(end) => &rest[..end],
        None => rest.trim_end(),
    }
}

/// Extract the entries of a localisation file.
///
/// A file whose header names a different language yields an empty table.
/// Malformed lines are reported as warnings and skipped.
pub fn extract_localisation(source: &str, language: &str) -> Result<LocalisationTable, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut table = LocalisationTable::new();

    let mut offset = 0;
    let mut header: Option<&str> = None;
    for raw_line in source.split_inclusive('\n') {
        let line_start = offset;
        offset += raw_line.len();

        let line = raw_line.trim_start_matches('\u{feff}').trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let span = Span::new(line_start..line_start + raw_line.trim_end().len());

        let Some(current) = header else {
            let without_comment = line.split('#').next().unwrap_or(line).trim_end();
            match without_comment
                .strip_suffix(':')
                .filter(|lang| lang.starts_with("l_"))
            {
                Some(lang) => header = Some(lang),
                None => {
                    collector.emit(
                        Diagnostic::error("localisation file has no language header")
                            .with_code(ErrorCode::E203)
                            .with_label(span, "expected `l_<language>:`"),
                    );
                    break;
                }
            }
            continue;
        };

        if current != language {
            debug!(file_language = current, language; "Skipping localisation in another language");
            return collector.finish_with(table);
        }

        let mut rest = line;
        match entry_key(&mut rest) {
            Ok(key) => table.insert(language, Id::new(key), unquote(rest)),
            Err(_) => collector.emit(
                Diagnostic::warning("malformed localisation entry")
                    .with_code(ErrorCode::E204)
                    .with_label(span, "expected `key:0 \"value\"`"),
            ),
        }
    }

    debug!(language, entry_count = table.len(language); "Localisation extracted");
    collector.finish_with(table)
}
