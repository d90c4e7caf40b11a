//! Lexical analyzer for script source text.
//!
//! The lexer converts source text into a stream of [`Token`]s. It handles
//! `#` comments, quoted strings, bare words, comparison operators and braces.
//! A leading UTF-8 byte order mark is lexed as whitespace so spans stay
//! relative to the original text.
//!
//! The public entry point is [`tokenize`], which recovers from bad characters
//! and collects all diagnostics in a single pass.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{literal, none_of, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Rich diagnostic information for lexer errors.
///
/// Attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    pub code: ErrorCode,
    pub message: &'static str,
    pub help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    pub start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<'a, O> = ModalResult<O, ContextError<LexerDiagnostic>>;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Characters allowed in a bare word.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '@' | '.' | '-' | '^' | '\'' | '%')
}

/// Parse a quoted string.
///
/// `\"` is an escaped quote; every other character, newlines included, is
/// taken verbatim.
fn quoted<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    let string_char = alt((literal("\\\"").value('"'), none_of(['"'])));
    let content = repeat(0.., string_char).fold(String::new, |mut acc, ch| {
        acc.push(ch);
        acc
    });

    let start_pos = input.current_token_start();
    '"'.parse_next(input)
        .map_err(|_: ErrMode<ContextError<LexerDiagnostic>>| {
            ErrMode::Backtrack(ContextError::new())
        })?;

    cut_err(terminated(content, '"'))
        .context(LexerDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated string literal",
            help: Some("add closing `\"`"),
            start: start_pos,
        })
        .parse_next(input)
        .map(Token::Quoted)
}

/// Parse a comment starting with `#`.
fn comment<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    preceded('#', take_while(0.., |c| c != '\n' && c != '\r'))
        .map(Token::Comment)
        .parse_next(input)
}

/// Parse comparison operators, longest first.
fn operator<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    alt((
        literal("<=").value(Token::LessEquals),
        literal(">=").value(Token::GreaterEquals),
        literal("!=").value(Token::NotEquals),
        '='.value(Token::Equals),
        '<'.value(Token::Less),
        '>'.value(Token::Greater),
    ))
    .parse_next(input)
}

fn punctuation<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    alt((
        '{'.value(Token::LeftBrace),
        '}'.value(Token::RightBrace),
        ';'.value(Token::Semicolon),
    ))
    .parse_next(input)
}

fn word<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    take_while(1.., is_word_char).map(Token::Word).parse_next(input)
}

fn newline<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

/// Whitespace other than newlines, including a byte order mark.
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    take_while(1.., |c: char| {
        (c.is_whitespace() && c != '\n') || c == BYTE_ORDER_MARK
    })
    .value(Token::Whitespace)
    .parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<'a, PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        comment, quoted, operator, punctuation, word, newline, whitespace,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(PositionedToken::new(token, Span::new(start_pos..end_pos)))
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Tokenize the input, collecting tokens and errors.
    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            match positioned_token(&mut input) {
                Ok(token) => self.tokens.push(token),
                Err(e) => {
                    let error_pos = input.current_token_start();
                    self.diagnostics.emit(Self::convert_err_mode(e, error_pos));

                    if !input.is_empty() {
                        input.next_token();
                    }
                }
            }
        }
    }

    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish_with(self.tokens)
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    ///
    /// Falls back to E002 (unexpected character) when no context is attached.
    fn convert_err_mode(
        err: ErrMode<ContextError<LexerDiagnostic>>,
        error_pos: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos);
            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        let span = Span::new(error_pos..error_pos.saturating_add(1));
        Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E002)
            .with_label(span, ErrorCode::E002.description())
    }
}

/// Tokenize script source, collecting every lexical error.
///
/// # Returns
///
/// - `Ok(tokens)` - All tokens, trivia included
/// - `Err(ParseError)` - One or more errors occurred; contains all diagnostics
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let mut lexer = Lexer::new();
    lexer.tokenize(LocatingSlice::new(input));
    lexer.finish()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn significant(input: &str) -> Vec<Token<'_>> {
        tokenize(input)
            .expect("input should tokenize")
            .into_iter()
            .map(|t| t.token)
            .filter(|t| !t.is_trivia())
            .collect()
    }

    #[test]
    fn test_pair_tokens() {
        assert_eq!(
            significant("id = GER_rhineland"),
            vec![Token::Word("id"), Token::Equals, Token::Word("GER_rhineland")]
        );
    }

    #[test]
    fn test_operators_longest_first() {
        assert_eq!(
            significant("a <= 1 b >= 2 c != 3 d < 4 e > 5"),
            vec![
                Token::Word("a"),
                Token::LessEquals,
                Token::Word("1"),
                Token::Word("b"),
                Token::GreaterEquals,
                Token::Word("2"),
                Token::Word("c"),
                Token::NotEquals,
                Token::Word("3"),
                Token::Word("d"),
                Token::Less,
                Token::Word("4"),
                Token::Word("e"),
                Token::Greater,
                Token::Word("5"),
            ]
        );
    }

    #[test]
    fn test_words_accept_script_punctuation() {
        assert_eq!(significant("1936.1.1"), vec![Token::Word("1936.1.1")]);
        assert_eq!(significant("-2.5"), vec![Token::Word("-2.5")]);
        assert_eq!(significant("@var"), vec![Token::Word("@var")]);
        assert_eq!(significant("ROOT:x"), vec![Token::Word("ROOT:x")]);
        assert_eq!(significant("Польша"), vec![Token::Word("Польша")]);
        assert_eq!(significant("Ärger"), vec![Token::Word("Ärger")]);
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        let tokens = tokenize("x = 1 # the { brace } is ignored\ny = 2").unwrap();
        let comment = tokens
            .iter()
            .find_map(|t| match t.token {
                Token::Comment(text) => Some(text),
                _ => None,
            })
            .unwrap();
        assert_eq!(comment, " the { brace } is ignored");
        assert_eq!(significant("x = 1 # c\ny = 2").len(), 6);
    }

    #[test]
    fn test_quoted_strings() {
        assert_eq!(
            significant(r#"icon = "GFX_goal_generic""#),
            vec![
                Token::Word("icon"),
                Token::Equals,
                Token::Quoted("GFX_goal_generic".to_string())
            ]
        );
        assert_eq!(
            significant(r#""say \"hi\"""#),
            vec![Token::Quoted("say \"hi\"".to_string())]
        );
        assert_eq!(significant("\"\""), vec![Token::Quoted(String::new())]);
    }

    #[test]
    fn test_byte_order_mark_is_whitespace() {
        let tokens = tokenize("\u{feff}focus_tree = {").unwrap();
        assert_eq!(tokens[0].token, Token::Whitespace);
        assert_eq!(tokens[1].token, Token::Word("focus_tree"));
        assert_eq!(tokens[1].span.start(), 3);
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("text = \"never closed").unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("x = 1 ¬ y = 2 ¬").unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert!(
            err.diagnostics()
                .iter()
                .all(|d| d.code() == Some(ErrorCode::E002))
        );
    }

    fn check_spans_cover_input(input: &str) -> Result<(), TestCaseError> {
        let tokens = tokenize(input).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let mut expected_start = 0;
        for token in &tokens {
            prop_assert_eq!(token.span.start(), expected_start);
            expected_start = token.span.end();
        }
        prop_assert_eq!(expected_start, input.len());
        Ok(())
    }

    proptest! {
        #[test]
        fn spans_cover_input(input in r#"[a-z0-9_ =<>{}\n#.\-]{0,64}"#) {
            check_spans_cover_input(&input)?;
        }
    }
}
