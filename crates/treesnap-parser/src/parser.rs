//! Parser from script tokens to the generic [`Block`] tree.
//!
//! The public entry point is [`build_tree`]. Trivia (whitespace, comments,
//! semicolons) is dropped before parsing. A file whose last block is missing
//! its closing `}` is accepted, since the game accepts it too.

use log::debug;
use winnow::{
    Parser as _,
    combinator::{alt, cut_err, opt, repeat},
    error::{ContextError, ErrMode, StrContext},
    stream::{Stream, TokenSlice},
    token::any,
};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
    tree::{Block, Item, Operator, Scalar, Value},
};

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Parse a bare word or quoted string.
fn scalar(input: &mut Input<'_>) -> IResult<Spanned<Scalar>> {
    any.verify_map(|token: &PositionedToken<'_>| match &token.token {
        Token::Word(word) => Some(Spanned::new(Scalar::bare(*word), token.span)),
        Token::Quoted(text) => Some(Spanned::new(Scalar::quoted(text.clone()), token.span)),
        _ => None,
    })
    .context(StrContext::Label("value"))
    .parse_next(input)
}

fn operator(input: &mut Input<'_>) -> IResult<Operator> {
    any.verify_map(|token: &PositionedToken<'_>| match token.token {
        Token::Equals => Some(Operator::Equals),
        Token::Less => Some(Operator::Less),
        Token::Greater => Some(Operator::Greater),
        Token::LessEquals => Some(Operator::LessEquals),
        Token::GreaterEquals => Some(Operator::GreaterEquals),
        Token::NotEquals => Some(Operator::NotEquals),
        _ => None,
    })
    .parse_next(input)
}

fn brace(input: &mut Input<'_>, open: bool) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| match token.token {
        Token::LeftBrace if open => Some(token.span),
        Token::RightBrace if !open => Some(token.span),
        _ => None,
    })
    .parse_next(input)
}

/// Parse `{ items }`. A missing `}` is accepted only at end of input.
fn block(input: &mut Input<'_>) -> IResult<Block> {
    let open = brace(input, true)?;
    let items = items.parse_next(input)?;

    let span = match opt(|i: &mut Input<'_>| brace(i, false)).parse_next(input)? {
        Some(close) => open.union(close),
        None if input.eof_offset() > 0 => {
            let mut e = ContextError::new();
            e.push(StrContext::Label("`}`"));
            return Err(ErrMode::Cut(e));
        }
        None => {
            debug!(offset = open.start(); "Block left open at end of input");
            items
                .last()
                .map_or(open, |item| open.union(item.value().span()))
        }
    };
    Ok(Block::new(items, span))
}

fn value(input: &mut Input<'_>) -> IResult<Value> {
    alt((block.map(Value::Block), scalar.map(Value::Scalar))).parse_next(input)
}

/// Parse `key <op> value`, or a lone scalar.
fn keyed_item(input: &mut Input<'_>) -> IResult<Item> {
    let key = scalar.parse_next(input)?;
    match opt(operator).parse_next(input)? {
        Some(op) => {
            let value = cut_err(value)
                .context(StrContext::Label("value after operator"))
                .parse_next(input)?;
            Ok(Item::Pair { key, op, value })
        }
        None => Ok(Item::Bare(Value::Scalar(key))),
    }
}

fn item(input: &mut Input<'_>) -> IResult<Item> {
    alt((keyed_item, block.map(|b| Item::Bare(Value::Block(b))))).parse_next(input)
}

fn items(input: &mut Input<'_>) -> IResult<Vec<Item>> {
    repeat(0.., item).parse_next(input)
}

/// Convert a parser failure into a diagnostic pointing at the offending token.
fn convert_error(error: ErrMode<ContextError>, next: Option<&PositionedToken<'_>>, eof: usize) -> Diagnostic {
    let expected: Vec<String> = match &error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e
            .context()
            .filter_map(|ctx| match ctx {
                StrContext::Label(label) => Some(format!("expected {label}")),
                _ => None,
            })
            .collect(),
        ErrMode::Incomplete(_) => Vec::new(),
    };
    let label = if expected.is_empty() {
        "unexpected token".to_string()
    } else {
        expected.join(" → ")
    };

    match next {
        Some(token) => Diagnostic::error(format!("unexpected {}", token.token))
            .with_code(ErrorCode::E100)
            .with_label(token.span, label),
        None => Diagnostic::error("unexpected end of input")
            .with_code(ErrorCode::E101)
            .with_label(Span::new(eof..eof), label)
            .with_help("complete the last statement"),
    }
}

/// Build the root block of a file from its tokens.
///
/// `source_len` is the byte length of the source, used for the root span
/// and end-of-input diagnostics.
pub fn build_tree(tokens: &[PositionedToken<'_>], source_len: usize) -> Result<Block, Diagnostic> {
    let significant: Vec<PositionedToken<'_>> = tokens
        .iter()
        .filter(|token| !token.token.is_trivia())
        .cloned()
        .collect();
    let mut input = TokenSlice::new(&significant);

    let root_items = match items.parse_next(&mut input) {
        Ok(items) => items,
        Err(e) => {
            let next = input.peek_token();
            return Err(convert_error(e, next, source_len));
        }
    };

    if let Some(stray) = input.peek_token() {
        let diagnostic = Diagnostic::error(format!("unexpected {}", stray.token));
        return Err(match stray.token {
            Token::RightBrace => diagnostic
                .with_code(ErrorCode::E102)
                .with_label(stray.span, ErrorCode::E102.description())
                .with_help("remove the extra `}` or open a matching block"),
            _ => diagnostic
                .with_code(ErrorCode::E100)
                .with_label(stray.span, "expected a key or value"),
        });
    }

    Ok(Block::new(root_items, Span::new(0..source_len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(source: &str) -> Result<Block, Diagnostic> {
        let tokens = tokenize(source).expect("source should tokenize");
        build_tree(&tokens, source.len())
    }

    fn scalar_text(value: &Value) -> &str {
        value.as_scalar().map(|s| s.inner().as_str()).unwrap_or("<block>")
    }

    #[test]
    fn test_flat_pairs() {
        let root = parse("id = GER_rhineland\nx = 3 y = 1").unwrap();
        assert_eq!(root.items().len(), 3);
        assert_eq!(scalar_text(root.get("id").unwrap()), "GER_rhineland");
        assert_eq!(scalar_text(root.get("y").unwrap()), "1");
    }

    #[test]
    fn test_nested_blocks() {
        let root = parse(
            "focus_tree = {\n  focus = {\n    id = a\n    prerequisite = { focus = b focus = c }\n  }\n}",
        )
        .unwrap();
        let tree = root.blocks("focus_tree").next().unwrap();
        let focus = tree.blocks("focus").next().unwrap();
        let prerequisite = focus.blocks("prerequisite").next().unwrap();
        let members: Vec<&str> = prerequisite.values("focus").map(scalar_text).collect();
        assert_eq!(members, ["b", "c"]);
    }

    #[test]
    fn test_comparison_operators() {
        let root = parse("limit = { num_of_factories > 10 }").unwrap();
        let limit = root.blocks("limit").next().unwrap();
        match &limit.items()[0] {
            Item::Pair { op, .. } => assert_eq!(*op, Operator::Greater),
            other => panic!("expected pair, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_lists_and_anonymous_blocks() {
        let root = parse(r#"fontfiles = { "gfx/fonts/a" "gfx/fonts/b" } color = { { 1 2 } }"#).unwrap();
        let files: Vec<&str> = root
            .blocks("fontfiles")
            .next()
            .unwrap()
            .bare_scalars()
            .map(|s| s.inner().as_str())
            .collect();
        assert_eq!(files, ["gfx/fonts/a", "gfx/fonts/b"]);

        let color = root.blocks("color").next().unwrap();
        assert!(matches!(color.items()[0], Item::Bare(Value::Block(_))));
    }

    #[test]
    fn test_missing_final_brace_is_tolerated() {
        let root = parse("focus_tree = {\n focus = { id = a }\n").unwrap();
        let tree = root.blocks("focus_tree").next().unwrap();
        assert_eq!(tree.blocks("focus").count(), 1);
    }

    #[test]
    fn test_semicolons_and_comments_are_ignored() {
        let root = parse("x = 1; # trailing\ny = 2;").unwrap();
        assert_eq!(root.items().len(), 2);
    }

    #[test]
    fn test_stray_closing_brace() {
        let err = parse("x = 1 }").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E102));
        assert_eq!(err.labels()[0].span(), Span::new(6..7));
    }

    #[test]
    fn test_operator_without_value() {
        let err = parse("x =").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E101));

        let err = parse("block = { x = }").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_stray_operator() {
        let err = parse("= x").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E100));

        let err = parse("block = { = x }").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_root_span_covers_source() {
        let source = "a = b";
        assert_eq!(parse(source).unwrap().span(), Span::new(0..source.len()));
    }
}
