//! Token definitions for the script dialect.

use std::fmt;

use crate::span::Span;

/// A lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'src> {
    /// A bare word: identifiers, numbers, dates, `yes`/`no`.
    Word(&'src str),
    /// A double-quoted string with the quotes removed.
    Quoted(String),

    Equals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    NotEquals,

    LeftBrace,
    RightBrace,
    Semicolon,

    /// `#` to end of line, without the `#`.
    Comment(&'src str),
    Whitespace,
    Newline,
}

impl Token<'_> {
    /// Returns `true` for tokens the parser skips.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Comment(_) | Token::Whitespace | Token::Newline | Token::Semicolon
        )
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => write!(f, "`{word}`"),
            Token::Quoted(text) => write!(f, "\"{text}\""),
            Token::Equals => write!(f, "`=`"),
            Token::Less => write!(f, "`<`"),
            Token::Greater => write!(f, "`>`"),
            Token::LessEquals => write!(f, "`<=`"),
            Token::GreaterEquals => write!(f, "`>=`"),
            Token::NotEquals => write!(f, "`!=`"),
            Token::LeftBrace => write!(f, "`{{`"),
            Token::RightBrace => write!(f, "`}}`"),
            Token::Semicolon => write!(f, "`;`"),
            Token::Comment(_) => write!(f, "comment"),
            Token::Whitespace => write!(f, "whitespace"),
            Token::Newline => write!(f, "newline"),
        }
    }
}

/// A token with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}
