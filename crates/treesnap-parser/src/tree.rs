//! The generic script tree.
//!
//! Script files are sequences of items. An item is either a pair
//! `key <op> value` or a bare value, and a value is either a scalar or a
//! brace-delimited block of further items:
//!
//! ```text
//! focus = {                       Pair(focus, =, Block)
//!     id = GER_rhineland          Pair(id, =, Scalar)
//!     prerequisite = { focus = GER_army }
//!     x = 3
//! }
//! fontfiles = { "gfx/fonts/a" }   Pair(fontfiles, =, Block[Bare(Scalar)])
//! ```
//!
//! Key lookups on [`Block`] are ASCII case-insensitive, matching how the game
//! reads its own files.

use crate::span::{Span, Spanned};

/// A bare word or a quoted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    text: String,
    quoted: bool,
}

impl Scalar {
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
        }
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// ASCII case-insensitive comparison.
    pub fn is(&self, other: &str) -> bool {
        self.text.eq_ignore_ascii_case(other)
    }

    /// `yes`, case-insensitive.
    pub fn is_yes(&self) -> bool {
        self.is("yes")
    }
}

/// The operator between a key and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    NotEquals,
}

/// A value on the right of an operator, or a bare list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(Spanned<Scalar>),
    Block(Block),
}

impl Value {
    pub fn as_scalar(&self) -> Option<&Spanned<Scalar>> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            Value::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Value::Block(block) => Some(block),
            Value::Scalar(_) => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Value::Scalar(scalar) => scalar.span(),
            Value::Block(block) => block.span(),
        }
    }
}

/// One entry of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Pair {
        key: Spanned<Scalar>,
        op: Operator,
        value: Value,
    },
    Bare(Value),
}

impl Item {
    pub fn key(&self) -> Option<&Spanned<Scalar>> {
        match self {
            Item::Pair { key, .. } => Some(key),
            Item::Bare(_) => None,
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            Item::Pair { value, .. } | Item::Bare(value) => value,
        }
    }

    /// Returns `true` for a pair whose key matches `name` case-insensitively.
    pub fn has_key(&self, name: &str) -> bool {
        self.key().is_some_and(|key| key.inner().is(name))
    }
}

/// A sequence of items; the root of a file is a block too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    items: Vec<Item>,
    span: Span,
}

impl Block {
    pub fn new(items: Vec<Item>, span: Span) -> Self {
        Self { items, span }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the values of every pair keyed `name`.
    pub fn values<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Value> + use<'a, 'n> {
        self.items
            .iter()
            .filter(move |item| item.has_key(name))
            .map(Item::value)
    }

    /// Returns the value of the first pair keyed `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.items.iter().find(|item| item.has_key(name)).map(Item::value)
    }

    /// Returns the scalar of the first pair keyed `name`, if it is a scalar.
    pub fn scalar(&self, name: &str) -> Option<&Spanned<Scalar>> {
        self.get(name).and_then(Value::as_scalar)
    }

    /// Iterates over the blocks of every pair keyed `name`.
    pub fn blocks<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Block> + use<'a, 'n> {
        self.values(name).filter_map(Value::as_block)
    }

    /// Iterates over bare scalar entries, as in `{ "a" "b" }`.
    pub fn bare_scalars(&self) -> impl Iterator<Item = &Spanned<Scalar>> {
        self.items.iter().filter_map(|item| match item {
            Item::Bare(Value::Scalar(scalar)) => Some(scalar),
            _ => None,
        })
    }
}
