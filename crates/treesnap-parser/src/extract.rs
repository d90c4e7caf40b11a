//! Typed record extraction from script trees.
//!
//! Each extractor walks a parsed [`Block`] and maps the parts it recognises
//! into the records of [`treesnap_core::semantic`]. Unknown keys are ignored;
//! malformed values of known keys become diagnostics.

mod focus;
mod gfx;
mod gui;
mod loc;

pub use focus::extract_focus_tree;
pub use gfx::extract_sprite_catalog;
pub use gui::extract_focus_gui;
pub use loc::extract_localisation;

use treesnap_core::{
    geometry::{Point, Size},
    identifier::Id,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Spanned,
    tree::{Block, Scalar, Value},
};

/// Parse a numeric scalar, truncating any fractional part.
fn number(scalar: &Spanned<Scalar>, field: &str) -> Result<i32, Diagnostic> {
    let text = scalar.inner().as_str();
    text.parse::<i32>()
        .ok()
        .or_else(|| {
            text.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(|n| n.trunc() as i32)
        })
        .ok_or_else(|| {
            Diagnostic::error(format!("`{field}` is not a number"))
                .with_code(ErrorCode::E200)
                .with_label(scalar.span(), "expected a number")
        })
}

/// Read the first scalar pair `field` as a number, reporting bad values.
fn number_field(block: &Block, field: &str, collector: &mut DiagnosticCollector) -> Option<i32> {
    let value = block.get(field)?;
    let Some(scalar) = value.as_scalar() else {
        collector.emit(unexpected_block(value, field));
        return None;
    };
    number(scalar, field)
        .map_err(|diagnostic| collector.emit(diagnostic))
        .ok()
}

/// Read the first scalar pair `field` as an interned id.
fn id_field(block: &Block, field: &str) -> Option<Id> {
    block.scalar(field).map(|s| Id::new(s.inner().as_str()))
}

/// Read the first scalar pair `field` as text.
fn text_field<'a>(block: &'a Block, field: &str) -> Option<&'a str> {
    block.scalar(field).map(|s| s.inner().as_str())
}

/// Returns `true` when the first scalar pair `field` equals `expected`.
fn flag_field(block: &Block, field: &str, expected: &str) -> bool {
    block.scalar(field).is_some_and(|s| s.inner().is(expected))
}

/// Read a `position = { x = .. y = .. }` sub-block.
fn position_field(block: &Block, collector: &mut DiagnosticCollector) -> Point {
    block.blocks("position").next().map_or_else(Point::default, |position| {
        Point::new(
            number_field(position, "x", collector).unwrap_or(0),
            number_field(position, "y", collector).unwrap_or(0),
        )
    })
}

/// Read a `size = { width = .. height = .. }` sub-block.
fn size_field(block: &Block, collector: &mut DiagnosticCollector) -> Size {
    block.blocks("size").next().map_or_else(Size::default, |size| {
        Size::new(
            number_field(size, "width", collector).unwrap_or(0),
            number_field(size, "height", collector).unwrap_or(0),
        )
    })
}

fn unexpected_block(value: &Value, field: &str) -> Diagnostic {
    Diagnostic::error(format!("`{field}` must be a single value"))
        .with_code(ErrorCode::E202)
        .with_label(value.span(), "found a block")
}
