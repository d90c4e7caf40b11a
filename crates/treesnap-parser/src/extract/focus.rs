//! Focus records from `common/national_focus/*.txt`.

use log::{debug, trace};
use treesnap_core::{
    identifier::Id,
    semantic::{BranchCondition, Focus, FocusTree},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    extract::{id_field, number_field},
    span::Span,
    tree::{Block, Item, Value},
};

/// Extract every `focus` and `shared_focus` block, at any depth, in
/// declaration order.
pub fn extract_focus_tree(root: &Block) -> Result<FocusTree, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut tree = FocusTree::default();

    // Depth-first, children pushed in reverse to keep declaration order.
    let mut pending: Vec<&Block> = vec![root];
    while let Some(block) = pending.pop() {
        let mut nested = Vec::new();
        for item in block.items() {
            let Item::Pair {
                key,
                value: Value::Block(body),
                ..
            } = item
            else {
                continue;
            };
            if key.inner().is("focus") || key.inner().is("shared_focus") {
                if let Some(focus) = extract_focus(body, key.span(), &mut collector) {
                    trace!(focus:% = focus.id(); "Extracted focus");
                    tree.push(focus);
                }
            } else {
                nested.push(body);
            }
        }
        pending.extend(nested.into_iter().rev());
    }

    debug!(focus_count = tree.len(); "Focus tree extracted");
    collector.finish_with(tree)
}

fn extract_focus(body: &Block, key_span: Span, collector: &mut DiagnosticCollector) -> Option<Focus> {
    let Some(id) = id_field(body, "id") else {
        collector.emit(
            Diagnostic::error("focus has no `id`")
                .with_code(ErrorCode::E201)
                .with_label(key_span.union(body.span()), "this focus block")
                .with_help("add `id = <name>` to the block"),
        );
        return None;
    };

    let mut focus = Focus::new(id).with_position(
        number_field(body, "x", collector).unwrap_or(0),
        number_field(body, "y", collector).unwrap_or(0),
    );

    if let Some(icon) = icon(body) {
        focus = focus.with_icon(icon);
    }
    if let Some(text) = id_field(body, "text") {
        focus = focus.with_text(text);
    }
    if let Some(anchor) = id_field(body, "relative_position_id") {
        focus = focus.with_relative_to(anchor);
    }

    for group in body.blocks("prerequisite") {
        focus = focus.with_prerequisite_group(focus_refs(group));
    }
    for exclusive in body.blocks("mutually_exclusive") {
        for other in focus_refs(exclusive) {
            focus = focus.with_mutually_exclusive(other);
        }
    }
    for allow in body.blocks("allow_branch") {
        for condition in branch_conditions(allow) {
            focus = focus.with_branch_condition(condition);
        }
    }
    if body.blocks("available").any(|available| !available.is_empty()) {
        focus = focus.with_available(false);
    }

    Some(focus)
}

/// `icon = GFX_x`, or the first `icon = { value = GFX_x ... }`.
fn icon(body: &Block) -> Option<Id> {
    body.values("icon").find_map(|value| match value {
        Value::Scalar(scalar) => Some(Id::new(scalar.inner().as_str())),
        Value::Block(block) => id_field(block, "value"),
    })
}

/// Every `focus = <id>` inside a block.
fn focus_refs(block: &Block) -> Vec<Id> {
    block
        .values("focus")
        .filter_map(Value::as_scalar)
        .map(|scalar| Id::new(scalar.inner().as_str()))
        .collect()
}

fn branch_conditions(allow: &Block) -> Vec<BranchCondition> {
    let mut conditions = Vec::new();
    for item in allow.items() {
        let Item::Pair { key, value, .. } = item else {
            continue;
        };
        match value {
            Value::Scalar(scalar) if key.inner().is("always") && scalar.inner().is("no") => {
                conditions.push(BranchCondition::AlwaysNo);
            }
            Value::Scalar(scalar) if key.inner().is("has_country_flag") => {
                conditions.push(BranchCondition::CountryFlag(Id::new(scalar.inner().as_str())));
            }
            Value::Block(negated) if key.inner().is("not") => {
                conditions.extend(
                    negated
                        .values("has_dlc")
                        .filter_map(Value::as_scalar)
                        .map(|dlc| BranchCondition::NotDlc(Id::new(dlc.inner().as_str()))),
                );
            }
            _ => {}
        }
    }
    conditions
}
