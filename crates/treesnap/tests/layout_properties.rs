//! Property tests over small random focus trees.

mod common;

use std::collections::{BTreeSet, HashMap};

use proptest::{prelude::*, sample::Index};

use common::{EXCLUSIVE_MID, child, focus};
use treesnap::{
    LayoutEngine, TreeLayout,
    config::AppConfig,
    draw::{LinkTile, RenderLayer},
    geometry::{GridPoint, Point},
    graph::FocusGraph,
    identifier::Id,
    layout::position::resolve_positions,
    semantic::{BranchCondition, Focus, FocusTree},
};

/// One generated focus: column, row, parent picks, grouped, suppressed.
type FocusSpec = (i32, i32, Vec<Index>, bool, bool);

fn name(i: usize) -> String {
    format!("f{i}")
}

fn build_tree(specs: Vec<FocusSpec>) -> FocusTree {
    specs
        .into_iter()
        .enumerate()
        .map(|(i, (x, y, picks, grouped, suppressed))| {
            let mut focus = Focus::new(Id::new(&name(i))).with_position(x, y + i as i32);
            if i > 0 {
                let mut parents: Vec<Id> = picks
                    .iter()
                    .map(|pick| Id::new(&name(pick.index(i))))
                    .collect();
                parents.dedup();
                if grouped {
                    focus = focus.with_prerequisite_group(parents);
                } else {
                    for parent in parents {
                        focus = focus.with_prerequisite_group([parent]);
                    }
                }
            }
            if suppressed {
                focus = focus.with_branch_condition(BranchCondition::AlwaysNo);
            }
            focus
        })
        .collect()
}

fn tree_strategy() -> impl Strategy<Value = FocusTree> {
    prop::collection::vec(
        (
            0i32..6,
            0i32..2,
            prop::collection::vec(any::<Index>(), 0..3),
            any::<bool>(),
            prop::bool::weighted(0.15),
        ),
        1..=6,
    )
    .prop_map(build_tree)
}

/// Relative chains: each focus anchors on an earlier one or none, then the
/// declaration order is shuffled.
fn chain_strategy() -> impl Strategy<Value = Vec<(usize, Option<usize>, GridPoint)>> {
    prop::collection::vec(
        (proptest::option::of(any::<Index>()), -3i32..4, 0i32..3),
        1..=8,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (anchor, dx, dy))| {
                let anchor = if i > 0 { anchor.map(|a| a.index(i)) } else { None };
                (i, anchor, GridPoint::new(dx, dy))
            })
            .collect::<Vec<_>>()
    })
    .prop_shuffle()
}

fn lay_out(tree: &FocusTree) -> TreeLayout {
    LayoutEngine::new(&AppConfig::default())
        .layout(tree, &common::assets())
        .expect("generated trees have no cycles or duplicates")
}

fn check_chains_resolve(chain: Vec<(usize, Option<usize>, GridPoint)>) -> Result<(), TestCaseError> {
    let tree: FocusTree = chain
        .iter()
        .map(|&(i, anchor, offset)| {
            let focus = Focus::new(Id::new(&name(i))).with_position(offset.x(), offset.y());
            match anchor {
                Some(anchor) => focus.with_relative_to(Id::new(&name(anchor))),
                None => focus,
            }
        })
        .collect();
    let mut graph = FocusGraph::from_tree(&tree).expect("unique ids");

    let passes = resolve_positions(&mut graph).expect("acyclic chains resolve");
    prop_assert!(passes <= chain.len());

    let specs: HashMap<usize, (Option<usize>, GridPoint)> = chain
        .iter()
        .map(|&(i, anchor, offset)| (i, (anchor, offset)))
        .collect();
    for &(i, _, _) in &chain {
        let mut expected = GridPoint::default();
        let mut current = Some(i);
        while let Some(index) = current {
            let (anchor, offset) = specs[&index];
            expected = expected + offset;
            current = anchor;
        }
        let node = graph.get(Id::new(&name(i))).expect("node exists");
        prop_assert_eq!(node.position(), expected);
        prop_assert!(node.pending_anchor().is_none());
    }
    Ok(())
}

fn check_children_sorted_by_column(tree: FocusTree) -> Result<(), TestCaseError> {
    let layout = lay_out(&tree);
    let graph = layout.graph();
    for (_, node) in graph.nodes() {
        let columns: Vec<i32> = node
            .children()
            .iter()
            .map(|child| graph.node(child.node).x())
            .collect();
        prop_assert!(columns.windows(2).all(|pair| pair[0] <= pair[1]));
    }
    Ok(())
}

fn check_hidden_is_closed_downward(tree: FocusTree) -> Result<(), TestCaseError> {
    let layout = lay_out(&tree);
    let graph = layout.graph();
    for (_, node) in graph.nodes() {
        if node.focus().branch_conditions().contains(&BranchCondition::AlwaysNo) {
            prop_assert!(!node.is_visible());
        }
        if !node.is_visible() {
            for child in node.children() {
                prop_assert!(!graph.node(child.node).is_visible());
            }
        }
    }
    Ok(())
}

fn check_masks_select_tiles(tree: FocusTree) -> Result<(), TestCaseError> {
    let layout = lay_out(&tree);
    for (_, node) in layout.graph().nodes() {
        for (&row, &mask) in node.incoming() {
            prop_assert!(
                LinkTile::from_mask(mask).is_some(),
                "incoming mask {} at row {} of {}",
                mask.bits(),
                row,
                node.id()
            );
        }
        let outgoing = node.outgoing();
        prop_assert!(outgoing.is_empty() || LinkTile::from_mask(outgoing).is_some());
        if !node.is_visible() {
            prop_assert!(node.incoming().is_empty());
            prop_assert!(outgoing.is_empty());
        }
    }
    Ok(())
}

/// Exclusion partners per focus, by declaration index, on a single row.
type ExclusionRow = Vec<(i32, BTreeSet<usize>)>;

fn exclusion_row_strategy() -> impl Strategy<Value = ExclusionRow> {
    (2usize..=6)
        .prop_flat_map(|n| {
            (
                Just((0i32..10).collect::<Vec<_>>()).prop_shuffle(),
                prop::collection::vec(prop::collection::btree_set(0..n, 0..n), n),
            )
        })
        .prop_map(|(columns, partners)| {
            partners
                .into_iter()
                .enumerate()
                .map(|(i, mut partners)| {
                    partners.remove(&i);
                    (columns[i], partners)
                })
                .collect()
        })
}

/// Mid piece position of a span from column `left` over `dx` columns, with
/// the fixture geometry: anchor (171 + 96 * left, 113), link width 32,
/// span factor 3, right cap offset (10, -5).
fn mid_position(left: i32, dx: i32) -> Point {
    let anchor = Point::new(171 + 96 * left, 113);
    if dx == 2 {
        anchor
    } else {
        let line_size = (dx - 2) * 3 * 32;
        anchor.offset(line_size / 2 + 10, -5)
    }
}

fn check_exclusion_spans_unshadowed(row: ExclusionRow) -> Result<(), TestCaseError> {
    let tree: FocusTree = row
        .iter()
        .enumerate()
        .map(|(i, (column, partners))| {
            partners.iter().fold(focus(&name(i), *column, 0), |focus, &partner| {
                focus.with_mutually_exclusive(Id::new(&name(partner)))
            })
        })
        .collect();

    let mut expected = Vec::new();
    for (left, partners) in &row {
        let partner_columns: Vec<i32> = partners.iter().map(|&p| row[p].0).collect();
        for &right in &partner_columns {
            let dx = right - left;
            let shadowed = partner_columns
                .iter()
                .any(|&between| *left < between && between < right);
            if dx >= 2 && !shadowed {
                expected.push(mid_position(*left, dx));
            }
        }
    }

    let layout = lay_out(&tree);
    let mut mids: Vec<Point> = layout
        .draw_list()
        .layer(RenderLayer::Exclusive)
        .filter(|intent| {
            intent
                .graphic()
                .sprite_frame()
                .is_some_and(|frame| frame.sprite() == Id::new(EXCLUSIVE_MID))
        })
        .map(|intent| intent.position())
        .collect();
    mids.sort_by_key(|point| (point.x(), point.y()));
    expected.sort_by_key(|point| (point.x(), point.y()));
    prop_assert_eq!(mids, expected);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Straight,
    Right,
}

const U: u8 = 1;
const D: u8 = 2;
const L: u8 = 4;
const R: u8 = 8;
const S: u8 = 16;

/// Child corner sides by column relation, first sibling and last sibling.
const CORNER_SIDES: [(Side, bool, bool, u8); 12] = [
    (Side::Left, true, true, D | R),
    (Side::Left, true, false, D | R),
    (Side::Left, false, true, D | R | L),
    (Side::Left, false, false, D | R | L),
    (Side::Straight, true, true, U | D),
    (Side::Straight, true, false, U | D | R),
    (Side::Straight, false, true, U | D | L),
    (Side::Straight, false, false, U | D | L | R),
    (Side::Right, true, true, D | L),
    (Side::Right, true, false, D | L | R),
    (Side::Right, false, true, D | L),
    (Side::Right, false, false, D | L | R),
];

/// Parent corner sides contributed by each column relation.
const PARENT_SIDES: [(Side, u8); 3] = [
    (Side::Left, U | L),
    (Side::Straight, U | D),
    (Side::Right, U | R),
];

const ROOT_COLUMN: i32 = 3;

fn side_of(column: i32) -> Side {
    match column.cmp(&ROOT_COLUMN) {
        std::cmp::Ordering::Less => Side::Left,
        std::cmp::Ordering::Equal => Side::Straight,
        std::cmp::Ordering::Greater => Side::Right,
    }
}

/// Every tree of a root, an alternate prerequisite and one to four children
/// on the next row, each child in columns 1 to 5 and mandatory or not.
#[test]
fn masks_match_oracle_for_every_small_tree() {
    for child_count in 1..=4u32 {
        for code in 0..10usize.pow(child_count) {
            let children: Vec<(i32, bool)> = (0..child_count)
                .map(|i| {
                    let digit = code / 10usize.pow(i) % 10;
                    (1 + (digit / 2) as i32, digit % 2 == 0)
                })
                .collect();

            let mut focuses = vec![focus("root", ROOT_COLUMN, 0), focus("alt", 0, 5)];
            for (i, &(column, mandatory)) in children.iter().enumerate() {
                let group: &[&str] = if mandatory { &["root"] } else { &["root", "alt"] };
                focuses.push(child(&name(i), column, 1, group));
            }
            let layout = lay_out(&FocusTree::new(focuses));
            let graph = layout.graph();

            // Stable order by column, as the children are attached.
            let mut order: Vec<usize> = (0..children.len()).collect();
            order.sort_by_key(|&i| children[i].0);

            let any_mandatory = children.iter().any(|&(_, mandatory)| mandatory);
            let mut outgoing = if any_mandatory { S } else { 0 };
            for (position, &i) in order.iter().enumerate() {
                let (column, mandatory) = children[i];
                let side = side_of(column);
                let first = position == 0;
                let last = position + 1 == order.len();

                let (_, _, _, sides) = CORNER_SIDES
                    .iter()
                    .find(|entry| (entry.0, entry.1, entry.2) == (side, first, last))
                    .copied()
                    .expect("oracle covers every case");
                let solid = mandatory
                    || children.iter().any(|&(sibling, sibling_mandatory)| {
                        sibling_mandatory
                            && match side {
                                Side::Left => sibling < column,
                                Side::Right => sibling > column,
                                Side::Straight => true,
                            }
                    });
                let expected = sides | if solid { S } else { 0 };

                let mask = graph.get(Id::new(&name(i))).expect("child").incoming_at(0);
                assert_eq!(mask.bits(), expected, "child {i} of {children:?}");
                assert!(LinkTile::from_mask(mask).is_some(), "illegal mask for {children:?}");

                let (_, parent_sides) = PARENT_SIDES
                    .iter()
                    .find(|entry| entry.0 == side)
                    .copied()
                    .expect("oracle covers every side");
                outgoing |= parent_sides;
            }

            let root = graph.get(Id::new("root")).expect("root").outgoing();
            assert_eq!(root.bits(), outgoing, "root of {children:?}");
            assert!(LinkTile::from_mask(root).is_some());
        }
    }
}

proptest! {
    #[test]
    fn chains_resolve(chain in chain_strategy()) {
        check_chains_resolve(chain)?;
    }

    #[test]
    fn children_sorted_by_column(tree in tree_strategy()) {
        check_children_sorted_by_column(tree)?;
    }

    #[test]
    fn hidden_is_closed_downward(tree in tree_strategy()) {
        check_hidden_is_closed_downward(tree)?;
    }

    #[test]
    fn masks_select_tiles(tree in tree_strategy()) {
        check_masks_select_tiles(tree)?;
    }

    #[test]
    fn exclusion_spans_unshadowed(row in exclusion_row_strategy()) {
        check_exclusion_spans_unshadowed(row)?;
    }
}
