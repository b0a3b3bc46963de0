//! Property-based tests for grid placement using proptest.

use std::collections::HashMap;

use proptest::prelude::*;
use tabula::{BoundaryCondition, Cell, Position, Table, TableError};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct Placement {
    row: usize,
    col: usize,
    row_span: usize,
    col_span: usize,
}

fn placement_strategy() -> impl Strategy<Value = Placement> {
    (0usize..8, 0usize..8, 1usize..4, 1usize..4).prop_map(|(row, col, row_span, col_span)| {
        Placement {
            row,
            col,
            row_span,
            col_span,
        }
    })
}

fn policy_strategy() -> impl Strategy<Value = BoundaryCondition> {
    prop_oneof![Just(BoundaryCondition::Clip), Just(BoundaryCondition::Reject)]
}

fn build(placements: &[Placement], policy: BoundaryCondition) -> Table {
    let mut table = Table::with_boundary_condition(policy);
    for p in placements {
        let cell = Cell::new(p.row_span, p.col_span).unwrap();
        match table.set_cell(cell, p.row, p.col) {
            Ok(_) | Err(TableError::Overlap { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    table
}

/// Expected owner of every covered position, recomputed from the anchors.
fn coverage(table: &Table) -> HashMap<Position, Position> {
    let mut covered = HashMap::new();
    for (row, col, cell) in table.cells() {
        for r in row..row + cell.row_span() {
            for c in col..col + cell.col_span() {
                let previous = covered.insert(Position::new(r, c), Position::new(row, col));
                assert!(previous.is_none(), "position {r}/{c} covered twice");
            }
        }
    }
    covered
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Placed cells never end up with a zero span.
    #[test]
    fn spans_stay_positive(
        placements in prop::collection::vec(placement_strategy(), 0..30),
        policy in policy_strategy(),
    ) {
        let table = build(&placements, policy);
        for (_, _, cell) in table.cells() {
            prop_assert!(cell.row_span() >= 1);
            prop_assert!(cell.col_span() >= 1);
        }
    }

    /// Without overwrite, anchored rectangles never intersect and lookup
    /// agrees with them everywhere in (and just outside) the extent.
    #[test]
    fn rectangles_are_disjoint_and_lookup_matches(
        placements in prop::collection::vec(placement_strategy(), 0..30),
        policy in policy_strategy(),
    ) {
        let table = build(&placements, policy);
        let covered = coverage(&table);
        let (rows, cols) = table.extent();

        for row in 0..=rows {
            for col in 0..=cols {
                let expected = covered.get(&Position::new(row, col)).copied();
                prop_assert_eq!(table.anchor_of(row, col), expected);
                match expected {
                    Some(anchor) => {
                        let via_anchor = table.get_cell(anchor.row, anchor.col).unwrap();
                        let here = table.get_cell(row, col).unwrap();
                        prop_assert!(std::ptr::eq(via_anchor, here));
                    }
                    None => prop_assert!(table.get_cell(row, col).is_none()),
                }
            }
        }
    }

    /// Iteration yields each anchor once, in strictly increasing row-major order.
    #[test]
    fn iteration_is_strictly_row_major(
        placements in prop::collection::vec(placement_strategy(), 0..30),
        policy in policy_strategy(),
    ) {
        let table = build(&placements, policy);
        let anchors: Vec<Position> = table
            .cells()
            .map(|(row, col, _)| Position::new(row, col))
            .collect();
        for pair in anchors.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for anchor in &anchors {
            prop_assert!(table.is_anchor(anchor.row, anchor.col));
        }
    }

    /// The returned cell carries the effective spans seen by later lookups.
    #[test]
    fn returned_spans_match_stored_spans(
        placements in prop::collection::vec(placement_strategy(), 1..30),
    ) {
        let mut table = Table::new();
        for p in &placements {
            let cell = Cell::new(p.row_span, p.col_span).unwrap();
            if let Ok(placed) = table.set_cell(cell, p.row, p.col) {
                let spans = (placed.row_span(), placed.col_span());
                prop_assert!(spans.0 <= p.row_span && spans.1 <= p.col_span);
                let stored = table.get_cell(p.row, p.col).unwrap();
                prop_assert_eq!((stored.row_span(), stored.col_span()), spans);
            }
        }
    }

    /// A rejected placement leaves the table exactly as it was.
    #[test]
    fn reject_failure_is_side_effect_free(
        placements in prop::collection::vec(placement_strategy(), 0..20),
        extra in placement_strategy(),
    ) {
        let mut table = build(&placements, BoundaryCondition::Reject);
        let before: Vec<_> = table
            .cells()
            .map(|(r, c, cell)| (r, c, cell.row_span(), cell.col_span()))
            .collect();
        let extent = table.extent();

        let cell = Cell::new(extra.row_span, extra.col_span).unwrap();
        if table.set_cell(cell, extra.row, extra.col).is_err() {
            let after: Vec<_> = table
                .cells()
                .map(|(r, c, cell)| (r, c, cell.row_span(), cell.col_span()))
                .collect();
            prop_assert_eq!(before, after);
            prop_assert_eq!(table.extent(), extent);
        }
    }

    /// Under overwrite, every covered position resolves to a cell whose
    /// rectangle contains it, and the extent never shrinks.
    #[test]
    fn overwrite_keeps_lookup_consistent(
        placements in prop::collection::vec(placement_strategy(), 0..30),
    ) {
        let mut table = Table::with_boundary_condition(BoundaryCondition::Overwrite);
        let mut extent = (0, 0);
        for p in &placements {
            let cell = Cell::new(p.row_span, p.col_span).unwrap();
            table.set_cell(cell, p.row, p.col).unwrap();
            let now = table.extent();
            prop_assert!(now.0 >= extent.0 && now.1 >= extent.1);
            extent = now;

            for r in p.row..p.row + p.row_span {
                for c in p.col..p.col + p.col_span {
                    prop_assert_eq!(table.anchor_of(r, c), Some(Position::new(p.row, p.col)));
                }
            }
        }

        let (rows, cols) = table.extent();
        for row in 0..rows {
            for col in 0..cols {
                if let Some(anchor) = table.anchor_of(row, col) {
                    let cell = table.get_cell(row, col).unwrap();
                    prop_assert!(row >= anchor.row && row < anchor.row + cell.row_span());
                    prop_assert!(col >= anchor.col && col < anchor.col + cell.col_span());
                }
            }
        }
    }
}
