//! Serializable snapshot of a table for templates.
//!
//! Templates cannot call back into a [`Table`], so writers flatten it into a
//! [`TableContext`]: one [`RowContext`] per grid row, each holding the cells
//! to emit in that row. A spanning cell appears once, in the row of its
//! anchor, and the positions it spans over are left out, which is exactly
//! the shape HTML `rowspan`/`colspan` expects. Uncovered positions become
//! filler cells.
//!
//! A cell that lost part of its rectangle to an overwrite is emitted with
//! the largest rectangle, starting at its anchor, that it still owns in
//! full. Positions it owns outside that rectangle become fillers, so the
//! emitted cells always tile the grid.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tabula::{Cell, Content, Position, Table};

use crate::renderer::{CellRenderer, RenderingContext};

/// A table flattened for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableContext {
    pub rows: usize,
    pub cols: usize,
    pub grid: Vec<RowContext>,
}

/// The cells emitted for one grid row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowContext {
    pub index: usize,
    pub cells: Vec<CellContext>,
}

/// One emitted cell: either an anchored table cell or a filler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellContext {
    pub row: usize,
    pub col: usize,
    /// Rows covered in the output. May be smaller than the cell's own span.
    pub row_span: usize,
    /// Columns covered in the output. May be smaller than the cell's own span.
    pub col_span: usize,
    /// No cell is anchored here and no anchored cell spans over it.
    pub filler: bool,
    /// Output of the [`CellRenderer`].
    pub rendered: String,
    pub content: BTreeMap<String, Content>,
    pub anonymous: Option<Content>,
    pub types: Vec<String>,
    pub styles: Vec<String>,
}

impl CellContext {
    fn anchored(
        row: usize,
        col: usize,
        spans: (usize, usize),
        cell: &Cell,
        rendered: String,
    ) -> Self {
        Self {
            row,
            col,
            row_span: spans.0,
            col_span: spans.1,
            filler: false,
            rendered,
            content: cell.contents().clone(),
            anonymous: cell.anonymous_content().cloned(),
            types: cell.types().map(String::from).collect(),
            styles: cell.styles().map(String::from).collect(),
        }
    }

    fn filler(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            row_span: 1,
            col_span: 1,
            filler: true,
            rendered: String::new(),
            content: BTreeMap::new(),
            anonymous: None,
            types: Vec::new(),
            styles: Vec::new(),
        }
    }
}

impl TableContext {
    /// Flattens `table`, rendering every anchored cell with `renderer`.
    pub fn build(table: &Table, renderer: &dyn CellRenderer, context: RenderingContext) -> Self {
        let (rows, cols) = table.extent();
        let emitted: HashMap<Position, (usize, usize)> = table
            .cells()
            .map(|(row, col, cell)| {
                let anchor = Position::new(row, col);
                (anchor, owned_spans(table, anchor, cell))
            })
            .collect();

        let mut grid = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut cells = Vec::new();
            for col in 0..cols {
                let pos = Position::new(row, col);
                match table.anchor_of(row, col) {
                    Some(anchor) if anchor == pos => {
                        if let (Some(cell), Some(&spans)) =
                            (table.get_cell(row, col), emitted.get(&pos))
                        {
                            let rendered = renderer.render_cell(cell, context);
                            cells.push(CellContext::anchored(row, col, spans, cell, rendered));
                        }
                    }
                    // Emitted with its anchor.
                    Some(anchor) if covers(&emitted, anchor, pos) => {}
                    // Empty, or owned by a cell outside the rectangle it is emitted with.
                    _ => cells.push(CellContext::filler(row, col)),
                }
            }
            grid.push(RowContext { index: row, cells });
        }

        Self { rows, cols, grid }
    }
}

/// Largest rectangle at `anchor`, within the cell's spans, whose positions
/// all still map to `anchor`. Columns are fixed by the anchor row first.
fn owned_spans(table: &Table, anchor: Position, cell: &Cell) -> (usize, usize) {
    let owns = |row: usize, col: usize| table.anchor_of(row, col) == Some(anchor);

    let col_span = (0..cell.col_span())
        .take_while(|&dc| owns(anchor.row, anchor.col + dc))
        .count()
        .max(1);
    let row_span = (0..cell.row_span())
        .take_while(|&dr| (0..col_span).all(|dc| owns(anchor.row + dr, anchor.col + dc)))
        .count()
        .max(1);
    (row_span, col_span)
}

fn covers(emitted: &HashMap<Position, (usize, usize)>, anchor: Position, pos: Position) -> bool {
    emitted.get(&anchor).is_some_and(|&(row_span, col_span)| {
        pos.row < anchor.row + row_span && pos.col < anchor.col + col_span
    })
}
