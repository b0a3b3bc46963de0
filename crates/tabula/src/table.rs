//! The table: cell placement, lookup and iteration.
//!
//! Placement resolves overlaps according to a [`BoundaryCondition`]:
//!
//! | Policy | Anchor taken | Only the tail overlaps |
//! |--------|--------------|------------------------|
//! | `Clip` | error | spans shrink to the first occupied row/column |
//! | `Reject` | error | error |
//! | `Overwrite` | takes over | takes over |
//!
//! Clipping works per axis: the row span stops at the first row offset that
//! holds any occupied position of the requested rectangle, the column span
//! at the first such column offset. Both are kept at one or more.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::FusedIterator;

use tracing::debug;

use crate::boundary::BoundaryCondition;
use crate::cell::Cell;
use crate::error::{Result, TableError};
use crate::grid::{GridIndex, Position, Rect};
use crate::properties::Properties;

/// A sparse grid of cells that may span several rows and columns.
///
/// The grid grows to fit whatever is placed in it. Build it through
/// [`set_cell`](Self::set_cell), then hand out `&Table` to renderers: every
/// read accessor takes `&self`.
///
/// # Example
///
/// ```rust
/// use tabula::{BoundaryCondition, Cell, Table};
///
/// let mut table = Table::with_boundary_condition(BoundaryCondition::Clip);
/// table.set_cell(Cell::new(1, 5)?, 0, 4)?;
///
/// // Columns 4.. are taken, so this cell is clipped to two columns.
/// let placed = table.set_cell(Cell::new(1, 3)?, 0, 2)?;
/// assert_eq!(placed.col_span(), 2);
///
/// assert!(table.is_anchor(0, 2));
/// assert!(!table.is_anchor(0, 3));
/// assert_eq!(table.extent(), (1, 9));
/// # Ok::<(), tabula::TableError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Table {
    grid: GridIndex,
    cells: BTreeMap<Position, Cell>,
    rows: usize,
    cols: usize,
    boundary_condition: BoundaryCondition,
    properties: Properties,
}

impl Table {
    /// Creates an empty table using the default [`BoundaryCondition::Clip`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with the given default boundary condition.
    pub fn with_boundary_condition(boundary_condition: BoundaryCondition) -> Self {
        Self {
            boundary_condition,
            ..Self::default()
        }
    }

    pub fn boundary_condition(&self) -> BoundaryCondition {
        self.boundary_condition
    }

    /// Changes the policy used by later [`set_cell`](Self::set_cell) calls.
    pub fn set_boundary_condition(&mut self, boundary_condition: BoundaryCondition) {
        self.boundary_condition = boundary_condition;
    }

    /// Document-level properties. Placement never reads them.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    // ========================================================================
    // Placement
    // ========================================================================

    /// Places `cell` with its anchor at `row`/`col` using the table's
    /// boundary condition.
    ///
    /// Returns the stored cell, whose spans reflect any clipping.
    pub fn set_cell(&mut self, cell: Cell, row: usize, col: usize) -> Result<&Cell> {
        self.set_cell_with(cell, row, col, self.boundary_condition)
    }

    /// Places `cell` with an explicit boundary condition for this call only.
    pub fn set_cell_with(
        &mut self,
        mut cell: Cell,
        row: usize,
        col: usize,
        boundary_condition: BoundaryCondition,
    ) -> Result<&Cell> {
        let anchor = Position::new(row, col);
        let requested = Rect::new(anchor, cell.row_span(), cell.col_span())?;

        let conflict = self.grid.scan(&requested);
        if boundary_condition != BoundaryCondition::Overwrite
            && self.cells.contains_key(&anchor)
            && self.grid.anchor_at(anchor) != Some(anchor)
        {
            // A partially overwritten cell is still stored here although its
            // anchor position was released.
            debug!(%anchor, "Anchor belongs to a partially overwritten cell");
            return Err(TableError::Overlap { row, col, anchor });
        }

        let rect = match conflict {
            None => requested,
            Some(conflict) => match boundary_condition {
                BoundaryCondition::Reject => {
                    debug!(%anchor, first = %conflict.first, owner = %conflict.owner, "Rejected overlapping cell");
                    return Err(TableError::Overlap {
                        row: conflict.first.row,
                        col: conflict.first.col,
                        anchor: conflict.owner,
                    });
                }
                BoundaryCondition::Clip => {
                    if let Some(owner) = self.grid.anchor_at(anchor) {
                        debug!(%anchor, %owner, "Cannot clip cell whose anchor is occupied");
                        return Err(TableError::Overlap { row, col, anchor: owner });
                    }
                    let row_span = conflict.row_offset.max(1);
                    let col_span = conflict.col_offset.max(1);
                    debug!(
                        %anchor,
                        from = ?(cell.row_span(), cell.col_span()),
                        to = ?(row_span, col_span),
                        "Clipped cell"
                    );
                    cell.clip_to(row_span, col_span)?;
                    Rect::new(anchor, row_span, col_span)?
                }
                BoundaryCondition::Overwrite => requested,
            },
        };

        Ok(self.commit(cell, rect))
    }

    fn commit(&mut self, cell: Cell, rect: Rect) -> &Cell {
        let anchor = rect.anchor;

        // A cell previously anchored here would otherwise keep positions
        // outside the new rectangle pointing at the new cell.
        if let Some(previous) = self.cells.remove(&anchor) {
            let old = Rect {
                anchor,
                row_span: previous.row_span(),
                col_span: previous.col_span(),
            };
            self.grid.release(&old, anchor);
            debug!(%anchor, "Replaced cell at its own anchor");
        }

        for displaced in self.grid.claim(&rect, anchor) {
            if self.grid.owned_by(displaced) == 0 {
                self.cells.remove(&displaced);
                debug!(%anchor, %displaced, "Evicted fully overwritten cell");
            } else {
                debug!(%anchor, %displaced, "Partially overwrote cell");
            }
        }

        self.rows = self.rows.max(rect.row_end());
        self.cols = self.cols.max(rect.col_end());
        self.cells.entry(anchor).or_insert(cell)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// The cell covering `row`/`col`, whether anchored there or spanning over it.
    pub fn get_cell(&self, row: usize, col: usize) -> Option<&Cell> {
        let anchor = self.grid.anchor_at(Position::new(row, col))?;
        self.cells.get(&anchor)
    }

    /// Anchor of the cell covering `row`/`col`.
    pub fn anchor_of(&self, row: usize, col: usize) -> Option<Position> {
        self.grid.anchor_at(Position::new(row, col))
    }

    /// Whether a cell is anchored at `row`/`col`.
    ///
    /// Renderers use this to emit each cell once and skip the positions it
    /// merely spans over.
    pub fn is_anchor(&self, row: usize, col: usize) -> bool {
        let pos = Position::new(row, col);
        self.grid.anchor_at(pos) == Some(pos)
    }

    /// `(rows, cols)`: one past the largest row and column ever covered.
    ///
    /// The extent never shrinks, even when overwritten cells are evicted.
    pub fn extent(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Anchored cells as `(row, col, cell)` in row-major order.
    ///
    /// Each call starts a fresh traversal.
    pub fn cells(&self) -> Cells<'_> {
        Cells {
            inner: self.cells.iter(),
            grid: &self.grid,
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (usize, usize, &'a Cell);
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells()
    }
}

/// Iterator over the anchored cells of a [`Table`], in row-major order.
///
/// Created by [`Table::cells`].
#[derive(Debug, Clone)]
pub struct Cells<'a> {
    inner: btree_map::Iter<'a, Position, Cell>,
    grid: &'a GridIndex,
}

impl<'a> Iterator for Cells<'a> {
    type Item = (usize, usize, &'a Cell);

    fn next(&mut self) -> Option<Self::Item> {
        // Cells whose anchor was overwritten stay reachable through their
        // remaining positions but are no longer anchors.
        let grid = self.grid;
        self.inner
            .by_ref()
            .find(|(pos, _)| grid.anchor_at(**pos) == Some(**pos))
            .map(|(pos, cell)| (pos.row, pos.col, cell))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl FusedIterator for Cells<'_> {}
