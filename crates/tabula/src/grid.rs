//! Occupancy bookkeeping for the table grid.
//!
//! The grid is sparse: only covered positions are stored. Every covered
//! position maps to the anchor (top-left position) of the cell that owns it,
//! so a cell spanning many positions is stored once and looked up through
//! its anchor.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::{Result, TableError};

/// A `(row, col)` grid coordinate.
///
/// Ordering is row-major: rows first, then columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// The rectangle covered by a cell: `row_span` rows and `col_span` columns
/// starting at `anchor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub anchor: Position,
    pub row_span: usize,
    pub col_span: usize,
}

impl Rect {
    /// Builds a rectangle, failing if its far edge is not addressable.
    pub fn new(anchor: Position, row_span: usize, col_span: usize) -> Result<Self> {
        if anchor.row.checked_add(row_span).is_none() || anchor.col.checked_add(col_span).is_none()
        {
            return Err(TableError::InvalidArgument(
                "cell extends beyond the addressable grid",
            ));
        }
        Ok(Self {
            anchor,
            row_span,
            col_span,
        })
    }

    /// One past the last covered row.
    pub fn row_end(&self) -> usize {
        self.anchor.row + self.row_span
    }

    /// One past the last covered column.
    pub fn col_end(&self) -> usize {
        self.anchor.col + self.col_span
    }

    pub fn area(&self) -> usize {
        self.row_span.saturating_mul(self.col_span)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (self.anchor.row..self.row_end()).contains(&pos.row)
            && (self.anchor.col..self.col_end()).contains(&pos.col)
    }

    /// Covered positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.anchor.col..self.col_end();
        (self.anchor.row..self.row_end())
            .flat_map(move |row| cols.clone().map(move |col| Position::new(row, col)))
    }
}

/// Occupied positions found inside a requested rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conflict {
    /// Smallest row offset, relative to the rectangle's anchor, holding an occupied position.
    pub row_offset: usize,
    /// Smallest column offset, relative to the rectangle's anchor, holding an occupied position.
    pub col_offset: usize,
    /// First occupied position in row-major order.
    pub first: Position,
    /// Anchor of the cell owning `first`.
    pub owner: Position,
}

/// Maps every covered position to the anchor of the cell covering it.
#[derive(Clone, Debug, Default)]
pub struct GridIndex {
    occupancy: HashMap<Position, Position>,
    // Number of positions currently mapped to each anchor.
    owned: HashMap<Position, usize>,
}

impl GridIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor of the cell covering `pos`, if any.
    pub fn anchor_at(&self, pos: Position) -> Option<Position> {
        self.occupancy.get(&pos).copied()
    }

    /// Number of positions mapped to `anchor`.
    pub fn owned_by(&self, anchor: Position) -> usize {
        self.owned.get(&anchor).copied().unwrap_or(0)
    }

    /// Number of covered positions.
    pub fn len(&self) -> usize {
        self.occupancy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy.is_empty()
    }

    /// Finds the occupied positions inside `rect`.
    ///
    /// Row and column offsets are minimised independently, so they may come
    /// from different occupied positions.
    pub fn scan(&self, rect: &Rect) -> Option<Conflict> {
        let mut conflict: Option<Conflict> = None;
        let mut record = |pos: Position, owner: Position| {
            let row_offset = pos.row - rect.anchor.row;
            let col_offset = pos.col - rect.anchor.col;
            match conflict.as_mut() {
                None => {
                    conflict = Some(Conflict {
                        row_offset,
                        col_offset,
                        first: pos,
                        owner,
                    })
                }
                Some(c) => {
                    c.row_offset = c.row_offset.min(row_offset);
                    c.col_offset = c.col_offset.min(col_offset);
                    if pos < c.first {
                        c.first = pos;
                        c.owner = owner;
                    }
                }
            }
        };

        // Walk whichever side is smaller: the rectangle or the occupied set.
        if rect.area() <= self.occupancy.len() {
            for pos in rect.positions() {
                if let Some(&owner) = self.occupancy.get(&pos) {
                    record(pos, owner);
                }
            }
        } else {
            for (&pos, &owner) in &self.occupancy {
                if rect.contains(pos) {
                    record(pos, owner);
                }
            }
        }
        conflict
    }

    /// Maps every position of `rect` to `anchor`.
    ///
    /// Returns the distinct anchors that lost positions, in row-major order.
    pub fn claim(&mut self, rect: &Rect, anchor: Position) -> Vec<Position> {
        let mut displaced = Vec::new();
        for pos in rect.positions() {
            match self.occupancy.insert(pos, anchor) {
                Some(previous) if previous == anchor => continue,
                Some(previous) => {
                    self.disown(previous);
                    if !displaced.contains(&previous) {
                        displaced.push(previous);
                    }
                }
                None => {}
            }
            *self.owned.entry(anchor).or_insert(0) += 1;
        }
        displaced.sort();
        displaced
    }

    /// Unmaps the positions of `rect` that are still owned by `anchor`.
    pub fn release(&mut self, rect: &Rect, anchor: Position) {
        for pos in rect.positions() {
            if self.occupancy.get(&pos) == Some(&anchor) {
                self.occupancy.remove(&pos);
                self.disown(anchor);
            }
        }
    }

    fn disown(&mut self, anchor: Position) {
        if let Some(count) = self.owned.get_mut(&anchor) {
            *count -= 1;
            if *count == 0 {
                self.owned.remove(&anchor);
            }
        }
    }
}
