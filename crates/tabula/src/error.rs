//! Error types for the tabula crate.

use thiserror::Error;

use crate::grid::Position;

/// Errors that can occur when building cells or placing them in a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A row or column span smaller than one.
    #[error("invalid span {row_span}x{col_span}: both spans must be at least 1")]
    InvalidSpan { row_span: usize, col_span: usize },

    /// An empty key, tag or null value, or a placement outside the addressable grid.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The placement collides with a cell the active boundary condition cannot resolve.
    #[error("cell at {row}/{col} overlaps the cell anchored at {anchor}")]
    Overlap {
        row: usize,
        col: usize,
        anchor: Position,
    },
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
