//! Tabula - sparse table grids with row and column spans.
//!
//! Tabula builds the grid behind tabular documents: cells that may span
//! several rows and columns, placed into a table that grows to fit them and
//! never lets two cells claim the same position. Writers (HTML templates,
//! CSV, ...) then walk the finished grid through a read-only view.
//!
//! - [`Cell`]: spans, keyed and anonymous content, type and style tags
//! - [`Table`]: placement, lookup, row-major iteration, extent
//! - [`BoundaryCondition`]: what placement does when positions are taken
//! - [`GridIndex`]: the position to anchor map behind the table
//!
//! # Quick Start
//!
//! ```rust
//! use tabula::{Cell, Table};
//!
//! let mut table = Table::new();
//! table.set_cell(Cell::new(2, 3)?.with_anonymous_content("name")?, 0, 0)?;
//! table.set_cell(Cell::new(3, 5)?.with_anonymous_content("address")?, 2, 1)?;
//!
//! // A spanning cell is visible from every position it covers...
//! assert_eq!(table.get_cell(1, 2).and_then(|c| c.anonymous_content()), Some(&serde_json::json!("name")));
//! // ...but is anchored only at its top-left corner.
//! assert!(table.is_anchor(0, 0));
//! assert!(!table.is_anchor(1, 2));
//!
//! let anchors: Vec<_> = table.cells().map(|(row, col, _)| (row, col)).collect();
//! assert_eq!(anchors, vec![(0, 0), (2, 1)]);
//! assert_eq!(table.extent(), (5, 6));
//! # Ok::<(), tabula::TableError>(())
//! ```
//!
//! # Boundary Conditions
//!
//! | Policy | Behavior on overlap |
//! |--------|---------------------|
//! | [`Clip`](BoundaryCondition::Clip) | Shrink the new cell per axis to stop before the first occupied row/column (default) |
//! | [`Reject`](BoundaryCondition::Reject) | Fail with [`TableError::Overlap`], table unchanged |
//! | [`Overwrite`](BoundaryCondition::Overwrite) | Take over the positions; fully covered cells are dropped |
//!
//! Clipping never rescues a placement whose anchor position is already
//! taken.

mod boundary;
mod cell;
mod content;
mod error;
mod grid;
pub mod hint;
mod properties;
mod table;

// Re-export public API
pub use boundary::BoundaryCondition;
pub use cell::{Cell, Content};
pub use content::UrlContent;
pub use error::{Result, TableError};
pub use grid::{Conflict, GridIndex, Position, Rect};
pub use properties::Properties;
pub use table::{Cells, Table};
