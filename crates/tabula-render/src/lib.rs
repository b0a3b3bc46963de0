//! Writers for tabula tables.
//!
//! The [`tabula`] crate builds the grid; this crate turns a finished
//! [`Table`](tabula::Table) into output. Writers only read the table, so
//! several of them can share one.
//!
//! - [`TemplateWriter`]: MiniJinja templates, with a built-in HTML table
//! - [`CsvWriter`]: one CSV record per grid row
//! - [`CellRenderer`]: how a single cell's content becomes text
//!
//! # Example
//!
//! ```rust
//! use tabula::{hint, Cell, Table};
//! use tabula_render::{CsvWriter, TemplateWriter, WriterConfig};
//!
//! let mut table = Table::new();
//! table.set_cell(Cell::new(1, 2)?.with_anonymous_content("Share")?, 0, 0)?;
//! table.set_cell(
//!     Cell::default().with_anonymous_content(0.42)?.with_type(hint::PERCENTAGE)?,
//!     1,
//!     1,
//! )?;
//!
//! let csv = CsvWriter::new().render_to_string(&table)?;
//! assert_eq!(csv, "Share,\n,42.0%\n");
//!
//! let html = TemplateWriter::new(WriterConfig::default())?.render_to_string(&table)?;
//! assert!(html.contains("<td>42.0%</td>"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod context;
pub mod csv_writer;
mod error;
pub mod renderer;
pub mod template;

pub use config::{WriterConfig, DEFAULT_TEMPLATE_NAME};
pub use context::{CellContext, RowContext, TableContext};
pub use csv_writer::CsvWriter;
pub use error::RenderError;
pub use renderer::{CellRenderer, DefaultRenderer, RenderingContext, VALUE_KEY};
pub use template::TemplateWriter;
