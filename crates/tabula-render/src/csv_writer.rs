//! Spreadsheet-style CSV output.
//!
//! Each grid row becomes one record with one field per grid column. A cell
//! is written once, at its anchor; the positions it spans over and
//! uncovered positions are empty fields.

use std::fs;
use std::io;
use std::path::Path;

use tabula::Table;
use tracing::info;

use crate::error::RenderError;
use crate::renderer::{CellRenderer, DefaultRenderer, RenderingContext};

/// Writes tables as CSV.
pub struct CsvWriter {
    renderer: Box<dyn CellRenderer>,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvWriter {
    /// Creates a writer using the [`DefaultRenderer`].
    pub fn new() -> Self {
        Self {
            renderer: Box::new(DefaultRenderer),
        }
    }

    /// Replaces the cell renderer.
    pub fn with_renderer(mut self, renderer: impl CellRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Renders `table` as a CSV document.
    pub fn render_to_string(&self, table: &Table) -> Result<String, RenderError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        self.write_records(table, &mut wtr)?;
        let bytes = wtr.into_inner()?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Writes `table` as CSV into `path`, creating parent directories.
    pub fn write(&self, table: &Table, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        info!(path = %path.display(), "Writing output file");
        let mut wtr = csv::Writer::from_path(path)?;
        self.write_records(table, &mut wtr)?;
        wtr.flush()?;
        Ok(())
    }

    /// Writes one record per grid row into `wtr`.
    ///
    /// Use this with a writer from [`csv::WriterBuilder`] to pick the
    /// delimiter or quoting style. The writer is not flushed.
    pub fn write_records<W: io::Write>(
        &self,
        table: &Table,
        wtr: &mut csv::Writer<W>,
    ) -> Result<(), RenderError> {
        let (rows, cols) = table.extent();
        for row in 0..rows {
            let record: Vec<String> = (0..cols)
                .map(|col| match table.get_cell(row, col) {
                    Some(cell) if table.is_anchor(row, col) => {
                        self.renderer.render_cell(cell, RenderingContext::Csv)
                    }
                    _ => String::new(),
                })
                .collect();
            wtr.write_record(&record)?;
        }
        Ok(())
    }
}
