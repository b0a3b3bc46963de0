//! Template-based table output.
//!
//! [`TemplateWriter`] renders a table through a MiniJinja template. Out of
//! the box it produces an HTML `<table>`; point
//! [`WriterConfig::template_dir`] at a directory to use your own templates.
//!
//! # Template Context
//!
//! | Variable | Content |
//! |----------|---------|
//! | `table` | the [`TableContext`]: `rows`, `cols`, `grid[].cells[]` |
//! | `rendering_context` | `"template"` |
//! | `css_file` | the configured stylesheet, if any |
//! | anything else | table properties, then config properties (config wins) |
//!
//! Templates whose name ends in `.html`, `.htm` or `.xml` (optionally
//! followed by `.jinja`/`.j2`) are auto-escaped. Each cell's `rendered`
//! field is already escaped by its renderer and must be emitted with
//! `|safe`.
//!
//! # Example
//!
//! ```rust
//! use tabula::{Cell, Table};
//! use tabula_render::{TemplateWriter, WriterConfig};
//!
//! let mut table = Table::new();
//! table.set_cell(Cell::new(1, 2)?.with_anonymous_content("Total")?, 0, 0)?;
//!
//! let writer = TemplateWriter::new(WriterConfig::default())?;
//! let html = writer.render_to_string(&table)?;
//! assert!(html.contains(r#"<td colspan="2">Total</td>"#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs;
use std::path::Path;

use minijinja::{path_loader, Environment, Value};
use serde_json::Map;
use tabula::Table;
use tracing::info;

use crate::config::{WriterConfig, DEFAULT_TEMPLATE_NAME};
use crate::context::TableContext;
use crate::error::RenderError;
use crate::renderer::{CellRenderer, DefaultRenderer, RenderingContext};

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
{%- if title %}
<title>{{ title }}</title>
{%- endif %}
{%- if css_file %}
<link rel="stylesheet" href="{{ css_file }}">
{%- endif %}
</head>
<body>
<table>
{%- for row in table.grid %}
<tr>
{%- for cell in row.cells %}
{%- if cell.filler %}
<td></td>
{%- else %}
<td{% if cell.row_span > 1 %} rowspan="{{ cell.row_span }}"{% endif %}{% if cell.col_span > 1 %} colspan="{{ cell.col_span }}"{% endif %}{% if cell.styles %} class="{{ cell.styles|join(' ') }}"{% endif %}>{{ cell.rendered|safe }}</td>
{%- endif %}
{%- endfor %}
</tr>
{%- endfor %}
</table>
</body>
</html>
"#;

/// Renders tables through a MiniJinja template.
pub struct TemplateWriter {
    config: WriterConfig,
    env: Environment<'static>,
    renderer: Box<dyn CellRenderer>,
}

impl TemplateWriter {
    /// Creates a writer using the [`DefaultRenderer`] for cell content.
    pub fn new(config: WriterConfig) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template(DEFAULT_TEMPLATE_NAME, DEFAULT_TEMPLATE)?;
        if let Some(dir) = &config.template_dir {
            if !dir.is_dir() {
                return Err(RenderError::ConfigError(format!(
                    "template directory does not exist: {}",
                    dir.display()
                )));
            }
            env.set_loader(path_loader(dir));
        }
        Ok(Self {
            config,
            env,
            renderer: Box::new(DefaultRenderer),
        })
    }

    /// Replaces the cell renderer.
    pub fn with_renderer(mut self, renderer: impl CellRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Renders `table` with the configured template.
    pub fn render_to_string(&self, table: &Table) -> Result<String, RenderError> {
        let template = self.env.get_template(&self.config.template_name)?;
        let context = self.build_context(table)?;
        Ok(template.render(Value::from_serialize(&context))?)
    }

    /// Renders `table` into `path`, creating parent directories and
    /// replacing any existing file.
    pub fn write(&self, table: &Table, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let output = self.render_to_string(table)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        info!(path = %path.display(), template = %self.config.template_name, "Writing output file");
        fs::write(path, output)?;
        Ok(())
    }

    fn build_context(&self, table: &Table) -> Result<Map<String, serde_json::Value>, RenderError> {
        let mut context = Map::new();
        for (key, value) in table.properties().iter() {
            context.insert(key.to_string(), value.clone());
        }
        for (key, value) in self.config.properties.iter() {
            context.insert(key.to_string(), value.clone());
        }

        let flattened =
            TableContext::build(table, self.renderer.as_ref(), RenderingContext::Template);
        context.insert("table".to_string(), serde_json::to_value(flattened)?);
        context.insert(
            "rendering_context".to_string(),
            serde_json::to_value(RenderingContext::Template)?,
        );
        if let Some(css) = &self.config.css_file {
            context.insert("css_file".to_string(), css.clone().into());
        }
        Ok(context)
    }
}
