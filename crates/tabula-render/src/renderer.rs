//! Turning individual cells into text.
//!
//! Writers delegate the formatting of a cell's content to a
//! [`CellRenderer`]. The [`DefaultRenderer`] understands the type hints in
//! [`tabula::hint`]; implement the trait to format domain-specific content.

use minijinja::HtmlEscape;
use serde::Serialize;
use tabula::{hint, Cell, Content, UrlContent};

/// Content key read when a cell has no anonymous content.
pub const VALUE_KEY: &str = "value";

/// The output a cell is being rendered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderingContext {
    /// Markup produced by a template. Output must be HTML-safe.
    Template,
    /// Plain text spreadsheet fields.
    Csv,
}

/// Formats a single cell for a writer.
pub trait CellRenderer: Send + Sync {
    /// Renders the cell's displayable content.
    ///
    /// For [`RenderingContext::Template`] the result is inserted verbatim,
    /// so implementations must escape user content themselves.
    fn render_cell(&self, cell: &Cell, context: RenderingContext) -> String;
}

/// Renders anonymous content (or the `value` entry), honoring the
/// `url` and `percentage` hints.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRenderer;

impl CellRenderer for DefaultRenderer {
    fn render_cell(&self, cell: &Cell, context: RenderingContext) -> String {
        let Some(value) = cell
            .anonymous_content()
            .or_else(|| cell.content(VALUE_KEY))
        else {
            return String::new();
        };

        if cell.is_of_type(hint::URL) {
            if let Some(url) = UrlContent::from_content(value) {
                return render_url(&url, context);
            }
        }

        let text = match value.as_f64() {
            Some(ratio) if cell.is_of_type(hint::PERCENTAGE) => format!("{:.1}%", ratio * 100.0),
            _ => plain_text(value),
        };
        match context {
            RenderingContext::Template => HtmlEscape(&text).to_string(),
            RenderingContext::Csv => text,
        }
    }
}

fn render_url(url: &UrlContent, context: RenderingContext) -> String {
    match context {
        RenderingContext::Csv => url.text().to_string(),
        RenderingContext::Template if url.description().is_empty() => format!(
            "<a href=\"{}\">{}</a>",
            HtmlEscape(url.address()),
            HtmlEscape(url.text())
        ),
        RenderingContext::Template => format!(
            "<a href=\"{}\" title=\"{}\">{}</a>",
            HtmlEscape(url.address()),
            HtmlEscape(url.description()),
            HtmlEscape(url.text())
        ),
    }
}

/// Strings verbatim, everything else in its JSON form.
pub fn plain_text(value: &Content) -> String {
    match value {
        Content::String(s) => s.clone(),
        Content::Null => String::new(),
        other => other.to_string(),
    }
}
