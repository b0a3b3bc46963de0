//! Table cells.
//!
//! A [`Cell`] is a placement-independent record: it knows how many rows and
//! columns it spans, carries keyed and anonymous content, and holds two sets
//! of tags (types and styles) that renderers use as hints. A cell never
//! knows where it sits in a table; that is the job of [`Table`](crate::Table).
//!
//! # Example
//!
//! ```rust
//! use tabula::{hint, Cell};
//!
//! let cell = Cell::new(2, 3)?
//!     .with_anonymous_content("name")?
//!     .with_content("ratio", 0.25)?
//!     .with_type(hint::PERCENTAGE)?;
//!
//! assert_eq!(cell.row_span(), 2);
//! assert!(cell.is_of_type("percentage"));
//! assert_eq!(cell.content("ratio"), Some(&serde_json::json!(0.25)));
//! # Ok::<(), tabula::TableError>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::error::{Result, TableError};

/// Opaque cell content.
///
/// The grid never interprets content. JSON `null` stands for "absent" and is
/// rejected by every setter.
pub type Content = serde_json::Value;

/// A single table cell, possibly spanning several rows and columns.
///
/// Spans are set at construction. Once the cell is handed to a table, only
/// the table may shrink them (when the cell is clipped during insertion).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    row_span: usize,
    col_span: usize,
    content: BTreeMap<String, Content>,
    anonymous: Option<Content>,
    types: BTreeSet<String>,
    styles: BTreeSet<String>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            row_span: 1,
            col_span: 1,
            content: BTreeMap::new(),
            anonymous: None,
            types: BTreeSet::new(),
            styles: BTreeSet::new(),
        }
    }
}

impl Cell {
    /// Creates a cell spanning `row_span` rows and `col_span` columns.
    ///
    /// Returns [`TableError::InvalidSpan`] if either span is zero.
    pub fn new(row_span: usize, col_span: usize) -> Result<Self> {
        check_spans(row_span, col_span)?;
        Ok(Self {
            row_span,
            col_span,
            ..Self::default()
        })
    }

    /// Number of rows this cell spans.
    pub fn row_span(&self) -> usize {
        self.row_span
    }

    /// Number of columns this cell spans.
    pub fn col_span(&self) -> usize {
        self.col_span
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Stores `value` under `key`, replacing any previous value for that key.
    pub fn set_content(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Content>,
    ) -> Result<&mut Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(TableError::InvalidArgument("content key may not be empty"));
        }
        let value = value.into();
        if value.is_null() {
            return Err(TableError::InvalidArgument("content value may not be null"));
        }
        self.content.insert(key, value);
        Ok(self)
    }

    /// Sets the single unkeyed content slot.
    pub fn set_anonymous_content(&mut self, value: impl Into<Content>) -> Result<&mut Self> {
        let value = value.into();
        if value.is_null() {
            return Err(TableError::InvalidArgument("content value may not be null"));
        }
        self.anonymous = Some(value);
        Ok(self)
    }

    /// Returns the content stored under `key`, if any.
    pub fn content(&self, key: &str) -> Option<&Content> {
        self.content.get(key)
    }

    /// Returns the unkeyed content, if any.
    pub fn anonymous_content(&self) -> Option<&Content> {
        self.anonymous.as_ref()
    }

    /// Whether content is stored under `key`.
    pub fn has_content(&self, key: &str) -> bool {
        self.content.contains_key(key)
    }

    /// All keyed content, ordered by key.
    pub fn contents(&self) -> &BTreeMap<String, Content> {
        &self.content
    }

    // ========================================================================
    // Type and style tags
    // ========================================================================

    /// Adds a type hint such as [`hint::URL`](crate::hint::URL).
    pub fn add_type(&mut self, tag: impl Into<String>) -> Result<&mut Self> {
        self.types.insert(non_empty_tag(tag.into())?);
        Ok(self)
    }

    /// Whether the cell carries the type hint `tag`. Matching is case-sensitive.
    pub fn is_of_type(&self, tag: &str) -> bool {
        self.types.contains(tag)
    }

    /// Type hints in sorted order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(String::as_str)
    }

    /// Adds a presentation hint.
    pub fn add_style(&mut self, tag: impl Into<String>) -> Result<&mut Self> {
        self.styles.insert(non_empty_tag(tag.into())?);
        Ok(self)
    }

    /// Whether the cell carries the style hint `tag`. Matching is case-sensitive.
    pub fn is_of_style(&self, tag: &str) -> bool {
        self.styles.contains(tag)
    }

    /// Style hints in sorted order.
    pub fn styles(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(String::as_str)
    }

    // ========================================================================
    // Chaining builders
    // ========================================================================

    /// Builder form of [`set_content`](Self::set_content).
    pub fn with_content(
        mut self,
        key: impl Into<String>,
        value: impl Into<Content>,
    ) -> Result<Self> {
        self.set_content(key, value)?;
        Ok(self)
    }

    /// Builder form of [`set_anonymous_content`](Self::set_anonymous_content).
    pub fn with_anonymous_content(mut self, value: impl Into<Content>) -> Result<Self> {
        self.set_anonymous_content(value)?;
        Ok(self)
    }

    /// Builder form of [`add_type`](Self::add_type).
    pub fn with_type(mut self, tag: impl Into<String>) -> Result<Self> {
        self.add_type(tag)?;
        Ok(self)
    }

    /// Builder form of [`add_style`](Self::add_style).
    pub fn with_style(mut self, tag: impl Into<String>) -> Result<Self> {
        self.add_style(tag)?;
        Ok(self)
    }

    /// Shrinks the spans during placement. Spans never grow and never drop below one.
    pub(crate) fn clip_to(&mut self, row_span: usize, col_span: usize) -> Result<()> {
        check_spans(row_span, col_span)?;
        if row_span > self.row_span || col_span > self.col_span {
            return Err(TableError::InvalidSpan { row_span, col_span });
        }
        self.row_span = row_span;
        self.col_span = col_span;
        Ok(())
    }
}

fn check_spans(row_span: usize, col_span: usize) -> Result<()> {
    if row_span < 1 || col_span < 1 {
        return Err(TableError::InvalidSpan { row_span, col_span });
    }
    Ok(())
}

fn non_empty_tag(tag: String) -> Result<String> {
    if tag.is_empty() {
        return Err(TableError::InvalidArgument("tag may not be empty"));
    }
    Ok(tag)
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cell: rowSpan = {} / colSpan = {} / types = [",
            self.row_span, self.col_span
        )?;
        for (i, tag) in self.types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(tag)?;
        }
        f.write_str("] / ")?;
        if let Some(value) = &self.anonymous {
            writeln!(f, "{}", value)?;
        }
        for (key, value) in &self.content {
            writeln!(f, "{} : {}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_single_position() {
        let cell = Cell::default();
        assert_eq!((cell.row_span(), cell.col_span()), (1, 1));
        assert!(cell.anonymous_content().is_none());
    }

    #[test]
    fn test_new_rejects_zero_spans() {
        assert_eq!(
            Cell::new(0, 1),
            Err(TableError::InvalidSpan {
                row_span: 0,
                col_span: 1
            })
        );
        assert!(Cell::new(2, 0).is_err());
        assert!(Cell::new(3, 4).is_ok());
    }

    #[test]
    fn test_set_content_overwrites() {
        let mut cell = Cell::default();
        cell.set_content("name", "a").unwrap();
        cell.set_content("name", "b").unwrap();
        assert_eq!(cell.content("name"), Some(&json!("b")));
        assert_eq!(cell.contents().len(), 1);
    }

    #[test]
    fn test_set_content_rejects_empty_key_and_null() {
        let mut cell = Cell::default();
        assert!(matches!(
            cell.set_content("", 1),
            Err(TableError::InvalidArgument(_))
        ));
        assert!(matches!(
            cell.set_content("key", Content::Null),
            Err(TableError::InvalidArgument(_))
        ));
        assert!(!cell.has_content("key"));
    }

    #[test]
    fn test_missing_content_is_none() {
        let cell = Cell::default();
        assert_eq!(cell.content("nope"), None);
        assert!(!cell.has_content("nope"));
    }

    #[test]
    fn test_anonymous_content_independent_of_keyed() {
        let mut cell = Cell::default();
        cell.set_anonymous_content("address").unwrap();
        cell.set_content("address", 42).unwrap();
        assert_eq!(cell.anonymous_content(), Some(&json!("address")));
        assert_eq!(cell.content("address"), Some(&json!(42)));
        assert!(cell.set_anonymous_content(Content::Null).is_err());
        assert_eq!(cell.anonymous_content(), Some(&json!("address")));
    }

    #[test]
    fn test_tags_are_sets_and_case_sensitive() {
        let mut cell = Cell::default();
        cell.add_type("url").unwrap().add_type("url").unwrap();
        cell.add_style("bold").unwrap();
        assert!(cell.is_of_type("url"));
        assert!(!cell.is_of_type("URL"));
        assert_eq!(cell.types().count(), 1);
        assert!(cell.is_of_style("bold"));
        assert!(!cell.is_of_style("url"));
        assert!(cell.add_type("").is_err());
        assert!(cell.add_style("").is_err());
    }

    #[test]
    fn test_builder_chain() {
        let cell = Cell::new(1, 2)
            .and_then(|c| c.with_content("k", "v"))
            .and_then(|c| c.with_style("header"))
            .unwrap();
        assert_eq!(cell.col_span(), 2);
        assert!(cell.is_of_style("header"));
    }

    #[test]
    fn test_clip_only_shrinks() {
        let mut cell = Cell::new(3, 3).unwrap();
        cell.clip_to(2, 1).unwrap();
        assert_eq!((cell.row_span(), cell.col_span()), (2, 1));
        assert!(cell.clip_to(3, 1).is_err());
        assert!(cell.clip_to(0, 1).is_err());
        assert_eq!((cell.row_span(), cell.col_span()), (2, 1));
    }

    #[test]
    fn test_display_lists_content() {
        let cell = Cell::new(2, 1)
            .unwrap()
            .with_type("url")
            .unwrap()
            .with_content("k", "v")
            .unwrap();
        let text = cell.to_string();
        assert!(text.starts_with("Cell: rowSpan = 2 / colSpan = 1 / types = [url]"));
        assert!(text.contains("k : \"v\""));
    }
}
