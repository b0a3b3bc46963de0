//! Structured content values.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cell::Content;

/// A hyperlink: target address, link text and an optional description.
///
/// Store it in a cell through its [`Content`] conversion and tag the cell
/// with [`hint::URL`](crate::hint::URL) so renderers know to emit a link.
///
/// ```rust
/// use tabula::{hint, Cell, UrlContent};
///
/// let link = UrlContent::new("https://example.org", "Example");
/// let cell = Cell::default()
///     .with_anonymous_content(link.clone())?
///     .with_type(hint::URL)?;
///
/// let stored = cell.anonymous_content().and_then(UrlContent::from_content);
/// assert_eq!(stored, Some(link));
/// # Ok::<(), tabula::TableError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UrlContent {
    address: String,
    text: String,
    #[serde(default)]
    description: String,
}

impl UrlContent {
    pub fn new(address: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            text: text.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Reads a link back from cell content, if it has the expected shape.
    pub fn from_content(content: &Content) -> Option<Self> {
        serde_json::from_value(content.clone()).ok()
    }
}

impl From<UrlContent> for Content {
    fn from(url: UrlContent) -> Self {
        serde_json::json!({
            "address": url.address,
            "text": url.text,
            "description": url.description,
        })
    }
}

// Links sort by address; text and description only break ties.
impl Ord for UrlContent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.address
            .cmp(&other.address)
            .then_with(|| self.text.cmp(&other.text))
            .then_with(|| self.description.cmp(&other.description))
    }
}

impl PartialOrd for UrlContent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_orders_by_address_first() {
        let mut links = vec![
            UrlContent::new("https://b.org", "a"),
            UrlContent::new("https://a.org", "z"),
        ];
        links.sort();
        assert_eq!(links[0].address(), "https://a.org");
    }

    #[test]
    fn test_content_round_trip_keeps_description() {
        let link = UrlContent::new("https://a.org", "A").with_description("home");
        let content: Content = link.clone().into();
        assert_eq!(content["description"], json!("home"));
        assert_eq!(UrlContent::from_content(&content), Some(link));
    }

    #[test]
    fn test_from_content_rejects_other_shapes() {
        assert_eq!(UrlContent::from_content(&json!("https://a.org")), None);
        let partial = json!({"address": "https://a.org", "text": "A"});
        assert_eq!(
            UrlContent::from_content(&partial).map(|u| u.description().to_string()),
            Some(String::new())
        );
    }
}
