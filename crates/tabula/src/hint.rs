//! Well-known cell type hints understood by the bundled renderers.

/// The content is a ratio to be shown as a percentage.
pub const PERCENTAGE: &str = "percentage";

/// The content is a [`UrlContent`](crate::UrlContent) link.
pub const URL: &str = "url";
