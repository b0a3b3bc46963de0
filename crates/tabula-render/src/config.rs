//! Writer configuration.
//!
//! ```yaml
//! template_name: report.html.jinja
//! template_dir: ./templates
//! css_file: style.css
//! properties:
//!   title: Quarterly report
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tabula::{Content, Properties};

use crate::error::RenderError;

/// Name under which the built-in HTML template is registered.
pub const DEFAULT_TEMPLATE_NAME: &str = "table.html.jinja";

/// Settings for the [`TemplateWriter`](crate::TemplateWriter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Template to render. Defaults to the built-in HTML table.
    pub template_name: String,
    /// Directory other templates are loaded from.
    pub template_dir: Option<PathBuf>,
    /// Stylesheet linked from the built-in template.
    pub css_file: Option<String>,
    /// Extra template variables. They take precedence over table properties.
    pub properties: Properties,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            template_dir: None,
            css_file: None,
            properties: Properties::new(),
        }
    }
}

impl WriterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, RenderError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, RenderError> {
        serde_json::from_str(source).map_err(|e| RenderError::ConfigError(e.to_string()))
    }

    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template_name = name.into();
        self
    }

    pub fn template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    pub fn css_file(mut self, file: impl Into<String>) -> Self {
        self.css_file = Some(file.into());
        self
    }

    pub fn property(
        mut self,
        key: impl Into<String>,
        value: impl Into<Content>,
    ) -> Result<Self, RenderError> {
        self.properties.set(key, value)?;
        Ok(self)
    }
}
