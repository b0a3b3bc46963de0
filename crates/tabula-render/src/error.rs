//! Errors raised while writing tables.
//!
//! Every writer returns [`RenderError`]. Engine and parser errors are folded
//! into a handful of variants by what went wrong for the caller: a broken
//! template, a missing template, bad configuration, unencodable output or a
//! failed read/write.

use std::fmt;

use tabula::TableError;

#[derive(Debug)]
pub enum RenderError {
    /// The template failed to compile or render.
    TemplateError(minijinja::Error),

    /// No template is registered or on disk under this name.
    TemplateNotFound(String),

    /// Output could not be encoded (CSV record, UTF-8 text, JSON).
    SerializationError(String),

    /// The writer configuration could not be parsed or points nowhere.
    ConfigError(String),

    /// A table operation failed.
    Table(TableError),

    /// Reading a template or writing the output failed.
    IoError(std::io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplateError(err) => write!(f, "template failed: {}", err),
            Self::TemplateNotFound(name) => write!(f, "no such template: {}", name),
            Self::SerializationError(msg) => write!(f, "cannot encode output: {}", msg),
            Self::ConfigError(msg) => write!(f, "invalid writer configuration: {}", msg),
            Self::Table(err) => write!(f, "table error: {}", err),
            Self::IoError(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TemplateError(err) => Some(err),
            Self::Table(err) => Some(err),
            Self::IoError(err) => Some(err),
            Self::TemplateNotFound(_) | Self::SerializationError(_) | Self::ConfigError(_) => {
                None
            }
        }
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        match err.kind() {
            minijinja::ErrorKind::TemplateNotFound => Self::TemplateNotFound(err.to_string()),
            _ => Self::TemplateError(err),
        }
    }
}

impl From<TableError> for RenderError {
    fn from(err: TableError) -> Self {
        Self::Table(err)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<serde_yaml::Error> for RenderError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<csv::Error> for RenderError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return Self::SerializationError(err.to_string());
        }
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::IoError(io),
            kind => Self::SerializationError(format!("{:?}", kind)),
        }
    }
}

// Flushing the buffered writer failed.
impl<W> From<csv::IntoInnerError<W>> for RenderError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        let io = err.error();
        Self::IoError(std::io::Error::new(io.kind(), io.to_string()))
    }
}

impl From<std::string::FromUtf8Error> for RenderError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::SerializationError(format!("output is not UTF-8: {}", err))
    }
}
