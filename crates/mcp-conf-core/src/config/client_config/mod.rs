//! Client configuration file formats.
//!
//! Each client persists its servers as JSON, TOML or YAML. All of them are
//! parsed into the same [`RawDocument`] tree so adapters never see the
//! on-disk format. TOML and YAML support sit behind the `toml` and `yaml`
//! cargo features.

mod json;
#[cfg(feature = "toml")]
mod toml;
#[cfg(feature = "yaml")]
mod yaml;

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::config::document::RawDocument;
use crate::error::{McpConfError, Result};

pub use self::json::JsonSerializer;
#[cfg(feature = "toml")]
pub use self::toml::TomlSerializer;
#[cfg(feature = "yaml")]
pub use self::yaml::YamlSerializer;

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for converting client configuration text to and from a [`RawDocument`].
///
/// `path` is only used to label errors.
pub trait ConfigSerializer: Send + Sync {
    /// Parse file content. Blank content yields an empty document; a root that
    /// is not a mapping is rejected.
    fn parse(&self, path: &Path, content: &str) -> Result<RawDocument>;

    /// Render a document in this format.
    fn render(&self, path: &Path, doc: &RawDocument) -> Result<String>;

    fn format(&self) -> ConfigFormat;
}

/// Create a serializer for the given format.
///
/// Fails with [`McpConfError::DependencyUnavailable`] when the crate was built
/// without the feature for that format.
pub fn serializer_for_format(format: ConfigFormat) -> Result<Box<dyn ConfigSerializer>> {
    match format {
        ConfigFormat::Json => Ok(Box::new(JsonSerializer)),
        #[cfg(feature = "toml")]
        ConfigFormat::Toml => Ok(Box::new(TomlSerializer)),
        #[cfg(feature = "yaml")]
        ConfigFormat::Yaml => Ok(Box::new(YamlSerializer)),
        #[allow(unreachable_patterns)]
        other => Err(McpConfError::DependencyUnavailable { format: other }),
    }
}

/// Turn a parsed root value into a document.
pub(crate) fn document_from_root(
    path: &Path,
    format: ConfigFormat,
    root: Value,
) -> Result<RawDocument> {
    match root {
        Value::Object(map) => Ok(RawDocument::from_map(map)),
        Value::Null => Ok(RawDocument::new()),
        other => Err(McpConfError::malformed(
            path,
            format,
            format!("expected a mapping at the root, found {}", value_kind(&other)),
        )),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
