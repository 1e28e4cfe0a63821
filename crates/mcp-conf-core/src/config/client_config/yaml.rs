//! YAML serializer for client configuration files.

use std::path::Path;

use serde_json::Value;

use super::{ConfigFormat, ConfigSerializer, document_from_root};
use crate::config::document::RawDocument;
use crate::error::{McpConfError, Result};

/// YAML configuration file serializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlSerializer;

impl ConfigSerializer for YamlSerializer {
    fn parse(&self, path: &Path, content: &str) -> Result<RawDocument> {
        if content.trim().is_empty() {
            return Ok(RawDocument::new());
        }
        let value: Value = serde_yaml::from_str(content)
            .map_err(|err| McpConfError::malformed(path, ConfigFormat::Yaml, err))?;
        document_from_root(path, ConfigFormat::Yaml, value)
    }

    fn render(&self, path: &Path, doc: &RawDocument) -> Result<String> {
        serde_yaml::to_string(doc.as_map())
            .map_err(|err| McpConfError::malformed(path, ConfigFormat::Yaml, err))
    }

    fn format(&self) -> ConfigFormat {
        ConfigFormat::Yaml
    }
}
