//! JSON serializer for client configuration files.

use std::path::Path;

use serde_json::Value;

use super::{ConfigFormat, ConfigSerializer, document_from_root};
use crate::config::document::RawDocument;
use crate::error::{McpConfError, Result};

/// JSON configuration file serializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

impl ConfigSerializer for JsonSerializer {
    fn parse(&self, path: &Path, content: &str) -> Result<RawDocument> {
        if content.trim().is_empty() {
            return Ok(RawDocument::new());
        }
        let value: Value = serde_json::from_str(content)
            .map_err(|err| McpConfError::malformed(path, ConfigFormat::Json, err))?;
        document_from_root(path, ConfigFormat::Json, value)
    }

    fn render(&self, path: &Path, doc: &RawDocument) -> Result<String> {
        serde_json::to_string_pretty(doc.as_map())
            .map_err(|err| McpConfError::malformed(path, ConfigFormat::Json, err))
    }

    fn format(&self) -> ConfigFormat {
        ConfigFormat::Json
    }
}
