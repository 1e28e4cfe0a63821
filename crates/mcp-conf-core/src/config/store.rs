//! Reading and writing client configuration documents.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::client_config::{ConfigFormat, serializer_for_format};
use super::document::RawDocument;
use crate::error::{McpConfError, Result};

/// What [`DocumentStore::write`] did with a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// Dry run: the file was left alone and this is what would have been written.
    Rendered(String),
}

/// File access for client documents. One read and at most one write per
/// operation; nothing is cached between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentStore {
    dry_run: bool,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Load `path`, returning an empty document when the file does not exist.
    pub fn read(&self, path: &Path, format: ConfigFormat) -> Result<RawDocument> {
        let serializer = serializer_for_format(format)?;
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, starting empty");
            return Ok(RawDocument::new());
        }
        let content = fs::read_to_string(path).map_err(|err| McpConfError::io(path, err))?;
        debug!(path = %path.display(), %format, "Read config file");
        serializer.parse(path, &content)
    }

    /// Overwrite `path` with the rendered document, creating parent
    /// directories as needed.
    pub fn write(&self, path: &Path, format: ConfigFormat, doc: &RawDocument) -> Result<WriteOutcome> {
        let serializer = serializer_for_format(format)?;
        let content = serializer.render(path, doc)?;
        if self.dry_run {
            return Ok(WriteOutcome::Rendered(content));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| McpConfError::io(parent, err))?;
        }
        fs::write(path, content).map_err(|err| McpConfError::io(path, err))?;
        info!(path = %path.display(), "Updated config file");
        Ok(WriteOutcome::Written)
    }
}
