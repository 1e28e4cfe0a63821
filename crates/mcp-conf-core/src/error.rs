use std::path::PathBuf;

use thiserror::Error;

use crate::client::ClientId;
use crate::config::client_config::ConfigFormat;

pub type Result<T> = std::result::Result<T, McpConfError>;

#[derive(Debug, Error)]
pub enum McpConfError {
    /// Operation fields are inconsistent with each other or with the client.
    #[error("{0}")]
    Validation(String),

    #[error("Server \"{name}\" not found in {location}.")]
    NotFound { name: String, location: String },

    #[error("Server \"{name}\" already exists in {location}. Use --force to overwrite.")]
    AlreadyExists { name: String, location: String },

    #[error("{client} does not support {operation}.")]
    UnsupportedOperation {
        client: ClientId,
        operation: &'static str,
    },

    #[error("{format} support is not available in this build.")]
    DependencyUnavailable { format: ConfigFormat },

    #[error("Invalid {format}: {path}: {reason}")]
    MalformedDocument {
        path: PathBuf,
        format: ConfigFormat,
        reason: String,
    },

    /// A store container exists but holds the wrong kind of value.
    #[error("Expected '{field}' to be {expected}")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl McpConfError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self::NotFound {
            name: name.into(),
            location: location.into(),
        }
    }

    pub fn already_exists(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self::AlreadyExists {
            name: name.into(),
            location: location.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(
        path: impl Into<PathBuf>,
        format: ConfigFormat,
        reason: impl ToString,
    ) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            format,
            reason: reason.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Qualify an adapter-level error (store field, project key) with the
    /// document it was raised for.
    pub fn in_document(self, path: &std::path::Path, format: ConfigFormat) -> Self {
        match self {
            Self::UnexpectedShape { field, expected } => Self::MalformedDocument {
                path: path.to_path_buf(),
                format,
                reason: format!("expected '{field}' to be {expected}"),
            },
            Self::NotFound { name, location } => Self::NotFound {
                name,
                location: format!("{} ({location})", path.display()),
            },
            Self::AlreadyExists { name, location } => Self::AlreadyExists {
                name,
                location: format!("{} ({location})", path.display()),
            },
            other => other,
        }
    }
}
