//! Configuration documents and their locations.
//!
//! - [`document`]: the format-independent tree adapters operate on
//! - [`client_config`]: JSON/TOML/YAML codecs
//! - [`paths`]: where each client keeps its file
//! - [`store`]: reading and writing those files

pub mod client_config;
pub mod document;
pub mod paths;
pub mod store;

pub use client_config::{ConfigFormat, ConfigSerializer, serializer_for_format};
pub use document::RawDocument;
pub use paths::{PathContext, config_path};
pub use store::{DocumentStore, WriteOutcome};
