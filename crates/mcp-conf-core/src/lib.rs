//! mcp-conf core library
//!
//! Reads and edits the MCP server configuration of AI coding clients (Cline,
//! Codex, Claude, Goose, Cursor, Windsurf, OpenCode, GitHub Copilot,
//! Antigravity, Crush) through one canonical model.

pub mod client;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod mcp;
pub mod operation;
pub mod types;

pub use error::{McpConfError, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Client
    pub use crate::client::{
        ClientAdapter, ClientCapabilities, ClientId, ClientRegistry, ProjectSelector,
        StoreTarget, ToggleStyle,
    };

    // Configuration
    pub use crate::config::{ConfigFormat, DocumentStore, PathContext, RawDocument, config_path};

    // MCP
    pub use crate::mcp::{EntrySpec, McpAuth, McpTransport, NormalizedEntry, normalize};

    // Commands
    pub use crate::commands::{CommandReport, McpCommand, ReportOutcome};
    pub use crate::context::AppContext;
    pub use crate::operation::{Action, Operation};
    pub use crate::types::{ConfigScope, Platform};

    pub use crate::error::{McpConfError, Result};
}
