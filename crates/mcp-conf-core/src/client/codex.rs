//! Codex client implementation.
//!
//! Codex keeps servers as `[mcp_servers.<name>]` tables in `config.toml`.
//! Entries carry no transport tag: a `url` marks an HTTP server.

use serde_json::Value;

use crate::client::{
    ClientAdapter, ClientCapabilities, ClientId, EntryFields, ScopeSupport, ToggleStyle,
    headers_value, stdio_entry,
};
use crate::config::client_config::ConfigFormat;
use crate::mcp::spec::{EntrySpec, McpTransport};
use crate::types::ConfigScope;

#[derive(Debug, Default)]
pub struct CodexClient;

impl CodexClient {
    pub fn new() -> Self {
        Self
    }
}

impl ClientAdapter for CodexClient {
    fn id(&self) -> ClientId {
        ClientId::Codex
    }

    fn capabilities(&self) -> ClientCapabilities {
        ClientCapabilities {
            scopes: ScopeSupport::BOTH,
            default_scope: ConfigScope::Global,
            supported_transports: vec![McpTransport::Stdio, McpTransport::Http],
            store_field: "mcp_servers",
            format: ConfigFormat::Toml,
            default_disabled_on_create: true,
            toggle: ToggleStyle::EnabledFlag,
            entry_fields: EntryFields {
                timeout: "startup_timeout_sec",
                headers: "http_headers",
                ..EntryFields::STANDARD
            },
        }
    }

    fn build_entry(&self, spec: &EntrySpec) -> Value {
        // TOML:
        // [mcp_servers.name]
        // command = "..."
        // args = [...]
        // startup_timeout_sec = 60
        // enabled = false
        let mut obj = if spec.transport.is_stdio() {
            stdio_entry(spec, "startup_timeout_sec")
        } else {
            let mut obj = serde_json::Map::new();
            obj.insert("url".to_string(), Value::from(spec.url()));
            obj.insert("startup_timeout_sec".to_string(), Value::from(spec.timeout));
            if !spec.headers.is_empty() {
                obj.insert("http_headers".to_string(), headers_value(spec));
            }
            obj
        };
        let disabled = spec.disabled(self.capabilities().default_disabled_on_create);
        obj.insert("enabled".to_string(), Value::Bool(!disabled));
        Value::Object(obj)
    }
}
