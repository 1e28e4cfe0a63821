//! OpenCode client implementation (also read by Kilo Code).
//!
//! OpenCode tags entries `local`/`remote` instead of naming a transport, so
//! SSE cannot be expressed.

use serde_json::Value;

use crate::client::{
    ClientAdapter, ClientCapabilities, ClientId, EntryFields, ScopeSupport, ToggleStyle,
    remote_entry, stdio_entry,
};
use crate::config::client_config::ConfigFormat;
use crate::mcp::spec::{EntrySpec, McpTransport};
use crate::types::ConfigScope;

#[derive(Debug, Default)]
pub struct OpenCodeClient;

impl OpenCodeClient {
    pub fn new() -> Self {
        Self
    }
}

impl ClientAdapter for OpenCodeClient {
    fn id(&self) -> ClientId {
        ClientId::OpenCode
    }

    fn capabilities(&self) -> ClientCapabilities {
        ClientCapabilities {
            scopes: ScopeSupport::BOTH,
            default_scope: ConfigScope::Global,
            supported_transports: vec![McpTransport::Stdio, McpTransport::Http],
            store_field: "mcp",
            format: ConfigFormat::Json,
            default_disabled_on_create: true,
            toggle: ToggleStyle::EnabledFlag,
            entry_fields: EntryFields::STANDARD,
        }
    }

    fn build_entry(&self, spec: &EntrySpec) -> Value {
        let mut obj = if spec.transport.is_stdio() {
            let mut typed = serde_json::Map::new();
            typed.insert("type".to_string(), Value::from("local"));
            typed.extend(stdio_entry(spec, "timeout"));
            typed
        } else {
            remote_entry(spec, "remote", "url", true)
        };
        let disabled = spec.disabled(self.capabilities().default_disabled_on_create);
        obj.insert("enabled".to_string(), Value::Bool(!disabled));
        Value::Object(obj)
    }
}
