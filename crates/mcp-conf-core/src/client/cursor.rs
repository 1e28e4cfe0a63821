//! Cursor client implementation.
//!
//! Cursor has no per-entry enable flag, so enable/disable is rejected.

use serde_json::Value;

use crate::client::{
    ClientAdapter, ClientCapabilities, ClientId, EntryFields, ScopeSupport, ToggleStyle,
    remote_entry, stdio_entry,
};
use crate::config::client_config::ConfigFormat;
use crate::mcp::spec::EntrySpec;
use crate::types::ConfigScope;

#[derive(Debug, Default)]
pub struct CursorClient;

impl CursorClient {
    pub fn new() -> Self {
        Self
    }
}

impl ClientAdapter for CursorClient {
    fn id(&self) -> ClientId {
        ClientId::Cursor
    }

    fn capabilities(&self) -> ClientCapabilities {
        ClientCapabilities {
            scopes: ScopeSupport::BOTH,
            default_scope: ConfigScope::Global,
            supported_transports: ClientCapabilities::all_transports(),
            store_field: "mcpServers",
            format: ConfigFormat::Json,
            default_disabled_on_create: false,
            toggle: ToggleStyle::Unsupported,
            entry_fields: EntryFields::STANDARD,
        }
    }

    fn build_entry(&self, spec: &EntrySpec) -> Value {
        let obj = if spec.transport.is_stdio() {
            stdio_entry(spec, "timeout")
        } else {
            remote_entry(spec, spec.transport.as_str(), "url", true)
        };
        Value::Object(obj)
    }
}
