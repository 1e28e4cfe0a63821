//! Antigravity client implementation.
//!
//! Same store layout as the other JSON editors, except remote entries put
//! their endpoint under `serverUrl`.

use serde_json::Value;

use crate::client::{
    ClientAdapter, ClientCapabilities, ClientId, EntryFields, ScopeSupport, ToggleStyle,
    remote_entry, stdio_entry,
};
use crate::config::client_config::ConfigFormat;
use crate::mcp::spec::EntrySpec;
use crate::types::ConfigScope;

#[derive(Debug, Default)]
pub struct AntigravityClient;

impl AntigravityClient {
    pub fn new() -> Self {
        Self
    }
}

impl ClientAdapter for AntigravityClient {
    fn id(&self) -> ClientId {
        ClientId::Antigravity
    }

    fn capabilities(&self) -> ClientCapabilities {
        ClientCapabilities {
            scopes: ScopeSupport::GLOBAL,
            default_scope: ConfigScope::Global,
            supported_transports: ClientCapabilities::all_transports(),
            store_field: "mcpServers",
            format: ConfigFormat::Json,
            default_disabled_on_create: false,
            toggle: ToggleStyle::DisabledFlag,
            entry_fields: EntryFields {
                url: "serverUrl",
                ..EntryFields::STANDARD
            },
        }
    }

    fn build_entry(&self, spec: &EntrySpec) -> Value {
        let mut obj = if spec.transport.is_stdio() {
            stdio_entry(spec, "timeout")
        } else {
            remote_entry(spec, spec.transport.as_str(), "serverUrl", true)
        };
        let disabled = spec.disabled(self.capabilities().default_disabled_on_create);
        obj.insert("disabled".to_string(), Value::Bool(disabled));
        Value::Object(obj)
    }
}
