//! Crush client implementation.

use serde_json::Value;

use crate::client::{
    ClientAdapter, ClientCapabilities, ClientId, EntryFields, ScopeSupport, ToggleStyle,
    remote_entry, stdio_entry,
};
use crate::config::client_config::ConfigFormat;
use crate::mcp::spec::EntrySpec;
use crate::types::ConfigScope;

#[derive(Debug, Default)]
pub struct CrushClient;

impl CrushClient {
    pub fn new() -> Self {
        Self
    }
}

impl ClientAdapter for CrushClient {
    fn id(&self) -> ClientId {
        ClientId::Crush
    }

    fn capabilities(&self) -> ClientCapabilities {
        ClientCapabilities {
            scopes: ScopeSupport::BOTH,
            default_scope: ConfigScope::Global,
            supported_transports: ClientCapabilities::all_transports(),
            store_field: "mcp",
            format: ConfigFormat::Json,
            default_disabled_on_create: false,
            toggle: ToggleStyle::DisabledFlag,
            entry_fields: EntryFields::STANDARD,
        }
    }

    fn build_entry(&self, spec: &EntrySpec) -> Value {
        let mut obj = if spec.transport.is_stdio() {
            let mut typed = serde_json::Map::new();
            typed.insert("type".to_string(), Value::from("stdio"));
            typed.extend(stdio_entry(spec, "timeout"));
            typed
        } else {
            remote_entry(spec, spec.transport.as_str(), "url", true)
        };
        let disabled = spec.disabled(self.capabilities().default_disabled_on_create);
        obj.insert("disabled".to_string(), Value::Bool(disabled));
        Value::Object(obj)
    }
}
