//! Windsurf client implementation.

use serde_json::Value;

use crate::client::cline::build_flagged_entry;
use crate::client::{
    ClientAdapter, ClientCapabilities, ClientId, EntryFields, ScopeSupport, ToggleStyle,
};
use crate::config::client_config::ConfigFormat;
use crate::mcp::spec::EntrySpec;
use crate::types::ConfigScope;

#[derive(Debug, Default)]
pub struct WindsurfClient;

impl WindsurfClient {
    pub fn new() -> Self {
        Self
    }
}

impl ClientAdapter for WindsurfClient {
    fn id(&self) -> ClientId {
        ClientId::Windsurf
    }

    fn capabilities(&self) -> ClientCapabilities {
        ClientCapabilities {
            scopes: ScopeSupport::GLOBAL,
            default_scope: ConfigScope::Global,
            supported_transports: ClientCapabilities::all_transports(),
            store_field: "mcpServers",
            format: ConfigFormat::Json,
            default_disabled_on_create: true,
            toggle: ToggleStyle::DisabledFlag,
            entry_fields: EntryFields::STANDARD,
        }
    }

    fn build_entry(&self, spec: &EntrySpec) -> Value {
        let disabled = spec.disabled(self.capabilities().default_disabled_on_create);
        build_flagged_entry(spec, disabled)
    }
}
