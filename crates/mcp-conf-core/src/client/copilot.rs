//! GitHub Copilot (VS Code workspace) client implementation.
//!
//! Copilot reads `.vscode/mcp.json` from the workspace only. The file keeps a
//! top-level `inputs` list next to `servers`, and remote entries take no
//! timeout.

use serde_json::Value;

use crate::client::{
    ClientAdapter, ClientCapabilities, ClientId, EntryFields, ScopeSupport, StoreTarget,
    ToggleStyle, remote_entry, stdio_entry,
};
use crate::config::client_config::ConfigFormat;
use crate::config::document::RawDocument;
use crate::error::Result;
use crate::mcp::spec::EntrySpec;
use crate::types::ConfigScope;

#[derive(Debug, Default)]
pub struct CopilotClient;

impl CopilotClient {
    pub fn new() -> Self {
        Self
    }
}

impl ClientAdapter for CopilotClient {
    fn id(&self) -> ClientId {
        ClientId::Copilot
    }

    fn capabilities(&self) -> ClientCapabilities {
        ClientCapabilities {
            scopes: ScopeSupport::LOCAL,
            default_scope: ConfigScope::Local,
            supported_transports: ClientCapabilities::all_transports(),
            store_field: "servers",
            format: ConfigFormat::Json,
            default_disabled_on_create: false,
            toggle: ToggleStyle::Unsupported,
            entry_fields: EntryFields::STANDARD,
        }
    }

    fn ensure_store(&self, doc: &mut RawDocument, _target: &StoreTarget) -> Result<()> {
        doc.ensure_array("inputs")?;
        doc.ensure_map(&["servers"])?;
        Ok(())
    }

    fn build_entry(&self, spec: &EntrySpec) -> Value {
        let obj = if spec.transport.is_stdio() {
            let mut typed = serde_json::Map::new();
            typed.insert("type".to_string(), Value::from("stdio"));
            typed.extend(stdio_entry(spec, "timeout"));
            typed
        } else {
            remote_entry(spec, spec.transport.as_str(), "url", false)
        };
        Value::Object(obj)
    }
}
