//! Cline (VS Code extension) client implementation.
//!
//! Servers live under `mcpServers` in `cline_mcp_settings.json`. Remote
//! entries use Cline's own `streamableHttp` tag for HTTP.

use serde_json::Value;

use crate::client::{
    ClientAdapter, ClientCapabilities, ClientId, EntryFields, ScopeSupport, ToggleStyle,
    remote_entry, stdio_entry,
};
use crate::config::client_config::ConfigFormat;
use crate::mcp::spec::{EntrySpec, McpTransport};
use crate::types::ConfigScope;

#[derive(Debug, Default)]
pub struct ClineClient;

impl ClineClient {
    pub fn new() -> Self {
        Self
    }
}

impl ClientAdapter for ClineClient {
    fn id(&self) -> ClientId {
        ClientId::Cline
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

/// Shape shared with Windsurf: stdio `{command, args, timeout, disabled}`,
/// remote `{type: sse|streamableHttp, url, timeout, headers?, disabled}`.
pub(crate) fn build_flagged_entry(spec: &EntrySpec, disabled: bool) -> Value {
    let mut obj = match spec.transport {
        McpTransport::Stdio => stdio_entry(spec, "timeout"),
        McpTransport::Sse => remote_entry(spec, "sse", "url", true),
        McpTransport::Http => remote_entry(spec, "streamableHttp", "url", true),
    };
    obj.insert("disabled".to_string(), Value::Bool(disabled));
    Value::Object(obj)
}
