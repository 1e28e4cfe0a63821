//! Goose client implementation.
//!
//! Goose stores extensions in YAML under `extensions`. New entries are always
//! written disabled; the user turns them on from Goose or with `enable`.

use serde_json::{Map, Value};

use crate::client::{
    ClientAdapter, ClientCapabilities, ClientId, EntryFields, ScopeSupport, ToggleStyle,
    headers_value, stdio_args,
};
use crate::config::client_config::ConfigFormat;
use crate::mcp::spec::{EntrySpec, McpTransport};
use crate::types::ConfigScope;

#[derive(Debug, Default)]
pub struct GooseClient;

impl GooseClient {
    pub fn new() -> Self {
        Self
    }
}

impl ClientAdapter for GooseClient {
    fn id(&self) -> ClientId {
        ClientId::Goose
    }

    fn capabilities(&self) -> ClientCapabilities {
        ClientCapabilities {
            scopes: ScopeSupport::GLOBAL,
            default_scope: ConfigScope::Global,
            supported_transports: ClientCapabilities::all_transports(),
            store_field: "extensions",
            format: ConfigFormat::Yaml,
            default_disabled_on_create: true,
            toggle: ToggleStyle::EnabledFlag,
            entry_fields: EntryFields {
                command: "cmd",
                url: "uri",
                ..EntryFields::STANDARD
            },
        }
    }

    fn build_entry(&self, spec: &EntrySpec) -> Value {
        let mut obj = Map::new();
        obj.insert("name".to_string(), Value::from(spec.name.as_str()));
        match spec.transport {
            McpTransport::Stdio => {
                obj.insert("cmd".to_string(), Value::from(spec.command.as_str()));
                obj.insert("args".to_string(), Value::from(stdio_args(spec)));
                obj.insert("type".to_string(), Value::from("stdio"));
                obj.insert("enabled".to_string(), Value::Bool(false));
                obj.insert("timeout".to_string(), Value::from(spec.timeout));
            }
            McpTransport::Sse | McpTransport::Http => {
                let tag = match spec.transport {
                    McpTransport::Sse => "sse",
                    _ => "streamable_http",
                };
                obj.insert(
                    "description".to_string(),
                    Value::from(format!("{} MCP server", spec.name)),
                );
                obj.insert("type".to_string(), Value::from(tag));
                obj.insert("uri".to_string(), Value::from(spec.url()));
                obj.insert("enabled".to_string(), Value::Bool(false));
                obj.insert("timeout".to_string(), Value::from(spec.timeout));
                obj.insert("envs".to_string(), Value::Object(Map::new()));
                obj.insert("env_keys".to_string(), Value::Array(Vec::new()));
                obj.insert("available_tools".to_string(), Value::Array(Vec::new()));
                obj.insert("bundled".to_string(), Value::Null);
                if !spec.headers.is_empty() {
                    obj.insert("headers".to_string(), headers_value(spec));
                }
            }
        }
        Value::Object(obj)
    }
}
