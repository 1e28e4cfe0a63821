//! Client-independent view of stored entries.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::client::ClientAdapter;
use crate::mcp::args;
use crate::mcp::spec::{DEFAULT_TIMEOUT, McpTransport, NormalizedEntry};

/// Convert a raw entry stored by `adapter`'s client into a [`NormalizedEntry`].
///
/// Never fails: fields of the wrong type are treated as absent, and a
/// non-mapping entry normalizes to a stdio entry with unknown auth.
pub fn normalize(adapter: &dyn ClientAdapter, name: &str, raw: &Value) -> NormalizedEntry {
    let client = adapter.id();
    let fields = adapter.capabilities().entry_fields;
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let (command, argv) = command_and_args(obj, fields.command);
    let decoded = args::decode(&argv);
    let url = string_field(obj, fields.url).or_else(|| string_field(obj, "url"));

    let transport = obj
        .get("type")
        .and_then(Value::as_str)
        .and_then(McpTransport::from_tag)
        .or_else(|| url.as_ref().map(|_| McpTransport::Http))
        .or(decoded.transport)
        .unwrap_or(McpTransport::Stdio);

    let timeout = obj
        .get(fields.timeout)
        .and_then(|value| {
            value
                .as_u64()
                .or_else(|| value.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
        })
        .unwrap_or(DEFAULT_TIMEOUT);

    if transport.is_stdio() {
        NormalizedEntry {
            client,
            name: name.to_string(),
            transport,
            command,
            timeout,
            url: None,
            headers: None,
            auth: Some(decoded.normalized_auth()),
        }
    } else {
        NormalizedEntry {
            client,
            name: name.to_string(),
            transport,
            command: None,
            timeout,
            url,
            headers: headers(obj, fields.headers),
            auth: None,
        }
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Command plus argument list. An array-valued command carries its own
/// arguments, which come before any separate `args`.
fn command_and_args(obj: &Map<String, Value>, command_field: &str) -> (Option<String>, Vec<String>) {
    let mut argv = Vec::new();
    let command = match obj.get(command_field) {
        Some(Value::String(command)) => Some(command.clone()),
        Some(Value::Array(parts)) => {
            let mut parts = parts.iter().filter_map(Value::as_str).map(str::to_string);
            let command = parts.next();
            argv.extend(parts);
            command
        }
        _ => None,
    };
    if let Some(Value::Array(items)) = obj.get("args") {
        argv.extend(items.iter().filter_map(Value::as_str).map(str::to_string));
    }
    (command, argv)
}

fn headers(obj: &Map<String, Value>, key: &str) -> Option<BTreeMap<String, String>> {
    let map = obj.get(key)?.as_object()?;
    Some(
        map.iter()
            .map(|(name, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), value)
            })
            .collect(),
    )
}
