//! Client adapter layer.
//!
//! Every supported AI client persists MCP servers in its own file and schema.
//! A [`ClientAdapter`] translates canonical requests into one of those schemas
//! and back, operating purely on an in-memory [`RawDocument`]. Reading and
//! writing files is left to the command layer.

pub mod antigravity;
pub mod claude;
pub mod cline;
pub mod codex;
pub mod copilot;
pub mod crush;
pub mod cursor;
pub mod goose;
pub mod opencode;
pub mod project_key;
pub mod registry;
pub mod windsurf;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::client_config::ConfigFormat;
use crate::config::document::RawDocument;
use crate::error::{McpConfError, Result};
use crate::mcp::spec::{EntrySpec, McpTransport};
use crate::types::ConfigScope;

pub use registry::ClientRegistry;

/// Closed set of supported clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientId {
    Cline,
    Codex,
    Claude,
    Goose,
    Cursor,
    Windsurf,
    OpenCode,
    Copilot,
    Antigravity,
    Crush,
}

impl ClientId {
    pub const ALL: [ClientId; 10] = [
        ClientId::Cline,
        ClientId::Codex,
        ClientId::Claude,
        ClientId::Goose,
        ClientId::Cursor,
        ClientId::Windsurf,
        ClientId::OpenCode,
        ClientId::Copilot,
        ClientId::Antigravity,
        ClientId::Crush,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cline => "cline",
            Self::Codex => "codex",
            Self::Claude => "claude",
            Self::Goose => "goose",
            Self::Cursor => "cursor",
            Self::Windsurf => "windsurf",
            Self::OpenCode => "opencode",
            Self::Copilot => "copilot",
            Self::Antigravity => "antigravity",
            Self::Crush => "crush",
        }
    }

    /// Human-facing product name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cline => "Cline",
            Self::Codex => "Codex",
            Self::Claude => "Claude",
            Self::Goose => "Goose",
            Self::Cursor => "Cursor",
            Self::Windsurf => "Windsurf",
            Self::OpenCode => "OpenCode",
            Self::Copilot => "GitHub Copilot",
            Self::Antigravity => "Antigravity",
            Self::Crush => "Crush",
        }
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClientId {
    type Err = McpConfError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        // Kilo Code reads the OpenCode schema.
        if normalized == "kilo" {
            return Ok(Self::OpenCode);
        }
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| McpConfError::validation(format!("Unknown client: {value}")))
    }
}

/// Scope support flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeSupport {
    pub global: bool,
    pub local: bool,
}

impl ScopeSupport {
    pub const GLOBAL: ScopeSupport = ScopeSupport {
        global: true,
        local: false,
    };
    pub const LOCAL: ScopeSupport = ScopeSupport {
        global: false,
        local: true,
    };
    pub const BOTH: ScopeSupport = ScopeSupport {
        global: true,
        local: true,
    };

    pub fn supports(&self, scope: ConfigScope) -> bool {
        match scope {
            ConfigScope::Global => self.global,
            ConfigScope::Local => self.local,
        }
    }

    pub fn scopes(&self) -> Vec<ConfigScope> {
        [ConfigScope::Global, ConfigScope::Local]
            .into_iter()
            .filter(|scope| self.supports(*scope))
            .collect()
    }
}

/// How a client records whether an entry is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleStyle {
    /// `disabled: true` on the entry.
    DisabledFlag,
    /// `enabled: false` on the entry.
    EnabledFlag,
    /// Name membership in per-project enabled/disabled lists.
    ProjectLists,
    /// The client has no enable/disable signal.
    Unsupported,
}

/// Field names the client uses inside a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFields {
    pub command: &'static str,
    pub url: &'static str,
    pub timeout: &'static str,
    pub headers: &'static str,
}

impl EntryFields {
    pub const STANDARD: EntryFields = EntryFields {
        command: "command",
        url: "url",
        timeout: "timeout",
        headers: "headers",
    };
}

/// Static description of a client's store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCapabilities {
    pub scopes: ScopeSupport,
    pub default_scope: ConfigScope,
    pub supported_transports: Vec<McpTransport>,
    /// Top-level key holding the server map.
    pub store_field: &'static str,
    pub format: ConfigFormat,
    pub default_disabled_on_create: bool,
    pub toggle: ToggleStyle,
    pub entry_fields: EntryFields,
}

impl ClientCapabilities {
    pub fn supports_toggle(&self) -> bool {
        self.toggle != ToggleStyle::Unsupported
    }

    pub fn supports_scope(&self, scope: ConfigScope) -> bool {
        self.scopes.supports(scope)
    }

    pub fn supports_transport(&self, transport: McpTransport) -> bool {
        self.supported_transports.contains(&transport)
    }

    fn all_transports() -> Vec<McpTransport> {
        vec![McpTransport::Stdio, McpTransport::Sse, McpTransport::Http]
    }
}

/// Which Claude project(s) a global-scope request addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSelector {
    /// A single project path, resolved against existing keys before use.
    Path(String),
    /// Every key under `projects`.
    All,
}

/// Where inside a document an adapter call applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreTarget {
    pub scope: ConfigScope,
    pub project: ProjectSelector,
    /// The entry lives in the project's own server file and was verified
    /// there, so the global document only carries its enabled state.
    pub declared_in_project_file: bool,
}

impl StoreTarget {
    pub fn new(scope: ConfigScope, project: ProjectSelector) -> Self {
        Self {
            scope,
            project,
            declared_in_project_file: false,
        }
    }

    pub fn global(project: impl Into<String>) -> Self {
        Self::new(ConfigScope::Global, ProjectSelector::Path(project.into()))
    }

    pub fn local(project: impl Into<String>) -> Self {
        Self::new(ConfigScope::Local, ProjectSelector::Path(project.into()))
    }

    pub fn with_declared_in_project_file(mut self, declared: bool) -> Self {
        self.declared_in_project_file = declared;
        self
    }
}

/// Names found in one store, optionally labelled with the Claude project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreListing {
    pub project: Option<String>,
    pub names: BTreeSet<String>,
}

impl StoreListing {
    pub fn new(project: Option<String>, store: Option<&Map<String, Value>>) -> Self {
        Self {
            project,
            names: store
                .map(|map| map.keys().cloned().collect())
                .unwrap_or_default(),
        }
    }
}

/// A raw entry returned by `show`.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundEntry {
    pub project: Option<String>,
    pub entry: Value,
}

/// Contract every client adapter fulfils over a [`RawDocument`].
///
/// The provided methods implement the common single-map store (`<field>.<name>`)
/// with a boolean toggle flag; adapters with other layouts override them.
/// Failing calls leave the document as it was.
pub trait ClientAdapter: Send + Sync + fmt::Debug {
    fn id(&self) -> ClientId;

    fn capabilities(&self) -> ClientCapabilities;

    /// Render the stored entry for a resolved request.
    fn build_entry(&self, spec: &EntrySpec) -> Value;

    fn ensure_store(&self, doc: &mut RawDocument, _target: &StoreTarget) -> Result<()> {
        doc.ensure_map(&[self.capabilities().store_field])?;
        Ok(())
    }

    fn add(&self, doc: &mut RawDocument, target: &StoreTarget, spec: &EntrySpec) -> Result<()> {
        let field = self.capabilities().store_field;
        if !spec.force && store_contains(doc, field, &spec.name)? {
            return Err(McpConfError::already_exists(&spec.name, field));
        }
        self.ensure_store(doc, target)?;
        doc.ensure_map(&[field])?
            .insert(spec.name.clone(), self.build_entry(spec));
        Ok(())
    }

    /// Replace an existing entry; unlike a forced add it never creates one.
    fn update(
        &self,
        doc: &mut RawDocument,
        target: &StoreTarget,
        spec: &EntrySpec,
    ) -> Result<()> {
        let field = self.capabilities().store_field;
        if !store_contains(doc, field, &spec.name)? {
            return Err(McpConfError::not_found(&spec.name, field));
        }
        self.add(doc, target, &spec.clone().with_force(true))
    }

    fn remove(&self, doc: &mut RawDocument, _target: &StoreTarget, name: &str) -> Result<()> {
        let field = self.capabilities().store_field;
        let removed = doc
            .map_at_mut(&[field])?
            .and_then(|store| store.shift_remove(name));
        match removed {
            Some(_) => Ok(()),
            None => Err(McpConfError::not_found(name, field)),
        }
    }

    fn toggle(
        &self,
        doc: &mut RawDocument,
        _target: &StoreTarget,
        name: &str,
        disabled: bool,
    ) -> Result<()> {
        let caps = self.capabilities();
        let (key, value) = match caps.toggle {
            ToggleStyle::DisabledFlag => ("disabled", disabled),
            ToggleStyle::EnabledFlag => ("enabled", !disabled),
            ToggleStyle::ProjectLists | ToggleStyle::Unsupported => {
                return Err(McpConfError::UnsupportedOperation {
                    client: self.id(),
                    operation: "enable/disable",
                });
            }
        };
        let entry = doc
            .map_at_mut(&[caps.store_field])?
            .and_then(|store| store.get_mut(name))
            .ok_or_else(|| McpConfError::not_found(name, caps.store_field))?;
        match entry {
            Value::Object(fields) => {
                fields.insert(key.to_string(), Value::Bool(value));
                Ok(())
            }
            _ => Err(McpConfError::UnexpectedShape {
                field: format!("{}.{name}", caps.store_field),
                expected: "a mapping",
            }),
        }
    }

    fn list(&self, doc: &RawDocument, _target: &StoreTarget) -> Result<Vec<StoreListing>> {
        let store = doc.map_at(&[self.capabilities().store_field])?;
        Ok(vec![StoreListing::new(None, store)])
    }

    fn show(&self, doc: &RawDocument, _target: &StoreTarget, name: &str) -> Result<Vec<FoundEntry>> {
        let field = self.capabilities().store_field;
        doc.map_at(&[field])?
            .and_then(|store| store.get(name))
            .map(|entry| {
                vec![FoundEntry {
                    project: None,
                    entry: entry.clone(),
                }]
            })
            .ok_or_else(|| McpConfError::not_found(name, field))
    }
}

fn store_contains(doc: &RawDocument, field: &str, name: &str) -> Result<bool> {
    Ok(doc
        .map_at(&[field])?
        .is_some_and(|store| store.contains_key(name)))
}

/// Remote entry body shared by most JSON clients: `{type, <url>, timeout, headers?}`.
pub(crate) fn remote_entry(
    spec: &EntrySpec,
    type_tag: &str,
    url_field: &str,
    with_timeout: bool,
) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::from(type_tag));
    obj.insert(url_field.to_string(), Value::from(spec.url()));
    if with_timeout {
        obj.insert("timeout".to_string(), Value::from(spec.timeout));
    }
    if !spec.headers.is_empty() {
        obj.insert("headers".to_string(), headers_value(spec));
    }
    obj
}

/// Stdio entry body shared by most JSON clients: `{command, args, timeout}`.
pub(crate) fn stdio_entry(spec: &EntrySpec, timeout_field: &str) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("command".to_string(), Value::from(spec.command.as_str()));
    obj.insert("args".to_string(), Value::from(stdio_args(spec)));
    obj.insert(timeout_field.to_string(), Value::from(spec.timeout));
    obj
}

pub(crate) fn stdio_args(spec: &EntrySpec) -> Vec<String> {
    spec.auth
        .as_ref()
        .map(|auth| crate::mcp::args::encode(spec.transport, auth))
        .unwrap_or_default()
}

pub(crate) fn headers_value(spec: &EntrySpec) -> Value {
    Value::Object(
        spec.headers
            .iter()
            .map(|(key, value)| (key.clone(), Value::from(value.as_str())))
            .collect(),
    )
}
