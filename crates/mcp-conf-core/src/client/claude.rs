//! Claude client implementation.
//!
//! Claude has two stores with different layouts:
//!
//! - Global (`~/.claude.json` or `claude_desktop_config.json`): servers are
//!   kept per project under `projects.<key>.mcpServers`, and whether a server
//!   is active is recorded by name in the project's `enabledMcpServers` /
//!   `disabledMcpServers` lists.
//! - Local (`.mcp.json` in the project root): a plain `mcpServers` map with
//!   no enabled state of its own.

use serde_json::{Map, Value};
use tracing::debug;

use crate::client::project_key::resolve_project_key;
use crate::client::{
    ClientAdapter, ClientCapabilities, ClientId, EntryFields, FoundEntry, ProjectSelector,
    ScopeSupport, StoreListing, StoreTarget, ToggleStyle, remote_entry, stdio_entry,
};
use crate::config::client_config::ConfigFormat;
use crate::config::document::RawDocument;
use crate::error::{McpConfError, Result};
use crate::mcp::spec::EntrySpec;
use crate::types::ConfigScope;

const PROJECTS: &str = "projects";
const SERVERS: &str = "mcpServers";
const ENABLED: &str = "enabledMcpServers";
const DISABLED: &str = "disabledMcpServers";
const LEGACY_ENABLED: &str = "enabledMcpjsonServers";
const LEGACY_DISABLED: &str = "disabledMcpjsonServers";

/// Label used for an all-projects listing over a document without projects.
pub const NO_PROJECTS: &str = "no-projects";

#[derive(Debug, Default)]
pub struct ClaudeClient {
    project_file: ProjectFileStore,
}

impl ClaudeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the project keys a global-scope target addresses.
    ///
    /// A single path is matched against existing keys (following symlinks);
    /// `All` yields every key in sorted order.
    pub fn project_keys(&self, doc: &RawDocument, target: &StoreTarget) -> Result<Vec<String>> {
        let projects = doc.map_at(&[PROJECTS])?;
        match &target.project {
            ProjectSelector::Path(path) => Ok(vec![resolve_project_key(projects, path)]),
            ProjectSelector::All => {
                let mut keys: Vec<String> = projects
                    .map(|map| map.keys().cloned().collect())
                    .unwrap_or_default();
                keys.sort();
                Ok(keys)
            }
        }
    }

    fn single_project_key(
        &self,
        doc: &RawDocument,
        target: &StoreTarget,
        operation: &str,
    ) -> Result<String> {
        match &target.project {
            ProjectSelector::Path(path) => Ok(resolve_project_key(doc.map_at(&[PROJECTS])?, path)),
            ProjectSelector::All => Err(McpConfError::validation(format!(
                "--all-projects cannot be used with {operation}."
            ))),
        }
    }

    fn project_has_server(doc: &RawDocument, key: &str, name: &str) -> Result<bool> {
        Ok(doc
            .map_at(&[PROJECTS, key, SERVERS])?
            .is_some_and(|store| store.contains_key(name)))
    }

    /// Project node for `key`, created with Claude's default layout if absent.
    fn project_node<'a>(doc: &'a mut RawDocument, key: &str) -> Result<&'a mut Map<String, Value>> {
        let projects = doc.ensure_map(&[PROJECTS])?;
        let slot = projects
            .entry(key.to_string())
            .or_insert_with(new_project_node);
        if slot.is_null() {
            *slot = new_project_node();
        }
        match slot {
            Value::Object(node) => Ok(node),
            _ => Err(unexpected_shape(format!("{PROJECTS}.{key}"), "a mapping")),
        }
    }

    fn project_location(target: &StoreTarget, key: Option<&str>) -> String {
        match (&target.project, key) {
            (ProjectSelector::All, _) => "any Claude project".to_string(),
            (_, Some(key)) => format!("project {key}"),
            (_, None) => PROJECTS.to_string(),
        }
    }
}

impl ClientAdapter for ClaudeClient {
    fn id(&self) -> ClientId {
        ClientId::Claude
    }

    fn capabilities(&self) -> ClientCapabilities {
        ClientCapabilities {
            toggle: ToggleStyle::ProjectLists,
            ..self.project_file.capabilities()
        }
    }

    /// Entry stored under a project in the global document.
    fn build_entry(&self, spec: &EntrySpec) -> Value {
        if spec.transport.is_stdio() {
            let mut obj = Map::new();
            obj.insert("type".to_string(), Value::from("stdio"));
            obj.extend(stdio_entry(spec, "timeout"));
            obj.insert("env".to_string(), Value::Object(Map::new()));
            Value::Object(obj)
        } else {
            self.project_file.build_entry(spec)
        }
    }

    fn ensure_store(&self, doc: &mut RawDocument, target: &StoreTarget) -> Result<()> {
        if target.scope == ConfigScope::Local {
            return self.project_file.ensure_store(doc, target);
        }
        let key = self.single_project_key(doc, target, "add")?;
        let node = Self::project_node(doc, &key)?;
        ensure_node_map(node, SERVERS)?;
        Ok(())
    }

    fn add(&self, doc: &mut RawDocument, target: &StoreTarget, spec: &EntrySpec) -> Result<()> {
        if target.scope == ConfigScope::Local {
            return self.project_file.add(doc, target, spec);
        }
        let key = self.single_project_key(doc, target, "add")?;
        if !spec.force && Self::project_has_server(doc, &key, &spec.name)? {
            return Err(McpConfError::already_exists(
                &spec.name,
                Self::project_location(target, Some(&key)),
            ));
        }

        let entry = self.build_entry(spec);
        let disabled = spec.disabled(self.capabilities().default_disabled_on_create);
        let node = Self::project_node(doc, &key)?;
        // Validate list shapes before the first mutation.
        ensure_node_list(node, ENABLED)?;
        ensure_node_list(node, DISABLED)?;
        ensure_node_map(node, SERVERS)?.insert(spec.name.clone(), entry);
        fold_legacy_lists(node)?;
        set_membership(node, &spec.name, disabled)?;
        debug!(project = %key, server = %spec.name, disabled, "Added Claude project server");
        Ok(())
    }

    fn update(&self, doc: &mut RawDocument, target: &StoreTarget, spec: &EntrySpec) -> Result<()> {
        if target.scope == ConfigScope::Local {
            return self.project_file.update(doc, target, spec);
        }
        let key = self.single_project_key(doc, target, "update")?;
        if !Self::project_has_server(doc, &key, &spec.name)? {
            return Err(McpConfError::not_found(
                &spec.name,
                Self::project_location(target, Some(&key)),
            ));
        }
        self.add(doc, target, &spec.clone().with_force(true))
    }

    fn remove(&self, doc: &mut RawDocument, target: &StoreTarget, name: &str) -> Result<()> {
        if target.scope == ConfigScope::Local {
            return self.project_file.remove(doc, target, name);
        }
        let keys = self.project_keys(doc, target)?;
        let mut matched = Vec::new();
        for key in &keys {
            if Self::project_has_server(doc, key, name)? {
                matched.push(key.clone());
            }
        }
        if matched.is_empty() {
            return Err(McpConfError::not_found(
                name,
                Self::project_location(target, keys.first().map(String::as_str)),
            ));
        }

        for key in matched {
            let node = Self::project_node(doc, &key)?;
            ensure_node_map(node, SERVERS)?.shift_remove(name);
            fold_legacy_lists(node)?;
            drop_membership(node, name)?;
            debug!(project = %key, server = name, "Removed Claude project server");
        }
        Ok(())
    }

    fn toggle(
        &self,
        doc: &mut RawDocument,
        target: &StoreTarget,
        name: &str,
        disabled: bool,
    ) -> Result<()> {
        if target.scope == ConfigScope::Local {
            return Err(McpConfError::UnsupportedOperation {
                client: self.id(),
                operation: "enable/disable in the project .mcp.json",
            });
        }
        let keys = self.project_keys(doc, target)?;
        let mut matched = Vec::new();
        for key in &keys {
            // An entry declared in the project's `.mcp.json` only needs its
            // list membership here.
            let selected = target.declared_in_project_file
                && matches!(target.project, ProjectSelector::Path(_));
            if selected || Self::project_has_server(doc, key, name)? {
                matched.push(key.clone());
            }
        }
        if matched.is_empty() {
            return Err(McpConfError::not_found(
                name,
                Self::project_location(target, keys.first().map(String::as_str)),
            ));
        }

        for key in matched {
            let node = Self::project_node(doc, &key)?;
            ensure_node_list(node, ENABLED)?;
            ensure_node_list(node, DISABLED)?;
            ensure_node_map(node, SERVERS)?;
            fold_legacy_lists(node)?;
            set_membership(node, name, disabled)?;
            debug!(project = %key, server = name, disabled, "Toggled Claude project server");
        }
        Ok(())
    }

    fn list(&self, doc: &RawDocument, target: &StoreTarget) -> Result<Vec<StoreListing>> {
        if target.scope == ConfigScope::Local {
            return self.project_file.list(doc, target);
        }
        let keys = self.project_keys(doc, target)?;
        if keys.is_empty() {
            return Ok(vec![StoreListing::new(Some(NO_PROJECTS.to_string()), None)]);
        }
        keys.into_iter()
            .map(|key| {
                let store = doc.map_at(&[PROJECTS, key.as_str(), SERVERS])?;
                Ok(StoreListing::new(Some(key), store))
            })
            .collect()
    }

    fn show(&self, doc: &RawDocument, target: &StoreTarget, name: &str) -> Result<Vec<FoundEntry>> {
        if target.scope == ConfigScope::Local {
            return self.project_file.show(doc, target, name);
        }
        let keys = self.project_keys(doc, target)?;
        let mut found = Vec::new();
        for key in &keys {
            if let Some(entry) = doc
                .map_at(&[PROJECTS, key.as_str(), SERVERS])?
                .and_then(|store| store.get(name))
            {
                found.push(FoundEntry {
                    project: Some(key.clone()),
                    entry: entry.clone(),
                });
            }
        }
        if found.is_empty() {
            return Err(McpConfError::not_found(
                name,
                Self::project_location(target, keys.first().map(String::as_str)),
            ));
        }
        Ok(found)
    }
}

/// The project's own `.mcp.json`, a plain single-map store.
#[derive(Debug, Default)]
struct ProjectFileStore;

impl ClientAdapter for ProjectFileStore {
    fn id(&self) -> ClientId {
        ClientId::Claude
    }

    fn capabilities(&self) -> ClientCapabilities {
        ClientCapabilities {
            scopes: ScopeSupport::BOTH,
            default_scope: ConfigScope::Global,
            supported_transports: ClientCapabilities::all_transports(),
            store_field: SERVERS,
            format: ConfigFormat::Json,
            default_disabled_on_create: true,
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

fn new_project_node() -> Value {
    let mut node = Map::new();
    node.insert("allowedTools".to_string(), Value::Array(Vec::new()));
    node.insert("mcpContextUris".to_string(), Value::Array(Vec::new()));
    node.insert(SERVERS.to_string(), Value::Object(Map::new()));
    node.insert(ENABLED.to_string(), Value::Array(Vec::new()));
    node.insert(DISABLED.to_string(), Value::Array(Vec::new()));
    Value::Object(node)
}

fn unexpected_shape(field: String, expected: &'static str) -> McpConfError {
    McpConfError::UnexpectedShape { field, expected }
}

fn ensure_node_map<'a>(
    node: &'a mut Map<String, Value>,
    key: &str,
) -> Result<&'a mut Map<String, Value>> {
    let slot = node
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if slot.is_null() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => Ok(map),
        _ => Err(unexpected_shape(key.to_string(), "a mapping")),
    }
}

fn ensure_node_list<'a>(node: &'a mut Map<String, Value>, key: &str) -> Result<&'a mut Vec<Value>> {
    let slot = node
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if slot.is_null() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => Ok(items),
        _ => Err(unexpected_shape(key.to_string(), "a list")),
    }
}

fn push_unique(list: &mut Vec<Value>, name: &str) {
    if !list.iter().any(|item| item.as_str() == Some(name)) {
        list.push(Value::from(name));
    }
}

fn retain_other(list: &mut Vec<Value>, name: &str) {
    list.retain(|item| item.as_str() != Some(name));
}

/// Merge names from the legacy `*McpjsonServers` lists into the canonical
/// lists. The legacy lists themselves are not modified.
fn fold_legacy_lists(node: &mut Map<String, Value>) -> Result<()> {
    for (legacy, canonical) in [(LEGACY_ENABLED, ENABLED), (LEGACY_DISABLED, DISABLED)] {
        let names: Vec<String> = match node.get(legacy) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => continue,
        };
        let list = ensure_node_list(node, canonical)?;
        for name in &names {
            push_unique(list, name);
        }
    }
    Ok(())
}

/// Put `name` in exactly one of the enabled/disabled lists.
fn set_membership(node: &mut Map<String, Value>, name: &str, disabled: bool) -> Result<()> {
    let (add_to, remove_from) = if disabled {
        (DISABLED, ENABLED)
    } else {
        (ENABLED, DISABLED)
    };
    retain_other(ensure_node_list(node, remove_from)?, name);
    push_unique(ensure_node_list(node, add_to)?, name);
    Ok(())
}

fn drop_membership(node: &mut Map<String, Value>, name: &str) -> Result<()> {
    retain_other(ensure_node_list(node, ENABLED)?, name);
    retain_other(ensure_node_list(node, DISABLED)?, name);
    Ok(())
}
