//! One requested change or query against one client.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::client::{ClientCapabilities, ClientId};
use crate::error::{McpConfError, Result};
use crate::mcp::spec::{DEFAULT_TIMEOUT, EntrySpec, McpAuth, McpTransport};
use crate::types::ConfigScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Add,
    Update,
    Remove,
    Enable,
    Disable,
    List,
    Show,
    Where,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Remove => "rm",
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::List => "ls",
            Self::Show => "show",
            Self::Where => "where",
        }
    }

    /// Add and update write a full entry.
    pub fn writes_entry(self) -> bool {
        matches!(self, Self::Add | Self::Update)
    }

    pub fn is_toggle(self) -> bool {
        matches!(self, Self::Enable | Self::Disable)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = McpConfError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim() {
            "add" => Ok(Self::Add),
            "update" => Ok(Self::Update),
            "rm" | "remove" => Ok(Self::Remove),
            "enable" => Ok(Self::Enable),
            "disable" => Ok(Self::Disable),
            "ls" | "list" => Ok(Self::List),
            "show" => Ok(Self::Show),
            "where" => Ok(Self::Where),
            other => Err(McpConfError::validation(format!(
                "Unknown command: {other} (add | update | rm | ls | enable | disable | where | show)"
            ))),
        }
    }
}

/// A single invocation against a single client.
///
/// Built by the caller, then checked and completed by [`Operation::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub action: Action,
    pub client: ClientId,
    /// `None` until resolved against the client's default scope.
    pub scope: Option<ConfigScope>,
    pub name: Option<String>,
    pub transport: McpTransport,
    pub command: String,
    pub timeout: u64,
    pub url: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub auth: Option<McpAuth>,
    /// `None` leaves the client's default policy in charge.
    pub enabled: Option<bool>,
    pub force: bool,
    pub all_projects: bool,
    pub project_path: Option<String>,
    pub dry_run: bool,
}

impl Operation {
    pub fn new(action: Action, client: ClientId) -> Self {
        Self {
            action,
            client,
            scope: None,
            name: None,
            transport: McpTransport::Stdio,
            command: String::new(),
            timeout: DEFAULT_TIMEOUT,
            url: None,
            headers: BTreeMap::new(),
            auth: None,
            enabled: None,
            force: false,
            all_projects: false,
            project_path: None,
            dry_run: false,
        }
    }

    pub fn with_scope(mut self, scope: ConfigScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_transport(mut self, transport: McpTransport) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_auth(mut self, auth: McpAuth) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_all_projects(mut self, all_projects: bool) -> Self {
        self.all_projects = all_projects;
        self
    }

    pub fn with_project_path(mut self, path: impl Into<String>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The resolved scope, or the client's default when unresolved.
    pub fn scope_or_default(&self, caps: &ClientCapabilities) -> ConfigScope {
        self.scope.unwrap_or(caps.default_scope)
    }

    /// Name as validated by `resolve`; empty only for `list`.
    pub fn server_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Check the operation against the client and fill in the default scope.
    ///
    /// Returns a new operation; `self` is left untouched.
    pub fn resolve(&self, caps: &ClientCapabilities) -> Result<Operation> {
        let scope = self.scope_or_default(caps);
        let label = self.client;

        if self.action != Action::List && self.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            return Err(McpConfError::validation(
                "Provide --name <serverName> (required).",
            ));
        }

        if !caps.supports_scope(scope) {
            let allowed: Vec<&str> = caps.scopes.scopes().iter().map(|s| s.as_str()).collect();
            return Err(McpConfError::validation(format!(
                "{label} supports {} configuration only. Use --{}.",
                allowed.join("/"),
                allowed.first().copied().unwrap_or("global"),
            )));
        }

        if self.timeout == 0 {
            return Err(McpConfError::validation("--timeout must be a positive number of seconds."));
        }

        if self.action.writes_entry() {
            self.check_connection(caps)?;
        }

        self.check_project_selection(scope)?;

        Ok(Operation {
            scope: Some(scope),
            ..self.clone()
        })
    }

    fn check_connection(&self, caps: &ClientCapabilities) -> Result<()> {
        if !caps.supports_transport(self.transport) {
            return Err(McpConfError::validation(format!(
                "{} does not support {} transport.",
                self.client,
                self.transport.as_str().to_uppercase()
            )));
        }
        if self.transport.is_stdio() {
            if self.auth.is_none() {
                return Err(McpConfError::validation(
                    "Provide --env, --env-path <path>, --session-env, or --mcp <destination>.",
                ));
            }
            if self.url.is_some() || !self.headers.is_empty() {
                return Err(McpConfError::validation(
                    "--url/--header are only valid for sse/http transports.",
                ));
            }
            if self.command.trim().is_empty() {
                return Err(McpConfError::validation("Provide --command <bin> for stdio transport."));
            }
        } else {
            if self.url.as_deref().is_none_or(|u| u.trim().is_empty()) {
                return Err(McpConfError::validation(
                    "Provide --url <http(s)://...> for sse/http transports.",
                ));
            }
            if self.auth.is_some() {
                return Err(McpConfError::validation(
                    "--env/--env-path/--mcp are only valid for stdio transport.",
                ));
            }
        }
        Ok(())
    }

    fn check_project_selection(&self, scope: ConfigScope) -> Result<()> {
        if !self.all_projects && self.project_path.is_none() {
            return Ok(());
        }
        if self.client != ClientId::Claude {
            return Err(McpConfError::validation(
                "--project/--all-projects are only supported for Claude.",
            ));
        }
        if self.all_projects && self.project_path.is_some() {
            return Err(McpConfError::validation(
                "Use either --project or --all-projects (not both).",
            ));
        }
        if self.all_projects && self.action.writes_entry() {
            return Err(McpConfError::validation(
                "--all-projects is only supported for rm/enable/disable/ls/where/show.",
            ));
        }
        // Local enable/disable edits the global document's project lists,
        // so a project may still be named.
        let effective_global =
            scope == ConfigScope::Global || (self.action.is_toggle() && !self.all_projects);
        if !effective_global {
            return Err(McpConfError::validation(
                "--project/--all-projects are only supported for Claude global config.",
            ));
        }
        Ok(())
    }

    /// The entry request for add/update. Call on a resolved operation.
    pub fn entry_spec(&self) -> EntrySpec {
        EntrySpec {
            name: self.server_name().to_string(),
            transport: self.transport,
            command: self.command.clone(),
            timeout: self.timeout,
            url: self.url.clone(),
            headers: self.headers.clone(),
            auth: self.auth.clone(),
            enabled: self.enabled,
            force: self.force,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientRegistry;

    fn caps(client: ClientId) -> ClientCapabilities {
        ClientRegistry::with_default_clients()
            .get(client)
            .expect("registered")
            .capabilities()
    }

    fn stdio_add(client: ClientId) -> Operation {
        Operation::new(Action::Add, client)
            .with_name("abap")
            .with_command("mcp-abap-adt")
            .with_auth(McpAuth::SessionEnv)
    }

    fn resolve(op: &Operation) -> Result<Operation> {
        op.resolve(&caps(op.client))
    }

    #[test]
    fn action_aliases() {
        assert_eq!("rm".parse::<Action>().expect("rm"), Action::Remove);
        assert_eq!("ls".parse::<Action>().expect("ls"), Action::List);
        assert!("tui".parse::<Action>().is_err());
    }

    #[test]
    fn resolve_fills_default_scope_without_mutating() {
        let op = stdio_add(ClientId::Copilot);
        let resolved = resolve(&op).expect("resolve");
        assert_eq!(resolved.scope, Some(ConfigScope::Local));
        assert_eq!(op.scope, None);

        let resolved = resolve(&stdio_add(ClientId::Cline)).expect("resolve");
        assert_eq!(resolved.scope, Some(ConfigScope::Global));
    }

    #[test]
    fn name_required_except_for_list() {
        let op = Operation::new(Action::Remove, ClientId::Cursor);
        assert!(matches!(resolve(&op), Err(McpConfError::Validation(_))));

        let op = Operation::new(Action::List, ClientId::Cursor);
        assert!(resolve(&op).is_ok());
    }

    #[test]
    fn stdio_requires_auth_and_rejects_url() {
        let op = Operation::new(Action::Add, ClientId::Cursor)
            .with_name("abap")
            .with_command("mcp-abap-adt");
        assert!(resolve(&op).is_err());

        let op = stdio_add(ClientId::Cursor).with_url("http://h/mcp");
        assert!(resolve(&op).is_err());

        let op = stdio_add(ClientId::Cursor).with_header("a", "b");
        assert!(resolve(&op).is_err());
    }

    #[test]
    fn remote_requires_url_and_rejects_auth() {
        let op = Operation::new(Action::Add, ClientId::Cursor)
            .with_name("abap")
            .with_transport(McpTransport::Http);
        assert!(resolve(&op).is_err());

        let op = op.with_url("http://h/mcp");
        assert!(resolve(&op).is_ok());

        let op = op.with_auth(McpAuth::SessionEnv);
        assert!(resolve(&op).is_err());
    }

    #[test]
    fn unsupported_scope_and_transport() {
        let op = stdio_add(ClientId::Windsurf).with_scope(ConfigScope::Local);
        let err = resolve(&op).expect_err("must fail");
        assert_eq!(err.to_string(), "Windsurf supports global configuration only. Use --global.");

        let op = Operation::new(Action::Add, ClientId::Codex)
            .with_name("abap")
            .with_transport(McpTransport::Sse)
            .with_url("http://h/sse");
        let err = resolve(&op).expect_err("must fail");
        assert_eq!(err.to_string(), "Codex does not support SSE transport.");
    }

    #[test]
    fn transport_is_not_checked_for_reads() {
        let op = Operation::new(Action::Remove, ClientId::OpenCode)
            .with_name("abap")
            .with_transport(McpTransport::Sse);
        assert!(resolve(&op).is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let op = stdio_add(ClientId::Cursor).with_timeout(0);
        assert!(resolve(&op).is_err());
    }

    #[test]
    fn project_selection_rules() {
        let op = Operation::new(Action::List, ClientId::Cursor).with_all_projects(true);
        assert!(resolve(&op).is_err());

        let op = Operation::new(Action::List, ClientId::Claude)
            .with_all_projects(true)
            .with_project_path("/p");
        assert!(resolve(&op).is_err());

        let op = stdio_add(ClientId::Claude).with_all_projects(true);
        assert!(resolve(&op).is_err());

        let op = Operation::new(Action::List, ClientId::Claude)
            .with_scope(ConfigScope::Local)
            .with_project_path("/p");
        assert!(resolve(&op).is_err());

        let op = Operation::new(Action::Enable, ClientId::Claude)
            .with_name("abap")
            .with_scope(ConfigScope::Local)
            .with_project_path("/p");
        assert!(resolve(&op).is_ok());

        let op = Operation::new(Action::Disable, ClientId::Claude)
            .with_name("abap")
            .with_all_projects(true);
        assert!(resolve(&op).is_ok());
    }

    #[test]
    fn entry_spec_carries_request_fields() {
        let op = stdio_add(ClientId::Cline).with_timeout(45).with_enabled(true).with_force(true);
        let spec = resolve(&op).expect("resolve").entry_spec();
        assert_eq!(spec.name, "abap");
        assert_eq!(spec.timeout, 45);
        assert_eq!(spec.enabled, Some(true));
        assert!(spec.force);
        assert_eq!(spec.auth, Some(McpAuth::SessionEnv));
    }
}
