//! Client registry for looking up adapters by id.
//!
//! The registry is the only place that knows the full set of adapters; the
//! command layer resolves a [`ClientId`] here and talks to the trait object.

use crate::error::{McpConfError, Result};
use crate::types::ConfigScope;

use super::{
    ClientAdapter, ClientId, antigravity::AntigravityClient, claude::ClaudeClient,
    cline::ClineClient, codex::CodexClient, copilot::CopilotClient, crush::CrushClient,
    cursor::CursorClient, goose::GooseClient, opencode::OpenCodeClient,
    windsurf::WindsurfClient,
};

/// Registry of available client adapters.
#[derive(Debug)]
pub struct ClientRegistry {
    clients: Vec<Box<dyn ClientAdapter>>,
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::with_default_clients()
    }
}

impl ClientRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            clients: Vec::new(),
        }
    }

    /// Create a registry with every supported client.
    pub fn with_default_clients() -> Self {
        let clients: Vec<Box<dyn ClientAdapter>> = vec![
            Box::new(ClineClient::new()),
            Box::new(CodexClient::new()),
            Box::new(ClaudeClient::new()),
            Box::new(GooseClient::new()),
            Box::new(CursorClient::new()),
            Box::new(WindsurfClient::new()),
            Box::new(OpenCodeClient::new()),
            Box::new(CopilotClient::new()),
            Box::new(AntigravityClient::new()),
            Box::new(CrushClient::new()),
        ];
        Self { clients }
    }

    /// Register a client adapter. A later registration shadows an earlier
    /// one with the same id.
    pub fn register(&mut self, client: Box<dyn ClientAdapter>) {
        self.clients.insert(0, client);
    }

    pub fn all(&self) -> &[Box<dyn ClientAdapter>] {
        &self.clients
    }

    pub fn get(&self, id: ClientId) -> Option<&dyn ClientAdapter> {
        self.clients
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.as_ref())
    }

    /// Like [`get`](Self::get), failing with a validation error.
    pub fn require(&self, id: ClientId) -> Result<&dyn ClientAdapter> {
        self.get(id)
            .ok_or_else(|| McpConfError::validation(format!("No adapter registered for {id}")))
    }

    /// Clients whose configuration can live at the given scope.
    pub fn clients_for_scope(&self, scope: ConfigScope) -> Vec<&dyn ClientAdapter> {
        self.clients
            .iter()
            .filter(|c| c.capabilities().supports_scope(scope))
            .map(|c| c.as_ref())
            .collect()
    }

    pub fn client_ids(&self) -> Vec<ClientId> {
        self.clients.iter().map(|c| c.id()).collect()
    }
}
