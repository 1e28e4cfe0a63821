//! Application context for unified dependency injection.

use std::path::{Path, PathBuf};

use crate::client::{ClientId, ClientRegistry};
use crate::config::{DocumentStore, PathContext, config_path};
use crate::error::{McpConfError, Result};
use crate::types::{ConfigScope, Platform};

/// Everything the command layer needs from the environment.
///
/// Frontends create this once and pass it to commands; tests build it from
/// temporary directories with [`AppContext::new`].
#[derive(Debug)]
pub struct AppContext {
    paths: PathContext,
    registry: ClientRegistry,
}

impl AppContext {
    /// Create a new context with explicit paths.
    pub fn new(paths: PathContext) -> Self {
        Self {
            paths,
            registry: ClientRegistry::with_default_clients(),
        }
    }

    /// Gather paths from the running process: home directory, current
    /// directory as project root, and the Windows profile variables.
    pub fn from_env() -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| McpConfError::validation("Could not determine home directory"))?;
        let project_root =
            std::env::current_dir().map_err(|err| McpConfError::io(PathBuf::from("."), err))?;

        let mut paths = PathContext::new(Platform::current(), home_dir, project_root);
        paths.app_data = env_dir("APPDATA");
        paths.user_profile = env_dir("USERPROFILE");
        paths.local_app_data = env_dir("LOCALAPPDATA");
        Ok(Self::new(paths))
    }

    /// Replace the adapter registry, e.g. with one carrying extra or
    /// shadowing adapters.
    pub fn with_registry(mut self, registry: ClientRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn home_dir(&self) -> &Path {
        &self.paths.home_dir
    }

    pub fn project_root(&self) -> &Path {
        &self.paths.project_root
    }

    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    /// Config file of `client` at `scope`, as decided by its registered adapter.
    pub fn config_path(&self, client: ClientId, scope: ConfigScope) -> Result<PathBuf> {
        config_path(self.registry.require(client)?, scope, &self.paths)
    }

    /// Project key used for Claude's global document when no `--project`
    /// is given.
    pub fn default_project_key(&self) -> String {
        self.paths.project_root.to_string_lossy().into_owned()
    }

    pub fn document_store(&self, dry_run: bool) -> DocumentStore {
        DocumentStore::new().with_dry_run(dry_run)
    }
}

fn env_dir(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
