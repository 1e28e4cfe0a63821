//! Config path resolution for every supported client.
//!
//! Resolution is pure: all environment input arrives through [`PathContext`],
//! so paths for any platform can be computed (and tested) from any host.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::client::{ClientAdapter, ClientId};
use crate::error::{McpConfError, Result};
use crate::types::{ConfigScope, Platform};

/// Environment inputs for path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    pub platform: Platform,
    pub home_dir: PathBuf,
    /// Directory local-scope files are placed in.
    pub project_root: PathBuf,
    /// `%APPDATA%` on Windows.
    pub app_data: Option<PathBuf>,
    /// `%USERPROFILE%` on Windows.
    pub user_profile: Option<PathBuf>,
    /// `%LOCALAPPDATA%` on Windows.
    pub local_app_data: Option<PathBuf>,
}

impl PathContext {
    pub fn new(platform: Platform, home_dir: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            home_dir: home_dir.into(),
            project_root: project_root.into(),
            app_data: None,
            user_profile: None,
            local_app_data: None,
        }
    }

    pub fn with_app_data(mut self, dir: impl Into<PathBuf>) -> Self {
        self.app_data = Some(dir.into());
        self
    }

    pub fn with_user_profile(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_profile = Some(dir.into());
        self
    }

    pub fn with_local_app_data(mut self, dir: impl Into<PathBuf>) -> Self {
        self.local_app_data = Some(dir.into());
        self
    }

    fn app_data(&self) -> &Path {
        self.app_data.as_deref().unwrap_or(&self.home_dir)
    }

    fn user_profile(&self) -> &Path {
        self.user_profile.as_deref().unwrap_or(&self.home_dir)
    }

    fn local_app_data(&self) -> &Path {
        self.local_app_data.as_deref().unwrap_or(&self.home_dir)
    }

    fn is_windows(&self) -> bool {
        self.platform == Platform::Windows
    }
}

/// Resolve the configuration file of `adapter`'s client at `scope`.
///
/// The scope check uses the adapter's own capabilities, so an adapter
/// registered over a default one decides which scopes are accepted.
pub fn config_path(
    adapter: &dyn ClientAdapter,
    scope: ConfigScope,
    ctx: &PathContext,
) -> Result<PathBuf> {
    require_scope(adapter, scope)?;
    let client = adapter.id();
    let path = match scope {
        ConfigScope::Global => global_path(client, ctx),
        ConfigScope::Local => local_path(client, &ctx.project_root),
    };
    debug!(client = client.as_str(), %scope, path = %path.display(), "Resolved config path");
    Ok(path)
}

fn require_scope(adapter: &dyn ClientAdapter, scope: ConfigScope) -> Result<()> {
    let caps = adapter.capabilities();
    if caps.supports_scope(scope) {
        return Ok(());
    }
    let allowed: Vec<&str> = caps.scopes.scopes().iter().map(|s| s.as_str()).collect();
    let suggestion = allowed.first().copied().unwrap_or("global");
    Err(McpConfError::validation(format!(
        "{} supports {} configuration only. Use --{suggestion}.",
        adapter.id(),
        allowed.join("/")
    )))
}

fn global_path(client: ClientId, ctx: &PathContext) -> PathBuf {
    let home = ctx.home_dir.as_path();
    match client {
        ClientId::Cline => {
            let base = if ctx.is_windows() {
                ctx.app_data().to_path_buf()
            } else {
                home.join(".config")
            };
            base.join("Code")
                .join("User")
                .join("globalStorage")
                .join("saoudrizwan.claude-dev")
                .join("settings")
                .join("cline_mcp_settings.json")
        }
        ClientId::Codex => {
            let base = if ctx.is_windows() { ctx.user_profile() } else { home };
            base.join(".codex").join("config.toml")
        }
        ClientId::Claude => match ctx.platform {
            Platform::MacOs => home
                .join("Library")
                .join("Application Support")
                .join("Claude")
                .join("claude_desktop_config.json"),
            Platform::Windows => ctx.app_data().join("Claude").join("claude_desktop_config.json"),
            Platform::Linux => home.join(".claude.json"),
        },
        ClientId::Goose => {
            if ctx.is_windows() {
                ctx.app_data()
                    .join("Block")
                    .join("goose")
                    .join("config")
                    .join("config.yaml")
            } else {
                home.join(".config").join("goose").join("config.yaml")
            }
        }
        ClientId::Cursor => {
            let base = if ctx.is_windows() { ctx.user_profile() } else { home };
            base.join(".cursor").join("mcp.json")
        }
        ClientId::Windsurf => {
            let base = if ctx.is_windows() { ctx.user_profile() } else { home };
            base.join(".codeium").join("windsurf").join("mcp_config.json")
        }
        ClientId::OpenCode => {
            if ctx.is_windows() {
                ctx.app_data().join("opencode").join("opencode.json")
            } else {
                home.join(".config").join("opencode").join("opencode.json")
            }
        }
        ClientId::Antigravity => home
            .join(".gemini")
            .join("antigravity")
            .join("mcp_config.json"),
        ClientId::Crush => {
            if ctx.is_windows() {
                ctx.local_app_data().join("crush").join("crush.json")
            } else {
                home.join(".config").join("crush").join("crush.json")
            }
        }
        // Workspace-only; rejected by `require_scope`.
        ClientId::Copilot => ctx.project_root.join(".vscode").join("mcp.json"),
    }
}

fn local_path(client: ClientId, root: &Path) -> PathBuf {
    match client {
        ClientId::Codex => root.join(".codex").join("config.toml"),
        ClientId::Claude => root.join(".mcp.json"),
        ClientId::Cursor => root.join(".cursor").join("mcp.json"),
        ClientId::OpenCode => root.join("opencode.json"),
        ClientId::Copilot => root.join(".vscode").join("mcp.json"),
        ClientId::Crush => root.join("crush.json"),
        // Global-only clients; rejected by `require_scope`.
        ClientId::Cline
        | ClientId::Goose
        | ClientId::Windsurf
        | ClientId::Antigravity => root.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientRegistry;

    fn linux() -> PathContext {
        PathContext::new(Platform::Linux, "/home/dev", "/work/app")
    }

    fn windows() -> PathContext {
        PathContext::new(Platform::Windows, "C:/Users/dev", "C:/work/app")
            .with_app_data("C:/Users/dev/AppData/Roaming")
            .with_user_profile("C:/Users/dev")
            .with_local_app_data("C:/Users/dev/AppData/Local")
    }

    fn resolve(client: ClientId, scope: ConfigScope, ctx: &PathContext) -> Result<PathBuf> {
        let registry = ClientRegistry::with_default_clients();
        config_path(registry.require(client)?, scope, ctx)
    }

    fn global(client: ClientId, ctx: &PathContext) -> PathBuf {
        resolve(client, ConfigScope::Global, ctx).expect("global path")
    }

    fn local(client: ClientId, ctx: &PathContext) -> PathBuf {
        resolve(client, ConfigScope::Local, ctx).expect("local path")
    }

    #[test]
    fn linux_global_paths() {
        let ctx = linux();
        assert_eq!(
            global(ClientId::Cline, &ctx),
            PathBuf::from("/home/dev/.config/Code/User/globalStorage/saoudrizwan.claude-dev/settings/cline_mcp_settings.json")
        );
        assert_eq!(global(ClientId::Codex, &ctx), PathBuf::from("/home/dev/.codex/config.toml"));
        assert_eq!(global(ClientId::Claude, &ctx), PathBuf::from("/home/dev/.claude.json"));
        assert_eq!(
            global(ClientId::Goose, &ctx),
            PathBuf::from("/home/dev/.config/goose/config.yaml")
        );
        assert_eq!(global(ClientId::Cursor, &ctx), PathBuf::from("/home/dev/.cursor/mcp.json"));
        assert_eq!(
            global(ClientId::Windsurf, &ctx),
            PathBuf::from("/home/dev/.codeium/windsurf/mcp_config.json")
        );
        assert_eq!(
            global(ClientId::OpenCode, &ctx),
            PathBuf::from("/home/dev/.config/opencode/opencode.json")
        );
        assert_eq!(
            global(ClientId::Antigravity, &ctx),
            PathBuf::from("/home/dev/.gemini/antigravity/mcp_config.json")
        );
        assert_eq!(
            global(ClientId::Crush, &ctx),
            PathBuf::from("/home/dev/.config/crush/crush.json")
        );
    }

    #[test]
    fn macos_claude_uses_desktop_config() {
        let ctx = PathContext::new(Platform::MacOs, "/Users/dev", "/work/app");
        assert_eq!(
            global(ClientId::Claude, &ctx),
            PathBuf::from("/Users/dev/Library/Application Support/Claude/claude_desktop_config.json")
        );
        // Other clients follow the Unix layout.
        assert_eq!(
            global(ClientId::Goose, &ctx),
            PathBuf::from("/Users/dev/.config/goose/config.yaml")
        );
    }

    #[test]
    fn windows_global_paths_use_profile_dirs() {
        let ctx = windows();
        assert_eq!(
            global(ClientId::Claude, &ctx),
            PathBuf::from("C:/Users/dev/AppData/Roaming/Claude/claude_desktop_config.json")
        );
        assert_eq!(
            global(ClientId::Goose, &ctx),
            PathBuf::from("C:/Users/dev/AppData/Roaming/Block/goose/config/config.yaml")
        );
        assert_eq!(
            global(ClientId::Codex, &ctx),
            PathBuf::from("C:/Users/dev/.codex/config.toml")
        );
        assert_eq!(
            global(ClientId::Crush, &ctx),
            PathBuf::from("C:/Users/dev/AppData/Local/crush/crush.json")
        );
        assert!(global(ClientId::Cline, &ctx).starts_with("C:/Users/dev/AppData/Roaming/Code"));
    }

    #[test]
    fn windows_dirs_fall_back_to_home() {
        let ctx = PathContext::new(Platform::Windows, "C:/Users/dev", "C:/work");
        assert_eq!(
            global(ClientId::OpenCode, &ctx),
            PathBuf::from("C:/Users/dev/opencode/opencode.json")
        );
    }

    #[test]
    fn local_paths_are_under_project_root() {
        let ctx = linux();
        assert_eq!(local(ClientId::Codex, &ctx), PathBuf::from("/work/app/.codex/config.toml"));
        assert_eq!(local(ClientId::Claude, &ctx), PathBuf::from("/work/app/.mcp.json"));
        assert_eq!(local(ClientId::Cursor, &ctx), PathBuf::from("/work/app/.cursor/mcp.json"));
        assert_eq!(local(ClientId::OpenCode, &ctx), PathBuf::from("/work/app/opencode.json"));
        assert_eq!(local(ClientId::Copilot, &ctx), PathBuf::from("/work/app/.vscode/mcp.json"));
        assert_eq!(local(ClientId::Crush, &ctx), PathBuf::from("/work/app/crush.json"));
    }

    #[test]
    fn unsupported_scope_is_rejected() {
        let ctx = linux();
        let err = resolve(ClientId::Goose, ConfigScope::Local, &ctx).expect_err("must fail");
        assert_eq!(
            err.to_string(),
            "Goose supports global configuration only. Use --global."
        );

        let err = resolve(ClientId::Copilot, ConfigScope::Global, &ctx).expect_err("must fail");
        assert_eq!(
            err.to_string(),
            "GitHub Copilot supports local configuration only. Use --local."
        );
    }
}
