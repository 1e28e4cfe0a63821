//! mcp-conf - MCP server configuration for AI coding clients
//!
//! Usage:
//!   mcp-conf add --client cline --name abap --mcp TRIAL
//!   mcp-conf ls --client claude --all-projects
//!   mcp-conf disable --client codex --name abap
//!   mcp-conf show --client cursor --name abap --normalized

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcp_conf_core::client::ClientId;
use mcp_conf_core::commands::{CommandReport, McpCommand, ReportOutcome};
use mcp_conf_core::context::AppContext;
use mcp_conf_core::mcp::args::looks_like_path;
use mcp_conf_core::mcp::{McpAuth, McpTransport};
use mcp_conf_core::operation::{Action, Operation};
use mcp_conf_core::types::ConfigScope;

const DEFAULT_COMMAND: &str = "mcp-abap-adt";

#[derive(Parser)]
#[command(name = "mcp-conf")]
#[command(about = "Configure MCP servers across AI coding clients", long_about = None)]
#[command(after_help = "Scope defaults to --global (Copilot uses --local only).\n\
For Claude, --local maps to the project file ./.mcp.json.\n\
For Codex, --local writes to ./.codex/config.toml.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an MCP server entry
    Add(OperationArgs),
    /// Replace an existing MCP server entry
    Update(OperationArgs),
    /// Remove an MCP server entry
    #[command(alias = "remove")]
    Rm(OperationArgs),
    /// List MCP server entries
    #[command(alias = "list")]
    Ls(OperationArgs),
    /// Enable an existing entry
    Enable(OperationArgs),
    /// Disable an existing entry
    Disable(OperationArgs),
    /// Show where a server name is defined
    Where(OperationArgs),
    /// Print a stored entry as JSON
    Show(OperationArgs),
}

impl Commands {
    fn split(self) -> (Action, OperationArgs) {
        match self {
            Self::Add(args) => (Action::Add, args),
            Self::Update(args) => (Action::Update, args),
            Self::Rm(args) => (Action::Remove, args),
            Self::Ls(args) => (Action::List, args),
            Self::Enable(args) => (Action::Enable, args),
            Self::Disable(args) => (Action::Disable, args),
            Self::Where(args) => (Action::Where, args),
            Self::Show(args) => (Action::Show, args),
        }
    }
}

#[derive(Args, Clone, Debug)]
struct OperationArgs {
    /// Target client (repeatable): cline | codex | claude | goose | cursor |
    /// windsurf | opencode | kilo | copilot | antigravity | crush
    #[arg(long = "client", value_name = "NAME", required = true, value_parser = parse_client)]
    clients: Vec<ClientId>,

    /// MCP server name key
    #[arg(long)]
    name: Option<String>,

    /// Use the global user config (default)
    #[arg(long, conflicts_with = "local")]
    global: bool,

    /// Use the project config (where supported)
    #[arg(long)]
    local: bool,

    /// Transport: stdio | sse | http
    #[arg(long, default_value = "stdio", value_parser = parse_transport)]
    transport: McpTransport,

    /// Command to run for stdio servers
    #[arg(long, default_value = DEFAULT_COMMAND)]
    command: String,

    /// Server URL, required for sse/http
    #[arg(long)]
    url: Option<String>,

    /// Request header (repeatable)
    #[arg(long = "header", value_name = "KEY=VALUE", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Entry timeout in seconds
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Service-key destination name (stdio only)
    #[arg(long, value_name = "DEST", group = "auth")]
    mcp: Option<String>,

    /// Named env profile, a .env path, or the session environment when bare (stdio only)
    #[arg(long, value_name = "NAME|PATH", num_args = 0..=1, group = "auth")]
    env: Option<Option<String>>,

    /// Explicit .env file (stdio only)
    #[arg(long, value_name = "PATH", group = "auth")]
    env_path: Option<String>,

    /// Use the variables of the launching session (stdio only)
    #[arg(long, group = "auth")]
    session_env: bool,

    /// Create the entry enabled
    #[arg(long, conflicts_with = "disable")]
    enable: bool,

    /// Create the entry disabled
    #[arg(long)]
    disable: bool,

    /// Overwrite an existing entry
    #[arg(long, short)]
    force: bool,

    /// Print the resulting file instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Claude global: apply to every project
    #[arg(long, conflicts_with = "project")]
    all_projects: bool,

    /// Claude global: target a specific project path
    #[arg(long, value_name = "PATH")]
    project: Option<String>,

    /// show: print the client-independent form
    #[arg(long)]
    normalized: bool,
}

impl OperationArgs {
    fn scope(&self) -> Option<ConfigScope> {
        match (self.global, self.local) {
            (true, _) => Some(ConfigScope::Global),
            (_, true) => Some(ConfigScope::Local),
            _ => None,
        }
    }

    fn auth(&self) -> Option<McpAuth> {
        if let Some(dest) = &self.mcp {
            return Some(McpAuth::Destination(dest.clone()));
        }
        if let Some(path) = &self.env_path {
            return Some(McpAuth::EnvPath(path.clone()));
        }
        if self.session_env {
            return Some(McpAuth::SessionEnv);
        }
        match &self.env {
            Some(Some(value)) if looks_like_path(value) => Some(McpAuth::EnvPath(value.clone())),
            Some(Some(value)) => Some(McpAuth::EnvName(value.clone())),
            Some(None) => Some(McpAuth::SessionEnv),
            None => None,
        }
    }

    fn enabled(&self) -> Option<bool> {
        match (self.enable, self.disable) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    fn operation(&self, action: Action, client: ClientId) -> Operation {
        let mut op = Operation::new(action, client)
            .with_transport(self.transport)
            .with_command(&self.command)
            .with_timeout(self.timeout)
            .with_force(self.force)
            .with_all_projects(self.all_projects)
            .with_dry_run(self.dry_run);
        if let Some(scope) = self.scope() {
            op = op.with_scope(scope);
        }
        if let Some(name) = &self.name {
            op = op.with_name(name);
        }
        if let Some(url) = &self.url {
            op = op.with_url(url);
        }
        for (key, value) in &self.headers {
            op = op.with_header(key, value);
        }
        if let Some(auth) = self.auth() {
            op = op.with_auth(auth);
        }
        if let Some(enabled) = self.enabled() {
            op = op.with_enabled(enabled);
        }
        if let Some(project) = &self.project {
            op = op.with_project_path(project);
        }
        op
    }
}

fn parse_client(value: &str) -> std::result::Result<ClientId, String> {
    value.parse::<ClientId>().map_err(|err| err.to_string())
}

fn parse_transport(value: &str) -> std::result::Result<McpTransport, String> {
    value.parse::<McpTransport>().map_err(|err| err.to_string())
}

fn parse_header(value: &str) -> std::result::Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, val)) if !key.trim().is_empty() => Ok((key.trim().to_string(), val.to_string())),
        _ => Err("Header must be in key=value format.".to_string()),
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so list/show output stays parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_conf=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    run_cli(cli.command)
}

fn run_cli(command: Commands) -> Result<()> {
    let (action, args) = command.split();
    let ctx = AppContext::from_env().context("Failed to read environment")?;
    let cmd = McpCommand::new(&ctx);

    // Clients run in order; a failure stops the run and keeps earlier writes.
    for client in &args.clients {
        let op = args.operation(action, *client);
        tracing::debug!(client = client.as_str(), %action, "Dispatching");
        let report = cmd
            .execute(&op)
            .with_context(|| format!("{action} failed for {client}"))?;
        print!("{}", render_report(&report, op.server_name(), args.normalized)?);
    }
    Ok(())
}

fn header(report: &CommandReport, project: Option<&str>) -> String {
    match project {
        Some(project) => format!("# {} ({project})\n", report.path.display()),
        None => format!("# {}\n", report.path.display()),
    }
}

fn render_report(report: &CommandReport, name: &str, normalized: bool) -> Result<String> {
    let mut out = String::new();
    match &report.outcome {
        ReportOutcome::Updated => {
            writeln!(out, "Updated {}", report.path.display())?;
        }
        ReportOutcome::Rendered(content) => {
            write!(out, "\n# {}\n{content}\n", report.path.display())?;
        }
        ReportOutcome::Listed(listings) => {
            for listing in listings {
                out.push_str(&header(report, listing.project.as_deref()));
                if listing.names.is_empty() {
                    out.push_str("- (none)\n");
                }
                for server in &listing.names {
                    writeln!(out, "- {server}")?;
                }
            }
        }
        ReportOutcome::Located(locations) => {
            for location in locations {
                out.push_str(&header(report, location.project.as_deref()));
                let state = if location.found { "found" } else { "not found" };
                writeln!(out, "- {name}: {state}")?;
            }
        }
        ReportOutcome::Shown(entries) => {
            for entry in entries {
                out.push_str(&header(report, entry.project.as_deref()));
                let json = if normalized {
                    serde_json::to_string_pretty(&entry.normalized)
                } else {
                    serde_json::to_string_pretty(&entry.raw)
                }
                .context("Failed to serialize entry")?;
                writeln!(out, "{json}")?;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    use mcp_conf_core::client::StoreListing;
    use mcp_conf_core::commands::Location;

    fn parse(args: &[&str]) -> (Action, OperationArgs) {
        let cli = Cli::try_parse_from(args).expect("CLI parsing should succeed");
        cli.command.split()
    }

    fn report(outcome: ReportOutcome) -> CommandReport {
        CommandReport {
            client: ClientId::Cline,
            path: PathBuf::from("/home/dev/mcp.json"),
            outcome,
        }
    }

    #[test]
    fn add_with_destination_builds_stdio_operation() {
        let (action, args) = parse(&[
            "mcp-conf", "add", "--client", "cline", "--client", "kilo", "--name", "abap", "--mcp",
            "TRIAL",
        ]);
        assert_eq!(action, Action::Add);
        assert_eq!(args.clients, vec![ClientId::Cline, ClientId::OpenCode]);

        let op = args.operation(action, ClientId::Cline);
        assert_eq!(op.command, DEFAULT_COMMAND);
        assert_eq!(op.timeout, 60);
        assert_eq!(op.auth, Some(McpAuth::Destination("TRIAL".to_string())));
        assert_eq!(op.scope, None);
    }

    #[test]
    fn env_flag_forms() {
        let (_, args) = parse(&["mcp-conf", "add", "--client", "cline", "--name", "a", "--env"]);
        assert_eq!(args.auth(), Some(McpAuth::SessionEnv));

        let (_, args) = parse(&["mcp-conf", "add", "--client", "cline", "--name", "a", "--env", "dev"]);
        assert_eq!(args.auth(), Some(McpAuth::EnvName("dev".to_string())));

        let (_, args) = parse(&[
            "mcp-conf", "add", "--client", "cline", "--name", "a", "--env", "./sap.env",
        ]);
        assert_eq!(args.auth(), Some(McpAuth::EnvPath("./sap.env".to_string())));

        let (_, args) = parse(&[
            "mcp-conf", "add", "--client", "cline", "--name", "a", "--env", "--global",
        ]);
        assert_eq!(args.auth(), Some(McpAuth::SessionEnv));
        assert_eq!(args.scope(), Some(ConfigScope::Global));
    }

    #[test]
    fn conflicting_flags_are_rejected() {
        for argv in [
            &["mcp-conf", "add", "--client", "cline", "--global", "--local"][..],
            &["mcp-conf", "add", "--client", "cline", "--mcp", "a", "--session-env"][..],
            &["mcp-conf", "add", "--client", "cline", "--enable", "--disable"][..],
            &["mcp-conf", "ls", "--client", "claude", "--all-projects", "--project", "/p"][..],
            &["mcp-conf", "add", "--client", "vim", "--name", "a"][..],
            &["mcp-conf", "add", "--client", "cline", "--header", "novalue"][..],
            &["mcp-conf", "add", "--client", "cline", "--timeout", "0"][..],
            &["mcp-conf", "ls"][..],
        ] {
            assert!(Cli::try_parse_from(argv).is_err(), "{argv:?} should fail");
        }
    }

    #[test]
    fn http_with_headers_parses() {
        let (action, args) = parse(&[
            "mcp-conf",
            "update",
            "--client",
            "cursor",
            "--name",
            "abap",
            "--transport",
            "http",
            "--url",
            "http://localhost:3000/mcp",
            "--header",
            "x-sap-client=100",
            "--header",
            "token=a=b",
            "--disable",
        ]);
        let op = args.operation(action, ClientId::Cursor);
        assert_eq!(op.action, Action::Update);
        assert_eq!(op.transport, McpTransport::Http);
        assert_eq!(op.headers.get("x-sap-client").map(String::as_str), Some("100"));
        assert_eq!(op.headers.get("token").map(String::as_str), Some("a=b"));
        assert_eq!(op.enabled, Some(false));
    }

    #[test]
    fn transport_accepts_client_spellings() {
        let (_, args) = parse(&[
            "mcp-conf", "add", "--client", "cline", "--name", "a", "--transport", "streamableHttp",
            "--url", "http://h/mcp",
        ]);
        assert_eq!(args.transport, McpTransport::Http);

        let err = Cli::try_parse_from([
            "mcp-conf", "add", "--client", "cline", "--transport", "websocket",
        ])
        .err()
        .expect("unknown transport rejected");
        assert!(err.to_string().contains("Unsupported transport: websocket"));
    }

    #[test]
    fn rm_and_ls_aliases() {
        let (action, _) = parse(&["mcp-conf", "remove", "--client", "goose", "--name", "a"]);
        assert_eq!(action, Action::Remove);
        let (action, args) = parse(&["mcp-conf", "list", "--client", "claude", "--all-projects"]);
        assert_eq!(action, Action::List);
        assert!(args.all_projects);
    }

    #[test]
    fn render_list_with_project_headers() {
        let listings = vec![
            StoreListing {
                project: Some("/a".to_string()),
                names: BTreeSet::new(),
            },
            StoreListing {
                project: Some("/b".to_string()),
                names: BTreeSet::from(["x".to_string(), "abap".to_string()]),
            },
        ];
        let out = render_report(&report(ReportOutcome::Listed(listings)), "", false).expect("render");
        assert_eq!(
            out,
            "# /home/dev/mcp.json (/a)\n- (none)\n# /home/dev/mcp.json (/b)\n- abap\n- x\n"
        );
    }

    #[test]
    fn render_where_and_updates() {
        let located = ReportOutcome::Located(vec![Location {
            project: None,
            found: false,
        }]);
        let out = render_report(&report(located), "abap", false).expect("render");
        assert_eq!(out, "# /home/dev/mcp.json\n- abap: not found\n");

        let out = render_report(&report(ReportOutcome::Updated), "abap", false).expect("render");
        assert_eq!(out, "Updated /home/dev/mcp.json\n");

        let out = render_report(&report(ReportOutcome::Rendered("{}".to_string())), "abap", false)
            .expect("render");
        assert_eq!(out, "\n# /home/dev/mcp.json\n{}\n");
    }
}
