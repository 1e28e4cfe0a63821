//! MCP server command implementation.
//!
//! Runs one [`Operation`] against one client: resolve the document path,
//! read it, hand it to the client adapter, and write it back for mutating
//! actions.

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::client::claude::NO_PROJECTS;
use crate::client::{ClientAdapter, ClientId, ProjectSelector, StoreListing, StoreTarget};
use crate::config::{DocumentStore, RawDocument, WriteOutcome};
use crate::context::AppContext;
use crate::error::{McpConfError, Result};
use crate::mcp::normalize::normalize;
use crate::mcp::spec::NormalizedEntry;
use crate::operation::{Action, Operation};
use crate::types::ConfigScope;

/// Label for an all-projects `where` that matched nothing.
pub const ALL_PROJECTS: &str = "all-projects";

/// Presence of a server in one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub project: Option<String>,
    pub found: bool,
}

/// One entry returned by `show`, raw and normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ShownEntry {
    pub project: Option<String>,
    pub raw: Value,
    pub normalized: NormalizedEntry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// The document was written.
    Updated,
    /// Dry run: the document that would have been written.
    Rendered(String),
    Listed(Vec<StoreListing>),
    Located(Vec<Location>),
    Shown(Vec<ShownEntry>),
}

/// Report from running one operation
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReport {
    pub client: ClientId,
    /// Document the operation read (and possibly wrote).
    pub path: PathBuf,
    pub outcome: ReportOutcome,
}

/// MCP server command orchestrator
#[derive(Debug)]
pub struct McpCommand<'a> {
    ctx: &'a AppContext,
}

impl<'a> McpCommand<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Run one operation. The operation is resolved against the client first;
    /// nothing is written when any step fails.
    pub fn execute(&self, op: &Operation) -> Result<CommandReport> {
        let adapter = self.ctx.registry().require(op.client)?;
        let caps = adapter.capabilities();
        let op = op.resolve(&caps)?;
        let scope = op.scope.unwrap_or(caps.default_scope);
        let store = self.ctx.document_store(op.dry_run);

        let mut doc_scope = scope;
        let mut declared_in_project_file = false;
        if op.client == ClientId::Claude && op.action.is_toggle() && scope == ConfigScope::Local {
            self.require_in_project_file(adapter, &store, &op)?;
            doc_scope = ConfigScope::Global;
            declared_in_project_file = true;
        }

        let path = self.ctx.config_path(op.client, doc_scope)?;
        let mut doc = store.read(&path, caps.format)?;
        let target = StoreTarget::new(doc_scope, self.project_selector(&op))
            .with_declared_in_project_file(declared_in_project_file);
        debug!(client = op.client.as_str(), action = %op.action, path = %path.display(), "Running operation");

        let in_document = |err: McpConfError| err.in_document(&path, caps.format);
        let name = op.server_name();
        let outcome = match op.action {
            Action::Add => {
                adapter
                    .add(&mut doc, &target, &op.entry_spec())
                    .map_err(in_document)?;
                write(&store, &path, caps.format, &doc)?
            }
            Action::Update => {
                adapter
                    .update(&mut doc, &target, &op.entry_spec())
                    .map_err(in_document)?;
                write(&store, &path, caps.format, &doc)?
            }
            Action::Remove => {
                adapter.remove(&mut doc, &target, name).map_err(in_document)?;
                write(&store, &path, caps.format, &doc)?
            }
            Action::Enable | Action::Disable => {
                let disabled = op.action == Action::Disable;
                adapter
                    .toggle(&mut doc, &target, name, disabled)
                    .map_err(in_document)?;
                write(&store, &path, caps.format, &doc)?
            }
            Action::List => ReportOutcome::Listed(adapter.list(&doc, &target).map_err(in_document)?),
            Action::Where => {
                let listings = adapter.list(&doc, &target).map_err(in_document)?;
                ReportOutcome::Located(locate(&listings, &target.project, name))
            }
            Action::Show => {
                let entries = adapter.show(&doc, &target, name).map_err(in_document)?;
                ReportOutcome::Shown(
                    entries
                        .into_iter()
                        .map(|found| ShownEntry {
                            normalized: normalize(adapter, name, &found.entry),
                            project: found.project,
                            raw: found.entry,
                        })
                        .collect(),
                )
            }
        };

        Ok(CommandReport {
            client: op.client,
            path,
            outcome,
        })
    }

    fn project_selector(&self, op: &Operation) -> ProjectSelector {
        if op.all_projects {
            return ProjectSelector::All;
        }
        ProjectSelector::Path(
            op.project_path
                .clone()
                .unwrap_or_else(|| self.ctx.default_project_key()),
        )
    }

    /// Claude enable/disable with `--local` applies to entries declared in the
    /// project's `.mcp.json`; the entry has to exist there.
    fn require_in_project_file(
        &self,
        adapter: &dyn ClientAdapter,
        store: &DocumentStore,
        op: &Operation,
    ) -> Result<()> {
        let format = adapter.capabilities().format;
        let local_path = self.ctx.config_path(op.client, ConfigScope::Local)?;
        let local_doc = store.read(&local_path, format)?;
        let target = StoreTarget::local(self.ctx.default_project_key());
        adapter
            .show(&local_doc, &target, op.server_name())
            .map(|_| ())
            .map_err(|err| err.in_document(&local_path, format))
    }
}

fn write(
    store: &DocumentStore,
    path: &std::path::Path,
    format: crate::config::ConfigFormat,
    doc: &RawDocument,
) -> Result<ReportOutcome> {
    Ok(match store.write(path, format, doc)? {
        WriteOutcome::Written => ReportOutcome::Updated,
        WriteOutcome::Rendered(content) => ReportOutcome::Rendered(content),
    })
}

fn locate(listings: &[StoreListing], selector: &ProjectSelector, name: &str) -> Vec<Location> {
    if *selector != ProjectSelector::All {
        return listings
            .iter()
            .map(|listing| Location {
                project: listing.project.clone(),
                found: listing.names.contains(name),
            })
            .collect();
    }

    if listings
        .iter()
        .all(|listing| listing.project.as_deref() == Some(NO_PROJECTS))
    {
        return vec![Location {
            project: Some(NO_PROJECTS.to_string()),
            found: false,
        }];
    }
    let found: Vec<Location> = listings
        .iter()
        .filter(|listing| listing.names.contains(name))
        .map(|listing| Location {
            project: listing.project.clone(),
            found: true,
        })
        .collect();
    if found.is_empty() {
        vec![Location {
            project: Some(ALL_PROJECTS.to_string()),
            found: false,
        }]
    } else {
        found
    }
}
