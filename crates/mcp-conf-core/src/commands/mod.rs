//! High-level commands for mcp-conf operations.
//!
//! This module provides the public API frontends call: build an
//! [`Operation`](crate::operation::Operation), run it through
//! [`McpCommand`], and render the returned [`CommandReport`].

pub mod mcp;

pub use mcp::{ALL_PROJECTS, CommandReport, Location, McpCommand, ReportOutcome, ShownEntry};
