//! MCP server entries in canonical form.
//!
//! - [`spec`]: canonical request and normalized view types
//! - [`args`]: the stdio launch-argument grammar
//! - [`normalize`]: raw client entries to [`NormalizedEntry`]

pub mod args;
pub mod normalize;
pub mod spec;

pub use normalize::normalize;
pub use spec::{
    AuthKind, DEFAULT_TIMEOUT, EntrySpec, McpAuth, McpTransport, NormalizedAuth, NormalizedEntry,
};
