//! Canonical, client-independent MCP server types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::client::ClientId;
use crate::error::McpConfError;

/// Default entry timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McpTransport {
    Stdio,
    Sse,
    Http,
}

impl McpTransport {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Sse => "sse",
            Self::Http => "http",
        }
    }

    pub fn is_stdio(self) -> bool {
        self == Self::Stdio
    }

    /// Parse a transport tag as written by any supported client.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "stdio" | "local" => Some(Self::Stdio),
            "sse" => Some(Self::Sse),
            "http" | "streamableHttp" | "streamable_http" | "streamable-http" | "remote" => {
                Some(Self::Http)
            }
            _ => None,
        }
    }
}

impl fmt::Display for McpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for McpTransport {
    type Err = McpConfError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_tag(value.trim()).ok_or_else(|| {
            McpConfError::validation(format!("Unsupported transport: {value} (stdio|sse|http)"))
        })
    }
}

/// Where a stdio server takes its credentials from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum McpAuth {
    /// Service-key destination name (`--mcp=<dest>`).
    Destination(String),
    /// Named environment profile (`--env=<name>`).
    EnvName(String),
    /// Explicit `.env` file (`--env-path=<path>`).
    EnvPath(String),
    /// Variables of the launching session (`--session-env`).
    SessionEnv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthKind {
    #[serde(rename = "mcp")]
    Mcp,
    #[serde(rename = "env")]
    Env,
    #[serde(rename = "env-path")]
    EnvPath,
    #[serde(rename = "session-env")]
    SessionEnv,
    #[serde(rename = "unknown")]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAuth {
    #[serde(rename = "type")]
    pub kind: AuthKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl NormalizedAuth {
    pub fn unknown() -> Self {
        Self {
            kind: AuthKind::Unknown,
            value: None,
        }
    }
}

impl From<&McpAuth> for NormalizedAuth {
    fn from(auth: &McpAuth) -> Self {
        match auth {
            McpAuth::Destination(dest) => Self {
                kind: AuthKind::Mcp,
                value: Some(dest.clone()),
            },
            McpAuth::EnvName(name) => Self {
                kind: AuthKind::Env,
                value: Some(name.clone()),
            },
            McpAuth::EnvPath(path) => Self {
                kind: AuthKind::EnvPath,
                value: Some(path.clone()),
            },
            McpAuth::SessionEnv => Self {
                kind: AuthKind::SessionEnv,
                value: None,
            },
        }
    }
}

/// Client-independent view of a stored entry, as printed by `show --normalized`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEntry {
    pub client: ClientId,
    pub name: String,
    pub transport: McpTransport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<NormalizedAuth>,
}

/// Everything an adapter needs to build one stored entry.
///
/// Derived from an [`Operation`](crate::operation::Operation) once it has
/// been resolved, so the transport/auth/url invariants already hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySpec {
    pub name: String,
    pub transport: McpTransport,
    pub command: String,
    pub timeout: u64,
    pub url: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub auth: Option<McpAuth>,
    /// `None` leaves the client's default policy in charge.
    pub enabled: Option<bool>,
    pub force: bool,
}

impl EntrySpec {
    pub fn stdio(name: impl Into<String>, command: impl Into<String>, auth: McpAuth) -> Self {
        Self {
            name: name.into(),
            transport: McpTransport::Stdio,
            command: command.into(),
            timeout: DEFAULT_TIMEOUT,
            url: None,
            headers: BTreeMap::new(),
            auth: Some(auth),
            enabled: None,
            force: false,
        }
    }

    pub fn remote(name: impl Into<String>, transport: McpTransport, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transport,
            command: String::new(),
            timeout: DEFAULT_TIMEOUT,
            url: Some(url.into()),
            headers: BTreeMap::new(),
            auth: None,
            enabled: None,
            force: false,
        }
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
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

    /// Whether the new entry should be stored disabled, given a client default.
    pub fn disabled(&self, default_disabled: bool) -> bool {
        match self.enabled {
            Some(enabled) => !enabled,
            None => default_disabled,
        }
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }
}
