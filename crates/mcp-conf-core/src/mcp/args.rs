//! Launch-argument grammar for stdio servers.
//!
//! Clients without a dedicated auth field store the auth selection in the
//! entry's argument list:
//!
//! ```text
//! --transport=<stdio|sse|http>  one of:  --mcp=<dest> | --env=<name> | --session-env | --env-path=<path>
//! ```
//!
//! [`encode`] is the only writer of this grammar and [`decode`] the only
//! reader. Decoding never fails: anything it cannot attribute to an auth kind
//! is reported as unknown.

use super::spec::{McpAuth, McpTransport, NormalizedAuth};

const TRANSPORT: &str = "--transport";
const MCP: &str = "--mcp";
const ENV: &str = "--env";
const ENV_PATH: &str = "--env-path";
const SESSION_ENV: &str = "--session-env";

/// Build the argument list for a stdio entry.
pub fn encode(transport: McpTransport, auth: &McpAuth) -> Vec<String> {
    let auth_flag = match auth {
        McpAuth::Destination(dest) => format!("{MCP}={}", dest.to_lowercase()),
        McpAuth::EnvName(name) => format!("{ENV}={name}"),
        McpAuth::SessionEnv => SESSION_ENV.to_string(),
        McpAuth::EnvPath(path) => format!("{ENV_PATH}={path}"),
    };
    vec![format!("{TRANSPORT}={}", transport.as_str()), auth_flag]
}

/// What [`decode`] recovered from an argument list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedArgs {
    pub transport: Option<McpTransport>,
    pub auth: Option<McpAuth>,
}

impl DecodedArgs {
    pub fn normalized_auth(&self) -> NormalizedAuth {
        self.auth
            .as_ref()
            .map(NormalizedAuth::from)
            .unwrap_or_else(NormalizedAuth::unknown)
    }
}

/// Recover transport and auth from an arbitrary argument list.
///
/// Accepts `--flag=value`, `--flag value` (as two tokens or one token with a
/// space), bare `--env` for session variables, and the legacy `--env <value>`
/// whose value is a path when it looks like one and a profile name otherwise.
/// When several auth flags are present the last one wins.
pub fn decode<S: AsRef<str>>(args: &[S]) -> DecodedArgs {
    let tokens: Vec<&str> = args.iter().map(|a| a.as_ref().trim()).collect();
    let mut decoded = DecodedArgs::default();
    let mut idx = 0;

    while idx < tokens.len() {
        let token = tokens[idx];
        idx += 1;
        if !token.starts_with("--") {
            continue;
        }
        let (flag, inline) = split_flag(token);

        // A following token is a value only when it is not itself a flag.
        let mut take_next = || match tokens.get(idx).copied() {
            Some(next) if !next.starts_with('-') => {
                idx += 1;
                Some(next)
            }
            _ => None,
        };

        match flag {
            TRANSPORT => {
                let value = inline.map(|(v, _)| v).or_else(take_next);
                if let Some(transport) = value.and_then(McpTransport::from_tag) {
                    decoded.transport = Some(transport);
                }
            }
            MCP => {
                let value = inline.map(|(v, _)| v).or_else(take_next);
                if let Some(dest) = value.filter(|v| !v.is_empty()) {
                    decoded.auth = Some(McpAuth::Destination(dest.to_string()));
                }
            }
            ENV_PATH => {
                let value = inline.map(|(v, _)| v).or_else(take_next);
                if let Some(path) = value.filter(|v| !v.is_empty()) {
                    decoded.auth = Some(McpAuth::EnvPath(path.to_string()));
                }
            }
            SESSION_ENV => decoded.auth = Some(McpAuth::SessionEnv),
            ENV => {
                decoded.auth = Some(match inline {
                    Some((name, Separator::Equals)) if !name.is_empty() => {
                        McpAuth::EnvName(name.to_string())
                    }
                    Some((value, Separator::Space)) => classify_legacy_env(value),
                    _ => match take_next() {
                        Some(value) => classify_legacy_env(value),
                        None => McpAuth::SessionEnv,
                    },
                });
            }
            _ => {}
        }
    }

    decoded
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    Equals,
    Space,
}

/// Split `--flag=value` or `--flag value` at whichever separator comes first.
fn split_flag(token: &str) -> (&str, Option<(&str, Separator)>) {
    let eq = token.find('=');
    let space = token.find(char::is_whitespace);
    match (eq, space) {
        (Some(e), Some(s)) if s < e => {
            (&token[..s], Some((token[s..].trim(), Separator::Space)))
        }
        (Some(e), _) => (&token[..e], Some((&token[e + 1..], Separator::Equals))),
        (None, Some(s)) => (&token[..s], Some((token[s..].trim(), Separator::Space))),
        (None, None) => (token, None),
    }
}

fn classify_legacy_env(value: &str) -> McpAuth {
    if looks_like_path(value) {
        McpAuth::EnvPath(value.to_string())
    } else {
        McpAuth::EnvName(value.to_string())
    }
}

/// Path-like values contain a separator, start with `.` or `~`, or end in `.env`.
pub fn looks_like_path(value: &str) -> bool {
    value.contains('/')
        || value.contains('\\')
        || value.starts_with('.')
        || value.starts_with('~')
        || value.ends_with(".env")
}
