use serde_json::{Value, json};

use mcp_conf_core::McpConfError;
use mcp_conf_core::client::{
    ClientAdapter, ClientId, ClientRegistry, ProjectSelector, StoreTarget, ToggleStyle,
};
use mcp_conf_core::config::RawDocument;
use mcp_conf_core::mcp::{AuthKind, EntrySpec, McpAuth, McpTransport, NormalizedAuth, normalize};
use mcp_conf_core::types::ConfigScope;

const PROJECT: &str = "/work/app";

fn target_for(adapter: &dyn ClientAdapter) -> StoreTarget {
    let scope = adapter.capabilities().default_scope;
    StoreTarget::new(scope, ProjectSelector::Path(PROJECT.to_string()))
}

fn adapters(registry: &ClientRegistry) -> impl Iterator<Item = &dyn ClientAdapter> {
    registry.all().iter().map(|adapter| &**adapter)
}

fn shown(adapter: &dyn ClientAdapter, doc: &RawDocument, name: &str) -> Value {
    let found = adapter
        .show(doc, &target_for(adapter), name)
        .expect("entry should be shown");
    assert_eq!(found.len(), 1);
    found[0].entry.clone()
}

fn auth_kinds() -> [(McpAuth, NormalizedAuth); 4] {
    [
        (
            McpAuth::Destination("TRIAL".to_string()),
            NormalizedAuth {
                kind: AuthKind::Mcp,
                value: Some("trial".to_string()),
            },
        ),
        (
            McpAuth::EnvName("dev".to_string()),
            NormalizedAuth {
                kind: AuthKind::Env,
                value: Some("dev".to_string()),
            },
        ),
        (
            McpAuth::EnvPath("/home/dev/sap.env".to_string()),
            NormalizedAuth {
                kind: AuthKind::EnvPath,
                value: Some("/home/dev/sap.env".to_string()),
            },
        ),
        (
            McpAuth::SessionEnv,
            NormalizedAuth {
                kind: AuthKind::SessionEnv,
                value: None,
            },
        ),
    ]
}

#[test]
fn stdio_entries_normalize_back_for_every_client_and_auth() {
    let registry = ClientRegistry::with_default_clients();
    for adapter in adapters(&registry) {
        for (auth, expected) in auth_kinds() {
            let mut doc = RawDocument::new();
            let spec = EntrySpec::stdio("abap", "mcp-abap-adt", auth.clone()).with_timeout(90);
            adapter
                .add(&mut doc, &target_for(adapter), &spec)
                .expect("add stdio entry");

            let raw = shown(adapter, &doc, "abap");
            let normalized = normalize(adapter, "abap", &raw);
            let label = format!("{} {auth:?}", adapter.id());
            assert_eq!(normalized.transport, McpTransport::Stdio, "{label}");
            assert_eq!(normalized.command.as_deref(), Some("mcp-abap-adt"), "{label}");
            assert_eq!(normalized.timeout, 90, "{label}");
            assert_eq!(normalized.auth.as_ref(), Some(&expected), "{label}");
            assert!(normalized.url.is_none(), "{label}");
            assert!(normalized.headers.is_none(), "{label}");
        }
    }
}

#[test]
fn remote_entries_normalize_back_where_supported() {
    let registry = ClientRegistry::with_default_clients();
    for adapter in adapters(&registry) {
        for transport in [McpTransport::Sse, McpTransport::Http] {
            if !adapter.capabilities().supports_transport(transport) {
                continue;
            }
            let mut doc = RawDocument::new();
            let spec = EntrySpec::remote("abap", transport, "http://localhost:3000/mcp")
                .with_timeout(90)
                .with_header("x-sap-client", "100");
            adapter
                .add(&mut doc, &target_for(adapter), &spec)
                .expect("add remote entry");

            let raw = shown(adapter, &doc, "abap");
            let normalized = normalize(adapter, "abap", &raw);
            let label = format!("{} {transport}", adapter.id());
            assert_eq!(normalized.transport, transport, "{label}");
            assert_eq!(
                normalized.url.as_deref(),
                Some("http://localhost:3000/mcp"),
                "{label}"
            );
            let headers = normalized.headers.expect("headers normalized");
            assert_eq!(
                headers.get("x-sap-client").map(String::as_str),
                Some("100"),
                "{label}"
            );
            assert!(normalized.auth.is_none(), "{label}");
            assert!(normalized.command.is_none(), "{label}");

            if adapter.id() == ClientId::Copilot {
                assert!(raw.get("timeout").is_none(), "{label}");
                assert_eq!(normalized.timeout, 60, "{label}");
            } else {
                assert_eq!(normalized.timeout, 90, "{label}");
            }
        }
    }
}

#[test]
fn sse_is_rejected_only_by_codex_and_opencode() {
    let registry = ClientRegistry::with_default_clients();
    let without_sse: Vec<ClientId> = registry
        .all()
        .iter()
        .filter(|adapter| !adapter.capabilities().supports_transport(McpTransport::Sse))
        .map(|adapter| adapter.id())
        .collect();
    assert_eq!(without_sse.len(), 2);
    assert!(without_sse.contains(&ClientId::Codex));
    assert!(without_sse.contains(&ClientId::OpenCode));
}

#[test]
fn add_collision_requires_force() {
    let registry = ClientRegistry::with_default_clients();
    for adapter in adapters(&registry) {
        let target = target_for(adapter);
        let mut doc = RawDocument::new();
        let first = EntrySpec::stdio("abap", "first", McpAuth::SessionEnv);
        adapter.add(&mut doc, &target, &first).expect("first add");

        let second = EntrySpec::stdio("abap", "second", McpAuth::SessionEnv);
        let before = doc.clone();
        let err = adapter
            .add(&mut doc, &target, &second)
            .expect_err("collision must fail");
        assert!(matches!(err, McpConfError::AlreadyExists { .. }), "{}", adapter.id());
        assert_eq!(doc, before);

        adapter
            .add(&mut doc, &target, &second.with_force(true))
            .expect("forced add");
        let normalized = normalize(adapter, "abap", &shown(adapter, &doc, "abap"));
        assert_eq!(normalized.command.as_deref(), Some("second"), "{}", adapter.id());
    }
}

#[test]
fn forced_replace_leaves_no_stdio_fields_behind() {
    let registry = ClientRegistry::with_default_clients();
    for adapter in adapters(&registry) {
        let target = target_for(adapter);
        let mut doc = RawDocument::new();
        adapter
            .add(
                &mut doc,
                &target,
                &EntrySpec::stdio("abap", "mcp-abap-adt", McpAuth::SessionEnv),
            )
            .expect("add stdio entry");

        let remote = EntrySpec::remote("abap", McpTransport::Http, "http://localhost:3000/mcp")
            .with_force(true);
        adapter
            .add(&mut doc, &target, &remote)
            .expect("forced remote add");

        let raw = shown(adapter, &doc, "abap");
        for stale in ["command", "cmd", "args", "env"] {
            assert!(raw.get(stale).is_none(), "{} kept {stale}", adapter.id());
        }
        assert_eq!(
            normalize(adapter, "abap", &raw).transport,
            McpTransport::Http,
            "{}",
            adapter.id()
        );
    }
}

#[test]
fn remove_missing_is_not_found_and_leaves_doc() {
    let registry = ClientRegistry::with_default_clients();
    for adapter in adapters(&registry) {
        let target = target_for(adapter);
        let mut doc = RawDocument::new();
        adapter
            .add(&mut doc, &target, &EntrySpec::stdio("keep", "bin", McpAuth::SessionEnv))
            .expect("add entry");

        adapter.remove(&mut doc, &target, "keep").expect("remove entry");
        let listing = adapter.list(&doc, &target).expect("list entries");
        assert!(listing.iter().all(|l| l.names.is_empty()), "{}", adapter.id());

        let before = doc.clone();
        let err = adapter
            .remove(&mut doc, &target, "keep")
            .expect_err("second remove must fail");
        assert!(err.is_not_found(), "{}", adapter.id());
        assert_eq!(doc, before);
    }
}

#[test]
fn update_never_creates() {
    let registry = ClientRegistry::with_default_clients();
    for adapter in adapters(&registry) {
        let mut doc = RawDocument::new();
        let spec = EntrySpec::stdio("abap", "bin", McpAuth::SessionEnv);
        let err = adapter
            .update(&mut doc, &target_for(adapter), &spec)
            .expect_err("update of a missing entry must fail");
        assert!(err.is_not_found(), "{}", adapter.id());
    }
}

#[test]
fn unsupported_toggle_leaves_document_unchanged() {
    let registry = ClientRegistry::with_default_clients();
    for id in [ClientId::Cursor, ClientId::Copilot] {
        let adapter = registry.get(id).expect("registered");
        let target = target_for(adapter);
        let mut doc = RawDocument::new();
        adapter
            .add(&mut doc, &target, &EntrySpec::stdio("abap", "bin", McpAuth::SessionEnv))
            .expect("add entry");
        let before = doc.clone();

        let err = adapter
            .toggle(&mut doc, &target, "abap", true)
            .expect_err("toggle must be unsupported");
        assert!(matches!(err, McpConfError::UnsupportedOperation { .. }));
        assert_eq!(doc, before);
    }
}

#[test]
fn default_disabled_policy_per_client() {
    let registry = ClientRegistry::with_default_clients();
    let spec = EntrySpec::stdio("abap", "bin", McpAuth::SessionEnv);

    let cases = [
        (ClientId::Cline, "disabled", json!(true)),
        (ClientId::Windsurf, "disabled", json!(true)),
        (ClientId::Antigravity, "disabled", json!(false)),
        (ClientId::Crush, "disabled", json!(false)),
        (ClientId::Codex, "enabled", json!(false)),
        (ClientId::OpenCode, "enabled", json!(false)),
        (ClientId::Goose, "enabled", json!(false)),
    ];
    for (id, flag, expected) in cases {
        let adapter = registry.get(id).expect("registered");
        let mut doc = RawDocument::new();
        adapter
            .add(&mut doc, &target_for(adapter), &spec)
            .expect("add entry");
        assert_eq!(shown(adapter, &doc, "abap")[flag], expected, "{id}");
    }

    let cursor = registry.get(ClientId::Cursor).expect("registered");
    let mut doc = RawDocument::new();
    cursor
        .add(&mut doc, &target_for(cursor), &spec)
        .expect("add entry");
    let raw = shown(cursor, &doc, "abap");
    assert!(raw.get("disabled").is_none());
    assert!(raw.get("enabled").is_none());
}

#[test]
fn explicit_enable_overrides_default() {
    let registry = ClientRegistry::with_default_clients();
    let adapter = registry.get(ClientId::Cline).expect("registered");
    let mut doc = RawDocument::new();
    let spec = EntrySpec::stdio("abap", "bin", McpAuth::SessionEnv).with_enabled(true);
    adapter
        .add(&mut doc, &target_for(adapter), &spec)
        .expect("add entry");
    assert_eq!(shown(adapter, &doc, "abap")["disabled"], json!(false));
}

#[test]
fn toggle_flips_flag_on_every_flag_client() {
    let registry = ClientRegistry::with_default_clients();
    let mut covered = Vec::new();
    for adapter in adapters(&registry) {
        let flag = match adapter.capabilities().toggle {
            ToggleStyle::DisabledFlag => "disabled",
            ToggleStyle::EnabledFlag => "enabled",
            ToggleStyle::ProjectLists | ToggleStyle::Unsupported => continue,
        };
        let active = |disabled: bool| json!((flag == "disabled") == disabled);
        let target = target_for(adapter);
        let mut doc = RawDocument::new();
        adapter
            .add(&mut doc, &target, &EntrySpec::stdio("abap", "bin", McpAuth::SessionEnv))
            .expect("add entry");
        let before = shown(adapter, &doc, "abap");

        adapter
            .toggle(&mut doc, &target, "abap", false)
            .expect("enable");
        let enabled = shown(adapter, &doc, "abap");
        assert_eq!(enabled[flag], active(false), "{}", adapter.id());

        adapter
            .toggle(&mut doc, &target, "abap", true)
            .expect("disable");
        let disabled = shown(adapter, &doc, "abap");
        assert_eq!(disabled[flag], active(true), "{}", adapter.id());

        // Only the flag changes.
        let mut expected = before.clone();
        expected[flag] = active(true);
        assert_eq!(disabled, expected, "{}", adapter.id());

        let err = adapter
            .toggle(&mut doc, &target, "missing", true)
            .expect_err("missing entry");
        assert!(err.is_not_found());
        covered.push(adapter.id());
    }
    let mut expected = vec![
        ClientId::Cline,
        ClientId::Codex,
        ClientId::Goose,
        ClientId::Windsurf,
        ClientId::OpenCode,
        ClientId::Antigravity,
        ClientId::Crush,
    ];
    expected.sort();
    covered.sort();
    assert_eq!(covered, expected);
}

#[test]
fn unrelated_content_and_key_order_survive() {
    let registry = ClientRegistry::with_default_clients();
    let adapter = registry.get(ClientId::Cline).expect("registered");
    let root = json!({
        "zeta": 1,
        "mcpServers": {"other": {"command": "x", "disabled": false}},
        "alpha": {"nested": true}
    });
    let Value::Object(map) = root else { unreachable!() };
    let mut doc = RawDocument::from_map(map);

    adapter
        .add(
            &mut doc,
            &target_for(adapter),
            &EntrySpec::stdio("abap", "bin", McpAuth::SessionEnv),
        )
        .expect("add entry");

    let keys: Vec<&String> = doc.as_map().keys().collect();
    assert_eq!(keys, ["zeta", "mcpServers", "alpha"]);
    assert_eq!(doc.get("alpha"), Some(&json!({"nested": true})));
    let servers: Vec<&String> = doc
        .map_at(&["mcpServers"])
        .expect("servers shape")
        .expect("servers present")
        .keys()
        .collect();
    assert_eq!(servers, ["other", "abap"]);
}

#[test]
fn local_scope_stores_are_plain_maps() {
    let registry = ClientRegistry::with_default_clients();
    let adapter = registry.get(ClientId::Claude).expect("registered");
    let target = StoreTarget::local(PROJECT);
    let mut doc = RawDocument::new();
    adapter
        .add(&mut doc, &target, &EntrySpec::stdio("abap", "bin", McpAuth::SessionEnv))
        .expect("add entry");

    assert!(doc.get("projects").is_none());
    assert!(
        doc.map_at(&["mcpServers", "abap"])
            .expect("entry shape")
            .is_some()
    );
    assert_eq!(target.scope, ConfigScope::Local);
}
