//! Layered configuration flow: load, merge with provenance, normalize, diff,
//! and write back out.

use astrid_nestmap::{
    FieldSources, Interner, Key, NestError, Rewrite, SymbolTable, Tree, diff, get, get_or,
    merge_tracking, normalize_keys_strict, path, remove, to_serializable_with,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Defaults,
    User,
    Workspace,
}

fn load(src: &str) -> Tree {
    Tree::from(toml::from_str::<toml::Value>(src).unwrap())
}

const DEFAULTS: &str = r#"
    [model]
    provider = "claude"
    max_tokens = 4096

    [budget]
    session_max_usd = 100.0

    [security.policy]
    blocked_tools = ["rm"]
"#;

const USER: &str = r#"
    [model]
    api_key = "sk-user"
    max_tokens = 8192
"#;

const WORKSPACE: &str = r#"
    [budget]
    session_max_usd = 20.0

    [security.policy]
    blocked_tools = ["rm", "dd"]
"#;

fn resolve() -> (Tree, FieldSources<Layer>) {
    let mut sources = FieldSources::new();
    let mut resolved = Tree::empty();
    for (src, layer) in [
        (DEFAULTS, Layer::Defaults),
        (USER, Layer::User),
        (WORKSPACE, Layer::Workspace),
    ] {
        resolved = merge_tracking(&resolved, &load(src), &layer, &mut sources);
    }
    (resolved, sources)
}

#[test]
fn layered_resolution_reports_sources() {
    let (resolved, sources) = resolve();

    assert_eq!(
        get(&path!["model", "max_tokens"], &resolved).unwrap().as_integer(),
        Some(8192)
    );
    assert_eq!(
        get(&path!["budget", "session_max_usd"], &resolved)
            .unwrap()
            .as_float(),
        Some(20.0)
    );
    assert_eq!(
        sources.get(&path!["model", "provider"]),
        Some(&Layer::Defaults)
    );
    assert_eq!(sources.get(&path!["model", "max_tokens"]), Some(&Layer::User));
    assert_eq!(
        sources.get(&path!["security", "policy", "blocked_tools"]),
        Some(&Layer::Workspace)
    );

    let fallback = Tree::from("unset");
    assert_eq!(
        get_or(&path!["gateway", "port"], &resolved, &fallback),
        &fallback
    );
}

#[test]
fn strict_normalization_against_known_schema() {
    let (resolved, _) = resolve();
    let schema = Interner::with_symbols([
        "model",
        "provider",
        "max_tokens",
        "api_key",
        "budget",
        "session_max_usd",
        "security",
        "policy",
        "blocked_tools",
    ]);

    let symbolic = normalize_keys_strict(&resolved, &schema).unwrap();
    let model = Key::Symbol(schema.lookup("model").unwrap());
    assert!(get(&[model], &symbolic).unwrap().is_node());

    let unknown = load("[gateway]\nport = 8080");
    assert_eq!(
        normalize_keys_strict(&unknown, &schema).unwrap_err(),
        NestError::UnknownSymbol {
            name: "port".to_owned()
        }
    );
}

#[test]
fn diff_then_persist_without_secrets() {
    let (resolved, _) = resolve();
    let previous = load(DEFAULTS);

    let changes = diff(&resolved, &previous);
    assert!(!changes.is_empty());
    assert!(changes.added.is_empty());
    assert!(changes.removed.is_empty());
    assert_eq!(
        changes.changed.keys().cloned().collect::<Vec<_>>(),
        path!["budget", "model", "security"]
    );

    let persisted = to_serializable_with(&resolved, |key, value| {
        if key.as_text() == Some("api_key") {
            Rewrite::Drop
        } else {
            Rewrite::keep(key, value)
        }
    });
    let out = toml::to_string(&persisted.to_toml().unwrap()).unwrap();
    assert!(!out.contains("sk-user"));
    assert!(out.contains("max_tokens = 8192"));

    // Equivalent to removing the key outright.
    assert_eq!(persisted, remove(&path!["model", "api_key"], &resolved));
}
