//! Integration test: resolution, schema normalization and options
//! validation through the public API.

use flatlint_core::{
    get_rule_options_schema, resolve_rule_id, CompiledSchema, Config, FlatConfig,
    JsonSchemaEngine, LookupErrorKind, Plugin, PluginRegistry, RuleDefinition, RuleObject,
    RuleValidator, SchemaCompileError, SchemaEngine,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Engine that counts compile calls and delegates to `jsonschema`.
#[derive(Clone, Default)]
struct CountingEngine {
    compiles: Arc<AtomicUsize>,
    inner: JsonSchemaEngine,
}

impl SchemaEngine for CountingEngine {
    fn compile(&self, schema: &Value) -> Result<Arc<dyn CompiledSchema>, SchemaCompileError> {
        self.compiles.fetch_add(1, Ordering::SeqCst);
        self.inner.compile(schema)
    }
}

fn positional_rule(schema: Value) -> RuleDefinition {
    RuleDefinition::object(RuleObject::new().with_schema(schema))
}

// ── Resolution properties ──

#[test]
fn bare_ids_resolve_only_in_builtins() {
    let builtins = Arc::new(Plugin::new().with_rule("semi", RuleDefinition::function()));
    let plugins = PluginRegistry::new()
        .with("@", builtins)
        .with("test", Arc::new(Plugin::new().with_rule("foo", RuleDefinition::function())));

    assert!(resolve_rule_id("semi", Some(&plugins)).is_ok());
    let err = resolve_rule_id("foo", Some(&plugins)).unwrap_err();
    assert_eq!(err.kind(), LookupErrorKind::NoBuiltIn);
    assert_eq!(err.code(), "NO_BUILT_IN");
}

#[test]
fn ambiguous_split_is_stable() {
    let plugins = PluginRegistry::new()
        .with(
            "a",
            Arc::new(Plugin::new().with_rule("3/4", RuleDefinition::function())),
        )
        .with(
            "a/3",
            Arc::new(Plugin::new().with_rule("4", RuleDefinition::function())),
        );

    let first = resolve_rule_id("a/3/4", Some(&plugins)).unwrap();
    for _ in 0..10 {
        assert_eq!(resolve_rule_id("a/3/4", Some(&plugins)).unwrap(), first);
    }
    assert_eq!(first.plugin_name, "a");
    assert_eq!(first.rule_name, "3/4");
}

// ── Validation properties ──

#[test]
fn positional_schema_enforces_max_items() {
    let rule = positional_rule(json!([{ "enum": [0] }]));
    let schema = get_rule_options_schema(Some(&rule)).unwrap();
    assert_eq!(schema["maxItems"], json!(1));

    let plugin = Arc::new(Plugin::new().with_rule("r", rule));
    let base = FlatConfig::new().with_plugin("test", plugin);
    let mut validator = RuleValidator::new();

    validator
        .validate(&base.clone().with_rule("test/r", vec![json!(2), json!(0)]))
        .unwrap();
    assert!(validator
        .validate(&base.clone().with_rule("test/r", vec![json!(2), json!(1)]))
        .is_err());
    assert!(validator
        .validate(&base.with_rule("test/r", vec![json!(2), json!(0), json!(1)]))
        .is_err());
}

#[test]
fn unknown_rule_with_suggestion() {
    let other = Arc::new(Plugin::new().with_rule("no-such-rule", RuleDefinition::function()));
    let config = FlatConfig::new()
        .with_plugin("@", Arc::new(Plugin::new()))
        .with_plugin("other", other)
        .with_rule("no-such-rule", vec![json!(2)]);

    let err = RuleValidator::new().validate(&config).unwrap_err();
    assert_eq!(err.lookup_kind(), Some(LookupErrorKind::NoBuiltIn));
    assert!(err.to_string().contains("Did you mean: \"other/no-such-rule\"?"));
}

#[test]
fn disabled_rule_ignores_schema() {
    let plugin = Arc::new(Plugin::new().with_rule("some-rule", positional_rule(json!([]))));
    let config = FlatConfig::new()
        .with_plugin("@", plugin)
        .with_rule("some-rule", vec![json!(0), json!("anything")]);
    RuleValidator::new().validate(&config).unwrap();
}

// ── Caching ──

#[test]
fn aliased_definition_compiles_once() {
    let engine = CountingEngine::default();
    let compiles = Arc::clone(&engine.compiles);

    let plugin = Arc::new(
        Plugin::new().with_rule("foo", positional_rule(json!([{ "type": "string" }]))),
    );
    let config = FlatConfig::new()
        .with_plugin("@", Arc::new(Plugin::new()))
        .with_plugin("first", Arc::clone(&plugin))
        .with_plugin("second", plugin)
        .with_rule("first/foo", vec![json!(2), json!("a")])
        .with_rule("second/foo", vec![json!(1), json!("b")]);

    let mut validator = RuleValidator::with_engine(engine);
    validator.validate(&config).unwrap();
    validator.validate(&config).unwrap();

    assert_eq!(compiles.load(Ordering::SeqCst), 1);
    assert_eq!(validator.cached_rules(), 1);
}

#[test]
fn fresh_validator_starts_with_empty_cache() {
    let engine = CountingEngine::default();
    let compiles = Arc::clone(&engine.compiles);

    let plugin = Arc::new(Plugin::new().with_rule("foo", positional_rule(json!([]))));
    let config = FlatConfig::new()
        .with_plugin("test", plugin)
        .with_rule("test/foo", vec![json!(2)]);

    RuleValidator::with_engine(engine.clone())
        .validate(&config)
        .unwrap();
    RuleValidator::with_engine(engine).validate(&config).unwrap();

    assert_eq!(compiles.load(Ordering::SeqCst), 2);
}

#[test]
fn malformed_schema_never_blocks_options() {
    let plugin = Arc::new(Plugin::new().with_rule(
        "broken",
        RuleDefinition::object(
            RuleObject::new().with_meta_schema(json!({ "type": "array", "maxItems": "one" })),
        ),
    ));
    let config = FlatConfig::new()
        .with_plugin("test", plugin)
        .with_rule("test/broken", vec![json!(2), json!(null), json!({ "x": 1 })]);
    RuleValidator::new().validate(&config).unwrap();
}

// ── End to end through the TOML loader ──

#[test]
fn toml_config_round_trip() {
    let tmp = tempfile::TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("quotes.json"),
        r#"{
            "meta": { "name": "plugin-quotes" },
            "rules": {
                "style": { "meta": { "schema": [{ "enum": ["single", "double"] }] } }
            }
        }"#,
    )
    .unwrap();

    let config = Config::parse(
        r#"
[plugins]
"@acme/quotes" = "quotes.json"

[rules]
"@acme/quotes/style" = ["error", "triple"]
"#,
    )
    .unwrap();

    let flat = config
        .into_flat_config(tmp.path(), Arc::new(Plugin::new()))
        .unwrap();
    let err = RuleValidator::new().validate(&flat).unwrap_err();
    assert_eq!(err.rule_id(), "@acme/quotes/style");
    assert!(err.to_string().contains("\n\t/0 "));
}
