//! Built-in rule definitions.
//!
//! Only the declarations matter here: names, metadata and options schemas.
//! Schemas use both shapes a rule may declare, positional arrays and whole
//! array schemas, at both `schema` and `meta.schema`.

use flatlint_core::{Plugin, PluginMeta, RuleDefinition, RuleDocs, RuleMeta, RuleObject};
use serde_json::{json, Value};

fn documented(description: &str, schema: Value) -> RuleDefinition {
    RuleDefinition::object(RuleObject::new().with_meta(RuleMeta {
        schema: Some(schema),
        docs: Some(RuleDocs {
            description: Some(description.to_string()),
        }),
        ..RuleMeta::default()
    }))
}

fn always_never() -> Value {
    json!({ "enum": ["always", "never"] })
}

fn semi() -> RuleDefinition {
    documented(
        "Require or disallow semicolons instead of ASI",
        json!({
            "anyOf": [
                {
                    "type": "array",
                    "items": [
                        { "enum": ["never"] },
                        {
                            "type": "object",
                            "properties": {
                                "beforeStatementContinuationChars": {
                                    "enum": ["always", "any", "never"]
                                }
                            },
                            "additionalProperties": false
                        }
                    ],
                    "minItems": 0,
                    "maxItems": 2
                },
                {
                    "type": "array",
                    "items": [
                        { "enum": ["always"] },
                        {
                            "type": "object",
                            "properties": {
                                "omitLastInOneLineBlock": { "type": "boolean" }
                            },
                            "additionalProperties": false
                        }
                    ],
                    "minItems": 0,
                    "maxItems": 2
                }
            ]
        }),
    )
}

fn quotes() -> RuleDefinition {
    documented(
        "Enforce the consistent use of either backticks, double, or single quotes",
        json!([
            { "enum": ["single", "double", "backtick"] },
            {
                "anyOf": [
                    { "enum": ["avoid-escape"] },
                    {
                        "type": "object",
                        "properties": {
                            "avoidEscape": { "type": "boolean" },
                            "allowTemplateLiterals": { "type": "boolean" }
                        },
                        "additionalProperties": false
                    }
                ]
            }
        ]),
    )
}

fn eqeqeq() -> RuleDefinition {
    documented(
        "Require the use of `===` and `!==`",
        json!({
            "type": "array",
            "anyOf": [
                {
                    "items": [
                        { "enum": ["always"] },
                        {
                            "type": "object",
                            "properties": { "null": { "enum": ["always", "never", "ignore"] } },
                            "additionalProperties": false
                        }
                    ],
                    "additionalItems": false
                },
                {
                    "items": [{ "enum": ["smart", "allow-null"] }],
                    "additionalItems": false
                }
            ]
        }),
    )
}

fn no_console() -> RuleDefinition {
    documented(
        "Disallow the use of `console`",
        json!([{
            "type": "object",
            "properties": {
                "allow": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 1,
                    "uniqueItems": true
                }
            },
            "additionalProperties": false
        }]),
    )
}

fn no_unused_vars() -> RuleDefinition {
    documented(
        "Disallow unused variables",
        json!([{
            "oneOf": [
                { "enum": ["all", "local"] },
                {
                    "type": "object",
                    "properties": {
                        "vars": { "enum": ["all", "local"] },
                        "args": { "enum": ["all", "after-used", "none"] },
                        "ignoreRestSiblings": { "type": "boolean" },
                        "varsIgnorePattern": { "type": "string" },
                        "argsIgnorePattern": { "type": "string" },
                        "caughtErrors": { "enum": ["all", "none"] }
                    },
                    "additionalProperties": false
                }
            ]
        }]),
    )
}

fn max_len() -> RuleDefinition {
    let options = json!({
        "type": "object",
        "properties": {
            "code": { "type": "integer", "minimum": 0 },
            "tabWidth": { "type": "integer", "minimum": 0 },
            "ignoreComments": { "type": "boolean" },
            "ignoreUrls": { "type": "boolean" },
            "ignoreStrings": { "type": "boolean" }
        },
        "additionalProperties": false
    });
    documented(
        "Enforce a maximum line length",
        json!([
            { "anyOf": [options, { "type": "integer", "minimum": 0 }] },
            { "anyOf": [options, { "type": "integer", "minimum": 0 }] },
            options
        ]),
    )
}

fn indent() -> RuleDefinition {
    documented(
        "Enforce consistent indentation",
        json!([
            { "oneOf": [{ "enum": ["tab"] }, { "type": "integer", "minimum": 0 }] },
            {
                "type": "object",
                "properties": {
                    "SwitchCase": { "type": "integer", "minimum": 0 },
                    "ignoreComments": { "type": "boolean" }
                },
                "additionalProperties": false
            }
        ]),
    )
}

fn comma_dangle() -> RuleDefinition {
    RuleDefinition::object(RuleObject::new().with_schema(json!([{
        "enum": ["always", "always-multiline", "only-multiline", "never"]
    }])))
}

fn camelcase() -> RuleDefinition {
    documented(
        "Enforce camelcase naming convention",
        json!([{
            "type": "object",
            "properties": {
                "ignoreDestructuring": { "type": "boolean" },
                "ignoreImports": { "type": "boolean" },
                "properties": always_never()
            },
            "additionalProperties": false
        }]),
    )
}

fn prefer_const() -> RuleDefinition {
    documented(
        "Require `const` declarations for variables that are never reassigned",
        json!([{
            "type": "object",
            "properties": {
                "destructuring": { "enum": ["any", "all"] },
                "ignoreReadBeforeAssign": { "type": "boolean" }
            },
            "additionalProperties": false
        }]),
    )
}

fn strict() -> RuleDefinition {
    RuleDefinition::object(
        RuleObject::new().with_schema(json!([{ "enum": ["never", "global", "function", "safe"] }])),
    )
}

fn func_call_spacing() -> RuleDefinition {
    documented(
        "Require or disallow spacing between function identifiers and their invocations",
        json!({
            "type": "array",
            "items": [always_never(), { "type": "object" }],
            "minItems": 0,
            "maxItems": 2
        }),
    )
}

fn no_debugger() -> RuleDefinition {
    documented("Disallow the use of `debugger`", json!([]))
}

fn no_var() -> RuleDefinition {
    documented("Require `let` or `const` instead of `var`", json!([]))
}

fn no_extra_semi() -> RuleDefinition {
    RuleDefinition::object(RuleObject::new().with_meta(RuleMeta {
        schema: Some(json!([])),
        deprecated: true,
        replaced_by: vec!["semi".to_string()],
        docs: Some(RuleDocs {
            description: Some("Disallow unnecessary semicolons".to_string()),
        }),
    }))
}

fn no_with() -> RuleDefinition {
    RuleDefinition::function()
}

/// Returns every built-in rule in name order.
#[must_use]
pub fn builtin_rules() -> Vec<(&'static str, RuleDefinition)> {
    vec![
        ("camelcase", camelcase()),
        ("comma-dangle", comma_dangle()),
        ("eqeqeq", eqeqeq()),
        ("func-call-spacing", func_call_spacing()),
        ("indent", indent()),
        ("max-len", max_len()),
        ("no-console", no_console()),
        ("no-debugger", no_debugger()),
        ("no-extra-semi", no_extra_semi()),
        ("no-unused-vars", no_unused_vars()),
        ("no-var", no_var()),
        ("no-with", no_with()),
        ("prefer-const", prefer_const()),
        ("quotes", quotes()),
        ("semi", semi()),
        ("strict", strict()),
    ]
}

/// Returns the plugin registered under `"@"`.
#[must_use]
pub fn builtin_plugin() -> Plugin {
    builtin_rules().into_iter().fold(
        Plugin::new().with_meta(PluginMeta {
            name: Some("flatlint".to_string()),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
        |plugin, (name, rule)| plugin.with_rule(name, rule),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatlint_core::{get_rule_options_schema, SchemaCompiler};

    #[test]
    fn builtin_rules_are_sorted_and_unique() {
        let names: Vec<&str> = builtin_rules().into_iter().map(|(name, _)| name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn every_builtin_schema_compiles() {
        let mut compiler = SchemaCompiler::new();
        for (name, rule) in builtin_rules() {
            if let Some(schema) = get_rule_options_schema(Some(&rule)) {
                assert!(!compiler.compile(&schema).accepts_all(), "{name} schema is invalid");
            }
        }
    }

    #[test]
    fn builtin_plugin_has_every_rule() {
        let plugin = builtin_plugin();
        assert_eq!(plugin.rule_count(), builtin_rules().len());
        assert!(plugin.rule("semi").is_some());
        assert_eq!(
            plugin.meta().and_then(|m| m.name.as_deref()),
            Some("flatlint")
        );
    }

    #[test]
    fn semi_options() {
        let rule = semi();
        let schema = get_rule_options_schema(Some(&rule)).unwrap();
        let validator = SchemaCompiler::new().compile(&schema);
        assert!(validator.validate(&json!([])).is_empty());
        assert!(validator.validate(&json!(["always"])).is_empty());
        assert!(validator
            .validate(&json!(["never", { "beforeStatementContinuationChars": "any" }]))
            .is_empty());
        assert!(!validator.validate(&json!(["sometimes"])).is_empty());
    }

    #[test]
    fn no_console_options() {
        let rule = no_console();
        let schema = get_rule_options_schema(Some(&rule)).unwrap();
        let validator = SchemaCompiler::new().compile(&schema);
        assert!(validator.validate(&json!([{ "allow": ["warn"] }])).is_empty());
        assert!(!validator.validate(&json!([{ "allow": [] }])).is_empty());
        assert!(!validator.validate(&json!([{ "deny": ["log"] }])).is_empty());
    }
}
