//! Options-schema normalization.
//!
//! A rule declares its options schema either at `schema` or at
//! `meta.schema`, in one of two shapes:
//!
//! - positional: an array of schemas, one per option
//! - whole: a single schema describing the options array itself
//!
//! Both are normalized into one schema for the options array. Positional
//! schemas are wrapped so that no more options than declared are accepted.

use crate::plugin::{RuleDefinition, RuleKind};
use serde_json::{json, Map, Value};
use tracing::warn;

/// Result of normalizing a rule's schema.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum OptionsSchema {
    /// No schema declared; any options are accepted.
    Absent,
    /// Canonical schema for the options array.
    Schema(Value),
    /// Whole-form schema whose top-level type admits non-arrays.
    Rejected(Value),
}

/// Returns the canonical options schema of `rule`, or `None` when its
/// options are not validated.
#[must_use]
pub fn get_rule_options_schema(rule: Option<&RuleDefinition>) -> Option<Value> {
    match normalize_options_schema(rule?) {
        OptionsSchema::Schema(schema) => Some(schema),
        OptionsSchema::Absent | OptionsSchema::Rejected(_) => None,
    }
}

pub(crate) fn normalize_options_schema(rule: &RuleDefinition) -> OptionsSchema {
    let RuleKind::Object(object) = rule.kind() else {
        return OptionsSchema::Absent;
    };
    let declared = object
        .schema
        .as_ref()
        .or_else(|| object.meta.as_ref().and_then(|m| m.schema.as_ref()));

    match declared {
        Some(Value::Array(items)) => OptionsSchema::Schema(positional_schema(items)),
        Some(Value::Object(schema)) => {
            if top_level_accepts_only_arrays(schema) {
                OptionsSchema::Schema(Value::Object(schema.clone()))
            } else {
                warn!(
                    rule = %rule.key(),
                    "options schema accepts non-array values at the top level; ignoring it"
                );
                OptionsSchema::Rejected(Value::Object(schema.clone()))
            }
        }
        _ => OptionsSchema::Absent,
    }
}

fn positional_schema(items: &[Value]) -> Value {
    if items.is_empty() {
        json!({ "type": "array", "minItems": 0, "maxItems": 0 })
    } else {
        json!({
            "type": "array",
            "items": items,
            "minItems": 0,
            "maxItems": items.len(),
        })
    }
}

/// Whether a whole-form schema constrains the options to an array.
///
/// A `type` keyword that admits anything besides `"array"` makes the schema
/// unusable for rule options. A missing or malformed `type` is left to the
/// schema engine.
#[must_use]
pub fn top_level_accepts_only_arrays(schema: &Map<String, Value>) -> bool {
    match schema.get("type") {
        Some(Value::String(ty)) => ty == "array",
        Some(Value::Array(types)) => types.iter().all(|t| t == "array"),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{RuleMeta, RuleObject};
    use crate::schema::SchemaCompiler;

    fn object_rule(object: RuleObject) -> RuleDefinition {
        RuleDefinition::object(object)
    }

    #[test]
    fn no_rule_no_schema() {
        assert_eq!(get_rule_options_schema(None), None);
    }

    #[test]
    fn function_rule_has_no_schema() {
        assert_eq!(
            get_rule_options_schema(Some(&RuleDefinition::function())),
            None
        );
    }

    #[test]
    fn object_rule_without_schema() {
        let rule = object_rule(RuleObject::new());
        assert_eq!(get_rule_options_schema(Some(&rule)), None);
    }

    #[test]
    fn positional_schema_is_wrapped() {
        let rule = object_rule(RuleObject::new().with_schema(json!([{ "enum": [0] }])));
        let schema = get_rule_options_schema(Some(&rule)).unwrap();
        assert_eq!(
            schema,
            json!({
                "type": "array",
                "items": [{ "enum": [0] }],
                "minItems": 0,
                "maxItems": 1
            })
        );

        let validator = SchemaCompiler::new().compile(&schema);
        assert!(validator.validate(&json!([0])).is_empty());
        assert!(!validator.validate(&json!([1])).is_empty());
        assert!(!validator.validate(&json!([0, 1])).is_empty());
    }

    #[test]
    fn empty_positional_schema_accepts_only_empty_options() {
        let rule = object_rule(RuleObject::new().with_schema(json!([])));
        let schema = get_rule_options_schema(Some(&rule)).unwrap();
        assert_eq!(
            schema,
            json!({ "type": "array", "minItems": 0, "maxItems": 0 })
        );

        let validator = SchemaCompiler::new().compile(&schema);
        assert!(validator.validate(&json!([])).is_empty());
        assert!(!validator.validate(&json!(["a"])).is_empty());
        assert!(!validator.validate(&json!([{}])).is_empty());
    }

    #[test]
    fn meta_whole_schema_is_returned_unchanged() {
        let whole = json!({
            "type": "array",
            "items": { "type": "string" }
        });
        let rule = object_rule(RuleObject::new().with_meta_schema(whole.clone()));
        assert_eq!(get_rule_options_schema(Some(&rule)), Some(whole));
    }

    #[test]
    fn meta_positional_schema_is_wrapped() {
        let rule = object_rule(
            RuleObject::new().with_meta_schema(json!([{ "type": "string" }, { "type": "object" }])),
        );
        let schema = get_rule_options_schema(Some(&rule)).unwrap();
        assert_eq!(schema["maxItems"], json!(2));
        assert_eq!(
            schema["items"],
            json!([{ "type": "string" }, { "type": "object" }])
        );
    }

    #[test]
    fn top_level_schema_wins_over_meta() {
        let rule = object_rule(
            RuleObject::new()
                .with_schema(json!([]))
                .with_meta(RuleMeta {
                    schema: Some(json!([{ "type": "string" }])),
                    ..RuleMeta::default()
                }),
        );
        let schema = get_rule_options_schema(Some(&rule)).unwrap();
        assert_eq!(schema["maxItems"], json!(0));
    }

    #[test]
    fn non_array_top_level_type_is_rejected() {
        let rule = object_rule(RuleObject::new().with_meta_schema(json!({ "type": "object" })));
        assert_eq!(
            normalize_options_schema(&rule),
            OptionsSchema::Rejected(json!({ "type": "object" }))
        );
        assert_eq!(get_rule_options_schema(Some(&rule)), None);
    }

    #[test]
    fn mixed_type_list_is_rejected() {
        let rule = object_rule(
            RuleObject::new().with_meta_schema(json!({ "type": ["array", "string"] })),
        );
        assert_eq!(get_rule_options_schema(Some(&rule)), None);
    }

    #[test]
    fn untyped_whole_schema_is_kept() {
        let whole = json!({ "anyOf": [{ "maxItems": 0 }, { "minItems": 1 }] });
        let rule = object_rule(RuleObject::new().with_schema(whole.clone()));
        assert_eq!(get_rule_options_schema(Some(&rule)), Some(whole));
    }

    #[test]
    fn scalar_schema_is_absent() {
        for value in [json!(true), json!(false), json!("array"), json!(3), Value::Null] {
            let rule = object_rule(RuleObject::new().with_schema(value));
            assert_eq!(get_rule_options_schema(Some(&rule)), None);
        }
    }

    #[test]
    fn array_type_guard() {
        let only_array = json!({ "type": "array" });
        let list = json!({ "type": ["array"] });
        let other = json!({ "type": "string" });
        assert!(top_level_accepts_only_arrays(only_array.as_object().unwrap()));
        assert!(top_level_accepts_only_arrays(list.as_object().unwrap()));
        assert!(!top_level_accepts_only_arrays(other.as_object().unwrap()));
    }
}
