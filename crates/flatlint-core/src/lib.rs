//! # flatlint-core
//!
//! Rule lookup and options validation for flat linter configurations.
//!
//! A flat config registers plugins by name and configures rules by
//! identifier. This crate provides:
//!
//! - [`resolve_rule_id`] for mapping identifiers such as `"semi"`,
//!   `"react/jsx-key"` or `"@org/pkg/no-foo"` to a plugin and rule
//! - [`search_partial_matches`] for "did you mean" suggestions
//! - [`get_rule_options_schema`] for normalizing a rule's options schema
//! - [`SchemaCompiler`] for turning schemas into validators that never fail
//! - [`RuleValidator`] for checking every configured rule's options
//!
//! ## Example
//!
//! ```
//! use flatlint_core::{FlatConfig, Plugin, RuleDefinition, RuleObject, RuleValidator};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let semi = RuleDefinition::object(
//!     RuleObject::new().with_schema(json!([{ "enum": ["always", "never"] }])),
//! );
//! let config = FlatConfig::new()
//!     .with_plugin("@", Arc::new(Plugin::new().with_rule("semi", semi)))
//!     .with_rule("semi", vec![json!(2), json!("always")]);
//!
//! RuleValidator::new().validate(&config)?;
//! # Ok::<(), flatlint_core::RuleConfigError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod plugin;
mod replacements;
mod resolve;
mod types;
mod validator;

/// Options-schema normalization and compilation.
pub mod schema;

pub use config::{Config, ConfigError};
pub use plugin::{
    Plugin, PluginError, PluginMeta, PluginRegistry, RuleDefinition, RuleDocs, RuleKey, RuleKind,
    RuleMeta, RuleObject, BUILTIN_PLUGIN_NAME,
};
pub use replacements::replacements_for;
pub use resolve::{
    resolve_rule_id, rule_id_splits, search_partial_matches, LookupError, LookupErrorKind,
    PartialMatches, ResolvedRule,
};
pub use schema::{
    get_rule_options_schema, top_level_accepts_only_arrays, CompiledSchema, JsonSchemaEngine,
    OptionsValidator, SchemaCompileError, SchemaCompiler, SchemaEngine, SchemaViolation,
};
pub use types::{FlatConfig, RuleOptions, Severity};
pub use validator::{explain_lookup_failure, RuleConfigError, RuleValidator};
