//! Rule options validation for a whole configuration.

use crate::plugin::{PluginRegistry, RuleDefinition, RuleKey, BUILTIN_PLUGIN_NAME};
use crate::replacements::replacements_for;
use crate::resolve::{
    resolve_definition, search_partial_matches, LookupError, LookupErrorKind,
};
use crate::schema::compiler::{JsonSchemaEngine, OptionsValidator, SchemaCompiler, SchemaEngine};
use crate::schema::options::{normalize_options_schema, OptionsSchema};
use crate::types::{numeric_level, FlatConfig};

use miette::Diagnostic;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// A configured rule that cannot be used as written.
#[derive(Debug, Error, Diagnostic)]
pub enum RuleConfigError {
    /// The rule identifier does not resolve.
    #[error("Key \"rules\": Key \"{rule_id}\": {lookup}")]
    #[diagnostic(code(flatlint::rules::unknown_rule))]
    UnknownRule {
        /// Identifier as configured.
        rule_id: String,
        /// Why the lookup failed, including any suggestions.
        lookup: LookupError,
    },

    /// The rule's options do not match its schema.
    #[error("Key \"rules\": Key \"{rule_id}\":\n{}", format_errors(.errors))]
    #[diagnostic(
        code(flatlint::rules::invalid_options),
        help("check the options documented for this rule")
    )]
    InvalidOptions {
        /// Identifier as configured.
        rule_id: String,
        /// One `"<path> <message>."` entry per failed check.
        errors: Vec<String>,
    },
}

impl RuleConfigError {
    /// Returns the offending rule identifier.
    #[must_use]
    pub fn rule_id(&self) -> &str {
        match self {
            Self::UnknownRule { rule_id, .. } | Self::InvalidOptions { rule_id, .. } => rule_id,
        }
    }

    /// Returns the lookup kind for resolution failures.
    #[must_use]
    pub fn lookup_kind(&self) -> Option<LookupErrorKind> {
        match self {
            Self::UnknownRule { lookup, .. } => Some(lookup.kind()),
            Self::InvalidOptions { .. } => None,
        }
    }
}

fn format_errors(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("\t{e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validates the options of every configured rule.
///
/// Compiled validators are cached per rule definition for the lifetime of
/// the instance, so identifiers aliasing one definition compile its schema
/// once. Validation stops at the first failing rule.
pub struct RuleValidator<E = JsonSchemaEngine> {
    compiler: SchemaCompiler<E>,
    validators: HashMap<RuleKey, Option<OptionsValidator>>,
}

impl RuleValidator {
    /// Creates a validator using the default `jsonschema` engine.
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(JsonSchemaEngine::default())
    }
}

impl Default for RuleValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SchemaEngine> RuleValidator<E> {
    /// Creates a validator using `engine`.
    #[must_use]
    pub fn with_engine(engine: E) -> Self {
        Self {
            compiler: SchemaCompiler::with_engine(engine),
            validators: HashMap::new(),
        }
    }

    /// Returns the schema compiler.
    #[must_use]
    pub fn compiler(&self) -> &SchemaCompiler<E> {
        &self.compiler
    }

    /// Returns how many rule definitions have a cached validator entry.
    #[must_use]
    pub fn cached_rules(&self) -> usize {
        self.validators.len()
    }

    /// Validates every enabled rule in `config`.
    ///
    /// # Errors
    ///
    /// Returns the first unknown rule or invalid options found.
    pub fn validate(&mut self, config: &FlatConfig) -> Result<(), RuleConfigError> {
        let plugins = config.plugins.as_ref();
        let mut checked = 0usize;

        for (rule_id, options) in &config.rules {
            if rule_id == "__proto__" {
                continue;
            }
            if is_disabled(options) {
                debug!("Skipping disabled rule: {}", rule_id);
                continue;
            }

            let rule = lookup_rule(rule_id, plugins)?;
            let Some(validator) = self.validator_for(rule) else {
                debug!("No options schema for {}", rule_id);
                continue;
            };

            let rule_options = Value::Array(options.get(1..).unwrap_or_default().to_vec());
            let errors = validator.validate(&rule_options);
            if !errors.is_empty() {
                return Err(RuleConfigError::InvalidOptions {
                    rule_id: rule_id.clone(),
                    errors,
                });
            }
            checked += 1;
        }

        info!(
            "Validated options of {} rule(s) ({} configured)",
            checked,
            config.rules.len()
        );
        Ok(())
    }

    fn validator_for(&mut self, rule: &RuleDefinition) -> Option<OptionsValidator> {
        if let Some(cached) = self.validators.get(&rule.key()) {
            return cached.clone();
        }

        let validator = match normalize_options_schema(rule) {
            OptionsSchema::Absent => None,
            OptionsSchema::Rejected(schema) => {
                self.compiler.evict(&schema);
                None
            }
            OptionsSchema::Schema(schema) => Some(self.compiler.compile(&schema)),
        };
        debug!("Cached options validator for rule {}", rule.key());
        self.validators.insert(rule.key(), validator.clone());
        validator
    }
}

fn is_disabled(options: &[Value]) -> bool {
    match options.first() {
        Some(Value::Number(n)) => numeric_level(n) == Some(0),
        _ => false,
    }
}

fn lookup_rule<'a>(
    rule_id: &str,
    plugins: Option<&'a PluginRegistry>,
) -> Result<&'a Arc<RuleDefinition>, RuleConfigError> {
    resolve_definition(rule_id, plugins)
        .map(|(_, rule)| rule)
        .map_err(|e| RuleConfigError::UnknownRule {
            rule_id: rule_id.to_string(),
            lookup: explain_lookup_failure(rule_id, e, plugins),
        })
}

/// Rewrites a failed lookup of `rule_id` into the message shown to users.
///
/// Removed core rules name their replacements. Otherwise the partial
/// matches found in `plugins` are appended as suggestions, built-in rules
/// by their bare name.
#[must_use]
pub fn explain_lookup_failure(
    rule_id: &str,
    error: LookupError,
    plugins: Option<&PluginRegistry>,
) -> LookupError {
    if let Some(replacements) = replacements_for(rule_id) {
        let list = replacements
            .iter()
            .map(|r| format!("\"{r}\""))
            .collect::<Vec<_>>()
            .join(", ");
        return LookupError::new(
            LookupErrorKind::NoBuiltIn,
            format!("Rule \"{rule_id}\" was removed and replaced by: {list}."),
        );
    }

    let Some(plugins) = plugins else {
        return error;
    };
    let builtin_prefix = format!("{BUILTIN_PLUGIN_NAME}/");
    let mut candidates: Vec<String> = Vec::new();
    for candidate in &search_partial_matches(rule_id, plugins) {
        let candidate = candidate
            .strip_prefix(&builtin_prefix)
            .map_or_else(|| candidate.clone(), str::to_string);
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    error.with_suggestions(&candidates)
}
