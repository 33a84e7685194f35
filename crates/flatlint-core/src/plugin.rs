//! Plugin and rule definition model.
//!
//! Rule definitions arrive in two shapes: a legacy bare create function with
//! no metadata, or an object carrying an optional `create`, an optional
//! top-level `schema` and an optional `meta` block. Both are normalized into
//! [`RuleDefinition`] when a plugin is built, so nothing downstream has to
//! re-inspect the raw shape.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Registry name reserved for the rules shipped with the linter itself.
pub const BUILTIN_PLUGIN_NAME: &str = "@";

static NEXT_RULE_KEY: AtomicU64 = AtomicU64::new(1);

// ────────────────────────────────────────────
// Rule definitions
// ────────────────────────────────────────────

/// Stable identity of a [`RuleDefinition`].
///
/// Assigned once when the definition is constructed. Two identifiers that
/// resolve to the same definition share the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleKey(u64);

impl RuleKey {
    fn next() -> Self {
        Self(NEXT_RULE_KEY.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw key value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two shapes a rule can be declared in.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Legacy rule exported as a bare create function.
    Function,
    /// Rule exported as an object.
    Object(RuleObject),
}

/// Object-form rule declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleObject {
    /// Whether the object provides a `create` function.
    #[serde(default)]
    pub create: bool,

    /// Legacy top-level options schema.
    #[serde(default)]
    pub schema: Option<Value>,

    /// Rule metadata.
    #[serde(default)]
    pub meta: Option<RuleMeta>,
}

impl RuleObject {
    /// Creates an object rule with a `create` function and no schema.
    #[must_use]
    pub fn new() -> Self {
        Self {
            create: true,
            ..Self::default()
        }
    }

    /// Sets the top-level `schema`.
    #[must_use]
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Sets `meta.schema`, creating the `meta` block if needed.
    #[must_use]
    pub fn with_meta_schema(mut self, schema: Value) -> Self {
        self.meta.get_or_insert_with(RuleMeta::default).schema = Some(schema);
        self
    }

    /// Sets the `meta` block.
    #[must_use]
    pub fn with_meta(mut self, meta: RuleMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// The `meta` block of an object rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMeta {
    /// Modern options schema.
    #[serde(default)]
    pub schema: Option<Value>,

    /// Whether the rule is deprecated.
    #[serde(default)]
    pub deprecated: bool,

    /// Rules that supersede this one.
    #[serde(default)]
    pub replaced_by: Vec<String>,

    /// Documentation block.
    #[serde(default)]
    pub docs: Option<RuleDocs>,
}

/// Rule documentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDocs {
    /// One-line description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A rule as registered by a plugin.
#[derive(Debug, PartialEq)]
pub struct RuleDefinition {
    key: RuleKey,
    kind: RuleKind,
}

impl RuleDefinition {
    /// Creates a definition with a fresh [`RuleKey`].
    #[must_use]
    pub fn new(kind: RuleKind) -> Self {
        Self {
            key: RuleKey::next(),
            kind,
        }
    }

    /// Creates a legacy function-form definition.
    #[must_use]
    pub fn function() -> Self {
        Self::new(RuleKind::Function)
    }

    /// Creates an object-form definition.
    #[must_use]
    pub fn object(object: RuleObject) -> Self {
        Self::new(RuleKind::Object(object))
    }

    /// Returns the identity key of this definition.
    #[must_use]
    pub fn key(&self) -> RuleKey {
        self.key
    }

    /// Returns the declared shape.
    #[must_use]
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Returns the `meta` block, if any.
    #[must_use]
    pub fn meta(&self) -> Option<&RuleMeta> {
        match &self.kind {
            RuleKind::Function => None,
            RuleKind::Object(object) => object.meta.as_ref(),
        }
    }

    /// Returns the documented description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.meta()
            .and_then(|m| m.docs.as_ref())
            .and_then(|d| d.description.as_deref())
    }
}

// ────────────────────────────────────────────
// Plugins
// ────────────────────────────────────────────

/// Plugin identification metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMeta {
    /// Package name.
    #[serde(default)]
    pub name: Option<String>,
    /// Package version.
    #[serde(default)]
    pub version: Option<String>,
}

/// Errors from parsing a plugin manifest.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// The manifest is not valid JSON or has the wrong shape.
    #[error("invalid plugin manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule name is empty.
    #[error("plugin declares a rule with an empty name")]
    EmptyRuleName,
}

/// A named bundle of rules.
#[derive(Debug, Default)]
pub struct Plugin {
    meta: Option<PluginMeta>,
    rules: IndexMap<String, Arc<RuleDefinition>>,
}

impl Plugin {
    /// Creates an empty plugin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the plugin metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: PluginMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Adds a rule.
    #[must_use]
    pub fn with_rule(self, name: impl Into<String>, rule: RuleDefinition) -> Self {
        self.with_shared_rule(name, Arc::new(rule))
    }

    /// Adds a rule that may also be registered elsewhere.
    #[must_use]
    pub fn with_shared_rule(mut self, name: impl Into<String>, rule: Arc<RuleDefinition>) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    /// Parses a plugin from a JSON manifest.
    ///
    /// ```json
    /// {
    ///   "meta": { "name": "eslint-plugin-test", "version": "1.0.0" },
    ///   "rules": {
    ///     "legacy": "function",
    ///     "positional": { "schema": [{ "enum": ["always", "never"] }] },
    ///     "modern": { "meta": { "schema": { "type": "array" } } }
    ///   }
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a rule name is empty.
    pub fn from_json(content: &str) -> Result<Self, PluginError> {
        let manifest: PluginManifest = serde_json::from_str(content)?;
        let mut plugin = Self {
            meta: manifest.meta,
            rules: IndexMap::with_capacity(manifest.rules.len()),
        };
        for (name, rule) in manifest.rules {
            if name.is_empty() {
                return Err(PluginError::EmptyRuleName);
            }
            let definition = match rule {
                RuleManifest::Function(FunctionMarker::Function) => RuleDefinition::function(),
                RuleManifest::Object(object) => RuleDefinition::object(object),
            };
            plugin.rules.insert(name, Arc::new(definition));
        }
        Ok(plugin)
    }

    /// Returns the plugin metadata, if any.
    #[must_use]
    pub fn meta(&self) -> Option<&PluginMeta> {
        self.meta.as_ref()
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Arc<RuleDefinition>> {
        self.rules.get(name)
    }

    /// Iterates rules in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &Arc<RuleDefinition>)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

#[derive(Deserialize)]
struct PluginManifest {
    #[serde(default)]
    meta: Option<PluginMeta>,
    #[serde(default)]
    rules: IndexMap<String, RuleManifest>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RuleManifest {
    Function(FunctionMarker),
    Object(RuleObject),
}

#[derive(Deserialize)]
enum FunctionMarker {
    #[serde(rename = "function")]
    Function,
}

// ────────────────────────────────────────────
// Registry
// ────────────────────────────────────────────

/// Plugins registered in a configuration, keyed by name.
///
/// Iteration follows registration order.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: IndexMap<String, Arc<Plugin>>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, plugin: Arc<Plugin>) {
        self.plugins.insert(name.into(), plugin);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, plugin: Arc<Plugin>) -> Self {
        self.register(name, plugin);
        self
    }

    /// Looks up a plugin by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Plugin>> {
        self.plugins.get(name)
    }

    /// Looks up `rule` inside the plugin registered as `plugin`.
    #[must_use]
    pub fn rule(&self, plugin: &str, rule: &str) -> Option<&Arc<RuleDefinition>> {
        self.plugins.get(plugin).and_then(|p| p.rule(rule))
    }

    /// Iterates plugins in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Plugin>)> {
        self.plugins.iter().map(|(name, plugin)| (name.as_str(), plugin))
    }

    /// Returns the number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
