//! Rule identifier resolution.
//!
//! An identifier is `[<plugin>/]+<rule>`. Plugin names may be scoped
//! (`@org/pkg`) and rule names may contain slashes
//! (`node/no-unsupported-features/es-builtins`), so an identifier with two or
//! more slashes can be split in several ways. Splits are tried left to right,
//! shortest plugin prefix first, and the first split that names a registered
//! rule wins, even when a later split would also match.

use crate::plugin::{PluginRegistry, RuleDefinition, BUILTIN_PLUGIN_NAME};
use std::fmt;
use std::sync::Arc;

/// Why an identifier could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupErrorKind {
    /// Bare identifier with no matching built-in rule.
    NoBuiltIn,
    /// `<plugin>/<rule>` where the plugin has no such rule.
    NotInSpecifiedPlugin,
    /// Malformed identifier, missing registry, or no split matched.
    NotInAnyPlugin,
}

impl LookupErrorKind {
    /// Returns the stable error code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::NoBuiltIn => "NO_BUILT_IN",
            Self::NotInSpecifiedPlugin => "NOT_IN_SPECIFIED_PLUGIN",
            Self::NotInAnyPlugin => "NOT_IN_ANY_PLUGIN",
        }
    }
}

impl fmt::Display for LookupErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A failed rule lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LookupError {
    kind: LookupErrorKind,
    message: String,
}

impl LookupError {
    /// Creates a lookup error.
    #[must_use]
    pub fn new(kind: LookupErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub fn kind(&self) -> LookupErrorKind {
        self.kind
    }

    /// Returns the stable error code, e.g. `NOT_IN_ANY_PLUGIN`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Appends a "did you mean" hint listing `candidates`.
    #[must_use]
    pub fn with_suggestions(mut self, candidates: &[String]) -> Self {
        if candidates.is_empty() {
            return self;
        }
        let list = candidates
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        self.message = format!("{} Did you mean: {list}?", self.message);
        self
    }
}

/// The plugin and rule an identifier denotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedRule {
    /// Registry name of the plugin (`"@"` for built-ins).
    pub plugin_name: String,
    /// Rule name within the plugin.
    pub rule_name: String,
}

impl ResolvedRule {
    fn new(plugin_name: &str, rule_name: &str) -> Self {
        Self {
            plugin_name: plugin_name.to_string(),
            rule_name: rule_name.to_string(),
        }
    }

    /// Returns true for rules of the built-in namespace.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.plugin_name == BUILTIN_PLUGIN_NAME
    }
}

impl fmt::Display for ResolvedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_builtin() {
            write!(f, "{}", self.rule_name)
        } else {
            write!(f, "{}/{}", self.plugin_name, self.rule_name)
        }
    }
}

/// Every `(plugin, rule)` split of `rule_id` at a slash, shortest plugin first.
///
/// ```
/// # use flatlint_core::rule_id_splits;
/// let splits: Vec<_> = rule_id_splits("a/b/c").collect();
/// assert_eq!(splits, [("a", "b/c"), ("a/b", "c")]);
/// ```
pub fn rule_id_splits(rule_id: &str) -> impl Iterator<Item = (&str, &str)> + Clone {
    rule_id
        .match_indices('/')
        .map(move |(i, _)| (&rule_id[..i], &rule_id[i + 1..]))
}

/// Resolves `rule_id` against the registered plugins.
///
/// # Errors
///
/// Returns a [`LookupError`] whose kind tells which lookup failed.
pub fn resolve_rule_id(
    rule_id: &str,
    plugins: Option<&PluginRegistry>,
) -> Result<ResolvedRule, LookupError> {
    resolve_definition(rule_id, plugins).map(|(resolved, _)| resolved)
}

/// Resolves `rule_id` and returns the matched definition alongside it.
pub(crate) fn resolve_definition<'a>(
    rule_id: &str,
    plugins: Option<&'a PluginRegistry>,
) -> Result<(ResolvedRule, &'a Arc<RuleDefinition>), LookupError> {
    if rule_id.is_empty() {
        return Err(LookupError::new(
            LookupErrorKind::NotInAnyPlugin,
            "Rule identifier must be a non-empty string.",
        ));
    }
    let Some(plugins) = plugins else {
        return Err(LookupError::new(
            LookupErrorKind::NotInAnyPlugin,
            format!("Could not find \"{rule_id}\": no plugins are registered."),
        ));
    };

    match rule_id.matches('/').count() {
        0 => plugins
            .rule(BUILTIN_PLUGIN_NAME, rule_id)
            .map(|rule| (ResolvedRule::new(BUILTIN_PLUGIN_NAME, rule_id), rule))
            .ok_or_else(|| {
                LookupError::new(
                    LookupErrorKind::NoBuiltIn,
                    format!("Could not find \"{rule_id}\" in the built-in rules."),
                )
            }),
        1 => {
            let (plugin_name, rule_name) = rule_id.split_once('/').unwrap_or((rule_id, ""));
            if let Some(rule) = lookup(plugins, plugin_name, rule_name) {
                return Ok((ResolvedRule::new(plugin_name, rule_name), rule));
            }
            let message = if plugins.get(plugin_name).is_some() {
                format!("Could not find \"{rule_name}\" in plugin \"{plugin_name}\".")
            } else {
                format!("Could not find plugin \"{plugin_name}\".")
            };
            Err(LookupError::new(
                LookupErrorKind::NotInSpecifiedPlugin,
                message,
            ))
        }
        _ => rule_id_splits(rule_id)
            .find_map(|(plugin_name, rule_name)| {
                lookup(plugins, plugin_name, rule_name)
                    .map(|rule| (ResolvedRule::new(plugin_name, rule_name), rule))
            })
            .ok_or_else(|| {
                LookupError::new(
                    LookupErrorKind::NotInAnyPlugin,
                    format!("Could not find a plugin that provides \"{rule_id}\"."),
                )
            }),
    }
}

fn lookup<'a>(
    plugins: &'a PluginRegistry,
    plugin_name: &str,
    rule_name: &str,
) -> Option<&'a Arc<RuleDefinition>> {
    if plugin_name.is_empty() || rule_name.is_empty() {
        return None;
    }
    plugins.rule(plugin_name, rule_name)
}

/// Rules in any plugin whose name matches a suffix of `rule_id`.
///
/// Built by [`search_partial_matches`]. Each call to [`iter`](Self::iter)
/// starts a fresh search. Candidates are not deduplicated.
#[derive(Debug, Clone, Copy)]
pub struct PartialMatches<'a> {
    rule_id: &'a str,
    plugins: &'a PluginRegistry,
}

impl<'a> PartialMatches<'a> {
    /// Iterates `"<plugin>/<suffix>"` candidates.
    ///
    /// The whole identifier is tried first, then the remainder after each
    /// slash from left to right; within one suffix, plugins are visited in
    /// registration order.
    pub fn iter(&self) -> impl Iterator<Item = String> + 'a {
        let plugins = self.plugins;
        std::iter::once(self.rule_id)
            .chain(rule_id_splits(self.rule_id).map(|(_, suffix)| suffix))
            .filter(|suffix| !suffix.is_empty())
            .flat_map(move |suffix| {
                plugins
                    .iter()
                    .filter(move |(_, plugin)| plugin.rule(suffix).is_some())
                    .map(move |(plugin_name, _)| format!("{plugin_name}/{suffix}"))
            })
    }

    /// Returns true if no plugin has a matching rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'a> IntoIterator for &PartialMatches<'a> {
    type Item = String;
    type IntoIter = Box<dyn Iterator<Item = String> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Searches every plugin for rules matching a suffix of `rule_id`.
#[must_use]
pub fn search_partial_matches<'a>(
    rule_id: &'a str,
    plugins: &'a PluginRegistry,
) -> PartialMatches<'a> {
    PartialMatches { rule_id, plugins }
}
