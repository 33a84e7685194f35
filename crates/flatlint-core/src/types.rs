//! Core configuration types consumed by the validator.

use crate::plugin::{Plugin, PluginRegistry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::sync::Arc;

/// Severity level of a configured rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rule disabled.
    Off,
    /// Violations are reported as warnings.
    Warn,
    /// Violations are reported as errors.
    Error,
}

impl Severity {
    /// Returns the numeric form (`0`, `1` or `2`).
    #[must_use]
    pub fn as_number(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Warn => 1,
            Self::Error => 2,
        }
    }

    /// Parses a numeric or string severity.
    ///
    /// Accepts `0`/`1`/`2` and `"off"`/`"warn"`/`"error"` (case-insensitive).
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => match numeric_level(n)? {
                0 => Some(Self::Off),
                1 => Some(Self::Warn),
                _ => Some(Self::Error),
            },
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "off" => Some(Self::Off),
                "warn" => Some(Self::Warn),
                "error" => Some(Self::Error),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Maps a number equal to `0`, `1` or `2` to that level, whether it is
/// stored as an integer or a float.
pub(crate) fn numeric_level(n: &Number) -> Option<u8> {
    let value = n.as_f64()?;
    (0u8..=2).find(|level| (value - f64::from(*level)).abs() < f64::EPSILON)
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A rule's configured value: severity first, then the rule's own options.
pub type RuleOptions = Vec<Value>;

/// The merged configuration the validator consumes.
///
/// Severities are expected in numeric form; [`crate::Config`] normalizes
/// string severities before producing one of these.
#[derive(Debug, Clone, Default)]
pub struct FlatConfig {
    /// Configured rules in insertion order.
    pub rules: IndexMap<String, RuleOptions>,
    /// Registered plugins.
    pub plugins: Option<PluginRegistry>,
}

impl FlatConfig {
    /// Creates an empty configuration with no plugin registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin, creating the registry on first use.
    #[must_use]
    pub fn with_plugin(mut self, name: impl Into<String>, plugin: Arc<Plugin>) -> Self {
        self.plugins
            .get_or_insert_with(PluginRegistry::new)
            .register(name, plugin);
        self
    }

    /// Configures a rule.
    #[must_use]
    pub fn with_rule(mut self, rule_id: impl Into<String>, options: RuleOptions) -> Self {
        self.rules.insert(rule_id.into(), options);
        self
    }

    /// Returns the rule's severity, if its first option is a valid one.
    #[must_use]
    pub fn severity(&self, rule_id: &str) -> Option<Severity> {
        self.rules
            .get(rule_id)
            .and_then(|options| options.first())
            .and_then(Severity::from_value)
    }
}
