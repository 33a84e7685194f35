//! Configuration file loading for flatlint.
//!
//! ```toml
//! [plugins]
//! "@org/pkg" = "plugins/org-pkg.json"
//!
//! [rules]
//! semi = "error"
//! "@org/pkg/no-foo" = ["warn", { allow = ["bar"] }]
//! ```
//!
//! Plugin manifest paths are relative to the configuration file. Severity
//! strings are normalized to their numeric form here, before validation.

use crate::plugin::{Plugin, PluginError, PluginRegistry, BUILTIN_PLUGIN_NAME};
use crate::types::{FlatConfig, RuleOptions, Severity};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Top-level configuration for flatlint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Plugin manifests keyed by registry name.
    #[serde(default)]
    pub plugins: IndexMap<String, PathBuf>,

    /// Rule entries: a severity, or a severity followed by options.
    #[serde(default)]
    pub rules: IndexMap<String, toml::Value>,
}

impl Config {
    /// Creates a new empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Normalizes every rule entry into `[severity, ...options]` with a
    /// numeric severity.
    ///
    /// # Errors
    ///
    /// Returns an error for an entry with a missing or unknown severity.
    pub fn rule_options(&self) -> Result<IndexMap<String, RuleOptions>, ConfigError> {
        self.rules
            .iter()
            .map(|(rule_id, entry)| Ok((rule_id.clone(), normalize_entry(rule_id, entry)?)))
            .collect()
    }

    /// Loads plugin manifests and builds the config the validator consumes.
    ///
    /// `builtins` is registered under `"@"`. Relative manifest paths are
    /// resolved against `base_dir`; a manifest listed under several names is
    /// loaded once and shared.
    ///
    /// # Errors
    ///
    /// Returns an error if a manifest cannot be loaded, a plugin claims the
    /// built-in name, or a rule entry is malformed.
    pub fn into_flat_config(
        &self,
        base_dir: &Path,
        builtins: Arc<Plugin>,
    ) -> Result<FlatConfig, ConfigError> {
        let mut registry = PluginRegistry::new();
        registry.register(BUILTIN_PLUGIN_NAME, builtins);

        let mut loaded: HashMap<PathBuf, Arc<Plugin>> = HashMap::new();
        for (name, manifest) in &self.plugins {
            if name == BUILTIN_PLUGIN_NAME || name.is_empty() {
                return Err(ConfigError::ReservedPluginName { name: name.clone() });
            }
            let path = base_dir.join(manifest);
            let plugin = match loaded.get(&path) {
                Some(plugin) => {
                    debug!("Reusing manifest {} for plugin {}", path.display(), name);
                    Arc::clone(plugin)
                }
                None => {
                    let plugin = Arc::new(load_manifest(&path)?);
                    loaded.insert(path, Arc::clone(&plugin));
                    plugin
                }
            };
            registry.register(name.clone(), plugin);
        }

        Ok(FlatConfig {
            rules: self.rule_options()?,
            plugins: Some(registry),
        })
    }
}

fn load_manifest(path: &Path) -> Result<Plugin, ConfigError> {
    debug!("Loading plugin manifest {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Plugin::from_json(&content).map_err(|e| ConfigError::Manifest {
        path: path.to_path_buf(),
        source: e,
    })
}

fn normalize_entry(rule_id: &str, entry: &toml::Value) -> Result<RuleOptions, ConfigError> {
    let value = serde_json::to_value(entry).map_err(|e| ConfigError::Parse {
        message: format!("rules.{rule_id}: {e}"),
    })?;
    let mut options = match value {
        Value::Array(items) if !items.is_empty() => items,
        Value::Array(_) => {
            return Err(ConfigError::MissingSeverity {
                rule_id: rule_id.to_string(),
            })
        }
        other => vec![other],
    };

    let severity = Severity::from_value(&options[0]).ok_or_else(|| ConfigError::InvalidSeverity {
        rule_id: rule_id.to_string(),
        value: options[0].to_string(),
    })?;
    options[0] = Value::from(severity.as_number());
    Ok(options)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading a config or manifest file.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A plugin manifest is malformed.
    #[error("Failed to load plugin manifest {path}: {source}")]
    Manifest {
        /// Manifest path.
        path: PathBuf,
        /// Underlying manifest error.
        source: PluginError,
    },

    /// A plugin was registered under the built-in or empty name.
    #[error("Plugin name \"{name}\" is reserved")]
    ReservedPluginName {
        /// The offending name.
        name: String,
    },

    /// A rule entry is an empty array.
    #[error("Key \"rules\": Key \"{rule_id}\": expected a severity")]
    MissingSeverity {
        /// Rule identifier.
        rule_id: String,
    },

    /// A rule entry has an unknown severity.
    #[error(
        "Key \"rules\": Key \"{rule_id}\": expected severity \"off\", \"warn\", \"error\", 0, 1 or 2 but got {value}"
    )]
    InvalidSeverity {
        /// Rule identifier.
        rule_id: String,
        /// The value found.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::RuleDefinition;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.plugins.is_empty());
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[plugins]
"@org/pkg" = "plugins/org.json"

[rules]
semi = "error"
quotes = ["warn", "double", { avoidEscape = true }]
"no-console" = 0
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(
            config.plugins.get("@org/pkg"),
            Some(&PathBuf::from("plugins/org.json"))
        );

        let rules = config.rule_options().unwrap();
        let ids: Vec<&str> = rules.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["semi", "quotes", "no-console"]);
        assert_eq!(rules["semi"], vec![json!(2)]);
        assert_eq!(
            rules["quotes"],
            vec![json!(1), json!("double"), json!({ "avoidEscape": true })]
        );
        assert_eq!(rules["no-console"], vec![json!(0)]);
    }

    #[test]
    fn invalid_severity_is_rejected() {
        let config = Config::parse("[rules]\nsemi = \"fatal\"\n").unwrap();
        let err = config.rule_options().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeverity { ref rule_id, .. } if rule_id == "semi"));
    }

    #[test]
    fn float_severity_is_normalized() {
        let config = Config::parse("[rules]\nsemi = 0.0\nquotes = [2.0, \"double\"]\n").unwrap();
        let rules = config.rule_options().unwrap();
        assert_eq!(rules["semi"], vec![json!(0)]);
        assert_eq!(rules["quotes"], vec![json!(2), json!("double")]);
    }

    #[test]
    fn empty_entry_is_rejected() {
        let config = Config::parse("[rules]\nsemi = []\n").unwrap();
        assert!(matches!(
            config.rule_options().unwrap_err(),
            ConfigError::MissingSeverity { .. }
        ));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(matches!(
            Config::parse("[rules\nsemi = 2"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn manifests_are_loaded_and_shared() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("test.json"),
            r#"{ "rules": { "foo": { "schema": [] } } }"#,
        )
        .unwrap();
        let config = Config::parse(
            r#"
[plugins]
test = "test.json"
alias = "test.json"

[rules]
"test/foo" = 2
"#,
        )
        .unwrap();

        let builtins = Arc::new(Plugin::new().with_rule("semi", RuleDefinition::function()));
        let flat = config.into_flat_config(tmp.path(), builtins).unwrap();
        let plugins = flat.plugins.unwrap();

        assert_eq!(plugins.len(), 3);
        assert!(plugins.rule("@", "semi").is_some());
        let a = plugins.rule("test", "foo").unwrap();
        let b = plugins.rule("alias", "foo").unwrap();
        assert_eq!(a.key(), b.key());
        assert_eq!(flat.rules["test/foo"], vec![json!(2)]);
    }

    #[test]
    fn builtin_name_is_reserved() {
        let config = Config::parse("[plugins]\n\"@\" = \"x.json\"\n").unwrap();
        let err = config
            .into_flat_config(Path::new("."), Arc::new(Plugin::new()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReservedPluginName { .. }));
    }

    #[test]
    fn missing_manifest_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let config = Config::parse("[plugins]\ntest = \"missing.json\"\n").unwrap();
        let err = config
            .into_flat_config(tmp.path(), Arc::new(Plugin::new()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_manifest_is_reported() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("bad.json"), "{ not json").unwrap();
        let config = Config::parse("[plugins]\nbad = \"bad.json\"\n").unwrap();
        let err = config
            .into_flat_config(tmp.path(), Arc::new(Plugin::new()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Manifest { .. }));
    }
}
