//! Init command implementation.

use anyhow::{bail, Context, Result};
use flatlint_rules::Preset;
use std::path::Path;

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const HEADER: &str = r#"# flatlint configuration
#
# Plugins map a registry name to a JSON manifest, relative to this file:
#
# [plugins]
# "@org/pkg" = "plugins/org-pkg.json"
#
# Rules take a severity ("off", "warn", "error" or 0-2), optionally
# followed by options:
#
# semi = ["error", "always"]
# "@org/pkg/no-foo" = "warn"

"#;

/// Runs the init command.
pub fn run(project: &Path, force: bool, preset: Preset) -> Result<()> {
    let config_path = project.join(PROJECT_CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, render(preset)?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to configure rules", PROJECT_CONFIG_NAMES[0]);
    println!("  2. Run: flatlint check");

    Ok(())
}

/// Renders the starter configuration for `preset`.
fn render(preset: Preset) -> Result<String> {
    let rules: toml::Table = preset
        .rules()
        .into_iter()
        .map(|(rule_id, options)| {
            let value = match options.as_slice() {
                [severity] => toml::Value::try_from(severity),
                _ => toml::Value::try_from(&options),
            };
            value.map(|v| (rule_id.to_string(), v))
        })
        .collect::<Result<_, _>>()
        .context("Failed to render preset")?;

    let mut document = toml::Table::new();
    document.insert("rules".to_string(), toml::Value::Table(rules));
    Ok(format!("{HEADER}{}", toml::to_string(&document)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatlint_core::{Config, RuleValidator};
    use flatlint_rules::builtin_plugin;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn rendered_presets_load_and_validate() {
        for preset in [Preset::Recommended, Preset::Strict, Preset::Minimal] {
            let config = Config::parse(&render(preset).unwrap()).unwrap();
            assert_eq!(config.rules.len(), preset.rules().len());

            let flat = config
                .into_flat_config(Path::new("."), Arc::new(builtin_plugin()))
                .unwrap();
            RuleValidator::new().validate(&flat).unwrap();
        }
    }

    #[test]
    fn single_severity_is_written_bare() {
        let rendered = render(Preset::Minimal).unwrap();
        assert!(rendered.contains("no-debugger = \"warn\""));
    }

    #[test]
    fn existing_config_is_kept_without_force() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("flatlint.toml"), "# mine\n").unwrap();

        assert!(run(tmp.path(), false, Preset::Minimal).is_err());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("flatlint.toml")).unwrap(),
            "# mine\n"
        );

        run(tmp.path(), true, Preset::Minimal).unwrap();
        let config = Config::from_file(&tmp.path().join("flatlint.toml")).unwrap();
        assert!(config.rules.contains_key("no-debugger"));
    }
}
