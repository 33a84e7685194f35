//! List rules command implementation.

use anyhow::Result;
use flatlint_core::{get_rule_options_schema, RuleDefinition, BUILTIN_PLUGIN_NAME};

use crate::config_resolver::ConfigSource;

/// Runs the list-rules command.
pub fn run(source: &ConfigSource) -> Result<()> {
    let config = super::load(source)?;
    let Some(plugins) = config.plugins.as_ref() else {
        return Ok(());
    };

    println!("{:<36} {:<10} Description", "Rule", "Options");
    println!("{}", "-".repeat(80));

    for (plugin_name, plugin) in plugins.iter() {
        for (rule_name, rule) in plugin.rules() {
            let id = if plugin_name == BUILTIN_PLUGIN_NAME {
                rule_name.to_string()
            } else {
                format!("{plugin_name}/{rule_name}")
            };
            println!(
                "{:<36} {:<10} {}",
                id,
                options_label(rule),
                describe(rule)
            );
        }
    }

    println!("\nPresets:");
    println!("  recommended  - no-debugger, no-var, no-unused-vars, eqeqeq (default)");
    println!("  strict       - recommended plus style rules, all as errors");
    println!("  minimal      - no-debugger as a warning");

    println!("\nStart from a preset with:");
    println!("  flatlint init --preset strict");
    Ok(())
}

fn options_label(rule: &RuleDefinition) -> &'static str {
    match get_rule_options_schema(Some(rule)) {
        None => "any",
        Some(schema) if schema.get("maxItems").and_then(serde_json::Value::as_u64) == Some(0) => "none",
        Some(_) => "schema",
    }
}

fn describe(rule: &RuleDefinition) -> String {
    let description = rule.description().unwrap_or("");
    match rule.meta() {
        Some(meta) if meta.deprecated && !meta.replaced_by.is_empty() => {
            format!("{description} (deprecated, use {})", meta.replaced_by.join(", "))
        }
        Some(meta) if meta.deprecated => format!("{description} (deprecated)"),
        _ => description.to_string(),
    }
}
