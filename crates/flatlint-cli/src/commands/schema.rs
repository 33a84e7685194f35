//! Schema command implementation.

use anyhow::{Context, Result};
use flatlint_core::{get_rule_options_schema, resolve_rule_id};
use std::sync::Arc;

use crate::config_resolver::ConfigSource;

/// Runs the schema command.
///
/// Prints `null` for rules whose options are not validated.
pub fn run(source: &ConfigSource, rule_id: &str) -> Result<()> {
    let config = super::load(source)?;
    let plugins = config.plugins.as_ref();

    let resolved = resolve_rule_id(rule_id, plugins)?;
    let rule = plugins.and_then(|p| p.rule(&resolved.plugin_name, &resolved.rule_name));
    let schema = get_rule_options_schema(rule.map(Arc::as_ref));

    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    println!("{json}");
    Ok(())
}
