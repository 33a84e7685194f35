//! Resolve command implementation.

use anyhow::Result;
use flatlint_core::{explain_lookup_failure, resolve_rule_id};

use crate::config_resolver::ConfigSource;

/// Runs the resolve command.
pub fn run(source: &ConfigSource, rule_id: &str) -> Result<()> {
    let config = super::load(source)?;
    let plugins = config.plugins.as_ref();

    match resolve_rule_id(rule_id, plugins) {
        Ok(resolved) => {
            println!("plugin: {}", resolved.plugin_name);
            println!("rule:   {}", resolved.rule_name);
            Ok(())
        }
        Err(err) => {
            let err = explain_lookup_failure(rule_id, err, plugins);
            eprintln!("\x1b[31merror[{}]\x1b[0m: {}", err.code(), err.message());
            std::process::exit(1);
        }
    }
}
