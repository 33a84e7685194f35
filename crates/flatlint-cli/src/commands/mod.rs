//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_rules;
pub mod output;
pub mod resolve;
pub mod schema;

use anyhow::{Context, Result};
use flatlint_core::FlatConfig;
use flatlint_rules::builtin_plugin;
use std::sync::Arc;

use crate::config_resolver::ConfigSource;

/// Loads the resolved configuration with the built-in plugin registered.
pub fn load(source: &ConfigSource) -> Result<FlatConfig> {
    if let ConfigSource::Global(_) = source {
        tracing::info!("Using global config: {}", source.label());
    }
    let config = source
        .load()
        .with_context(|| format!("Failed to load config: {}", source.label()))?;

    config
        .into_flat_config(source.manifest_dir(), Arc::new(builtin_plugin()))
        .with_context(|| format!("Failed to load plugins for {}", source.label()))
}
