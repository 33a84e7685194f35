//! flatlint CLI tool.
//!
//! Usage:
//! ```bash
//! flatlint check [OPTIONS] [PATH]
//! flatlint resolve <RULE_ID>
//! flatlint schema <RULE_ID>
//! flatlint list-rules
//! flatlint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Validates rule identifiers and options in flat lint configurations
#[derive(Parser)]
#[command(name = "flatlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "FLATLINT_CONFIG")]
    config: Option<PathBuf>,

    /// Project directory used to find the configuration
    #[arg(short, long, global = true, default_value = ".")]
    project: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every configured rule
    Check {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Resolve a rule identifier to its plugin and rule name
    Resolve {
        /// Rule identifier, e.g. `semi` or `@org/pkg/no-foo`
        rule_id: String,
    },

    /// Print the normalized options schema of a rule
    Schema {
        /// Rule identifier
        rule_id: String,
    },

    /// List rules of every registered plugin
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,

        /// Preset to start from
        #[arg(long, default_value = "recommended")]
        preset: PresetName,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

/// Preset selection for `init`.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PresetName {
    /// Recommended rules.
    Recommended,
    /// Recommended rules plus style rules, all as errors.
    Strict,
    /// A single warning for gradual adoption.
    Minimal,
}

impl From<PresetName> for flatlint_rules::Preset {
    fn from(name: PresetName) -> Self {
        match name {
            PresetName::Recommended => Self::Recommended,
            PresetName::Strict => Self::Strict,
            PresetName::Minimal => Self::Minimal,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let source = config_resolver::resolve(&cli.project, cli.config.as_deref());

    match cli.command {
        Commands::Check { format } => commands::check::run(&source, format),
        Commands::Resolve { rule_id } => commands::resolve::run(&source, &rule_id),
        Commands::Schema { rule_id } => commands::schema::run(&source, &rule_id),
        Commands::ListRules => commands::list_rules::run(&source),
        Commands::Init { force, preset } => commands::init::run(&cli.project, force, preset.into()),
    }
}
