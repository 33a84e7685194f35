//! Check command implementation.

use anyhow::Result;
use flatlint_core::RuleValidator;

use super::output::CheckReport;
use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(source: &ConfigSource, format: OutputFormat) -> Result<()> {
    let config = super::load(source)?;
    let enabled = config
        .rules
        .keys()
        .filter(|id| config.severity(id).is_some_and(|s| s.as_number() > 0))
        .count();

    tracing::debug!("Checking {} configured rule(s)", config.rules.len());

    let result = RuleValidator::new().validate(&config);
    let report = CheckReport {
        config: source.path().map(|p| p.display().to_string()),
        rules: config.rules.len(),
        enabled,
        error: result.as_ref().err().map(ToString::to_string),
    };

    match (result, format) {
        (Err(err), OutputFormat::Text) => eprintln!("{:?}", miette::Report::new(err)),
        _ => super::output::print(&report, format)?,
    }

    if !report.is_ok() {
        std::process::exit(1);
    }

    Ok(())
}
