//! Shared output formatting for check results.

use anyhow::Result;
use serde::Serialize;

use crate::OutputFormat;

/// Outcome of validating one configuration.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Configuration file, if one was found.
    pub config: Option<String>,
    /// Number of configured rules.
    pub rules: usize,
    /// Number of rules with a non-zero severity.
    pub enabled: usize,
    /// The first validation failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckReport {
    /// Whether the configuration is valid.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Print a check report in the specified format.
///
/// Text output only covers success; failures are rendered as diagnostics.
pub fn print(report: &CheckReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
    }
    Ok(())
}

fn print_text(report: &CheckReport) {
    let source = report.config.as_deref().unwrap_or("<defaults>");
    println!(
        "\x1b[32mok\x1b[0m {source}: {} rule(s) configured, {} enabled",
        report.rules, report.enabled
    );
}

fn print_json(report: &CheckReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_omitted_when_ok() {
        let report = CheckReport {
            config: None,
            rules: 2,
            enabled: 1,
            error: None,
        };
        assert!(report.is_ok());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["rules"], 2);
    }
}
