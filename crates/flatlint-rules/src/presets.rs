//! Rule presets for starter configurations.

use serde_json::{json, Value};

/// Preset configurations for flatlint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    Recommended,
    /// Strict rules for maximum consistency.
    Strict,
    /// Minimal rules for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rule entries for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<(&'static str, Vec<Value>)> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `no-debugger` and `no-var` as errors
/// - `no-unused-vars` with `after-used` arguments
/// - `eqeqeq` allowing `== null`
#[must_use]
pub fn recommended_rules() -> Vec<(&'static str, Vec<Value>)> {
    vec![
        ("no-debugger", vec![json!("error")]),
        ("no-var", vec![json!("error")]),
        (
            "no-unused-vars",
            vec![json!("warn"), json!({ "args": "after-used" })],
        ),
        (
            "eqeqeq",
            vec![json!("error"), json!("always"), json!({ "null": "ignore" })],
        ),
    ]
}

/// Returns the strict set of rules.
///
/// Includes all recommended rules as errors plus style rules.
#[must_use]
pub fn strict_rules() -> Vec<(&'static str, Vec<Value>)> {
    vec![
        ("no-debugger", vec![json!("error")]),
        ("no-var", vec![json!("error")]),
        ("no-console", vec![json!("error")]),
        (
            "no-unused-vars",
            vec![json!("error"), json!({ "args": "all" })],
        ),
        ("eqeqeq", vec![json!("error"), json!("always")]),
        ("prefer-const", vec![json!("error")]),
        ("semi", vec![json!("error"), json!("always")]),
        ("quotes", vec![json!("error"), json!("single")]),
        ("max-len", vec![json!("warn"), json!(100)]),
    ]
}

/// Returns the minimal set of rules.
#[must_use]
pub fn minimal_rules() -> Vec<(&'static str, Vec<Value>)> {
    vec![("no-debugger", vec![json!("warn")])]
}
