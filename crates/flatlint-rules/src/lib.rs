//! # flatlint-rules
//!
//! Built-in rule definitions for flatlint.
//!
//! The built-in plugin is registered under `"@"`, so its rules are
//! configured by bare name (`semi`, `quotes`). Each rule carries the
//! options schema its configuration is validated against.
//!
//! ## Available Rules
//!
//! | Name | Options |
//! |------|---------|
//! | `camelcase` | one object |
//! | `comma-dangle` | one keyword |
//! | `eqeqeq` | `"always"` with an object, or `"smart"` |
//! | `func-call-spacing` | `"always"`/`"never"` with an object |
//! | `indent` | width or `"tab"`, then an object |
//! | `max-len` | up to two widths, then an object |
//! | `no-console` | one object |
//! | `no-debugger` | none |
//! | `no-extra-semi` | none (deprecated, use `semi`) |
//! | `no-unused-vars` | keyword or object |
//! | `no-var` | none |
//! | `no-with` | not validated |
//! | `prefer-const` | one object |
//! | `quotes` | quote style, then keyword or object |
//! | `semi` | `"always"`/`"never"` with an object |
//! | `strict` | one keyword |
//!
//! ## Usage
//!
//! ```
//! use flatlint_core::{FlatConfig, RuleValidator};
//! use flatlint_rules::builtin_plugin;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let config = FlatConfig::new()
//!     .with_plugin("@", Arc::new(builtin_plugin()))
//!     .with_rule("semi", vec![json!(2), json!("never")]);
//! RuleValidator::new().validate(&config)?;
//! # Ok::<(), flatlint_core::RuleConfigError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builtin;
mod presets;

pub use builtin::{builtin_plugin, builtin_rules};
pub use presets::{minimal_rules, recommended_rules, strict_rules, Preset};

/// Re-export core types for convenience.
pub use flatlint_core::{Plugin, RuleDefinition, Severity};
