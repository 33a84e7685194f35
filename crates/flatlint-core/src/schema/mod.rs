//! Rule options schemas.
//!
//! ```text
//! RuleDefinition
//!   ↓ options::get_rule_options_schema()
//! canonical schema (always describes the options array)
//!   ↓ compiler::SchemaCompiler::compile()
//! OptionsValidator
//! ```

pub mod compiler;
pub mod options;

pub use compiler::{
    CompiledSchema, JsonSchemaEngine, OptionsValidator, SchemaCompileError, SchemaCompiler,
    SchemaEngine, SchemaViolation,
};
pub use options::{get_rule_options_schema, top_level_accepts_only_arrays};
