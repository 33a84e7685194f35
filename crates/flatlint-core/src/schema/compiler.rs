//! Schema compilation.
//!
//! A [`SchemaCompiler`] turns an options schema into an [`OptionsValidator`].
//! Compilation never fails from the caller's point of view: a schema the
//! engine rejects produces a validator that accepts everything, and the
//! failure is logged for the rule author.

use jsonschema::{Draft, Retrieve, Uri};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// The engine rejected a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid options schema: {reason}")]
pub struct SchemaCompileError {
    /// Engine-provided reason.
    pub reason: String,
}

impl SchemaCompileError {
    /// Creates a compile error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// One failed check reported by a compiled schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer to the offending value (empty for the root).
    pub path: String,
    /// Engine message.
    pub message: String,
}

impl SchemaViolation {
    /// Creates a violation.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{path} {}.", self.message.trim_end_matches('.'))
    }
}

/// A schema that has been compiled by a [`SchemaEngine`].
pub trait CompiledSchema: Send + Sync {
    /// Validates `instance`, returning every violation found.
    fn validate(&self, instance: &Value) -> Vec<SchemaViolation>;
}

/// A JSON-Schema implementation.
pub trait SchemaEngine {
    /// Compiles `schema`.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema is malformed.
    fn compile(&self, schema: &Value) -> Result<Arc<dyn CompiledSchema>, SchemaCompileError>;
}

// ────────────────────────────────────────────
// jsonschema-backed engine
// ────────────────────────────────────────────

/// [`SchemaEngine`] backed by the `jsonschema` crate.
///
/// Rule schemas are written against draft-04 (positional `items` arrays),
/// which is the default draft. External `$ref`s are never fetched; a schema
/// that needs one fails to compile.
#[derive(Debug, Clone, Copy)]
pub struct JsonSchemaEngine {
    draft: Draft,
}

impl JsonSchemaEngine {
    /// Creates an engine for the given draft.
    #[must_use]
    pub fn new(draft: Draft) -> Self {
        Self { draft }
    }
}

impl Default for JsonSchemaEngine {
    fn default() -> Self {
        Self::new(Draft::Draft4)
    }
}

impl SchemaEngine for JsonSchemaEngine {
    fn compile(&self, schema: &Value) -> Result<Arc<dyn CompiledSchema>, SchemaCompileError> {
        let mut opts = jsonschema::options();
        opts.with_draft(self.draft);
        opts.with_retriever(OfflineRetriever);

        let validator = opts
            .build(schema)
            .map_err(|e| SchemaCompileError::new(e.to_string()))?;
        Ok(Arc::new(JsonSchemaValidator(validator)))
    }
}

struct JsonSchemaValidator(jsonschema::Validator);

impl CompiledSchema for JsonSchemaValidator {
    fn validate(&self, instance: &Value) -> Vec<SchemaViolation> {
        self.0
            .iter_errors(instance)
            .map(|e| SchemaViolation::new(e.instance_path.to_string(), e.to_string()))
            .collect()
    }
}

/// Refuses every external `$ref`.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema references are not supported: {}", uri.as_str()).into())
    }
}

// ────────────────────────────────────────────
// Compiler
// ────────────────────────────────────────────

/// A compiled options validator.
#[derive(Clone)]
pub enum OptionsValidator {
    /// Accepts every value; produced when the schema failed to compile.
    AcceptAll,
    /// Delegates to a compiled schema.
    Compiled(Arc<dyn CompiledSchema>),
}

impl OptionsValidator {
    /// Validates `options`, returning `"<path> <message>."` for each failure.
    #[must_use]
    pub fn validate(&self, options: &Value) -> Vec<String> {
        match self {
            Self::AcceptAll => Vec::new(),
            Self::Compiled(schema) => schema
                .validate(options)
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Returns true for the accept-everything fallback.
    #[must_use]
    pub fn accepts_all(&self) -> bool {
        matches!(self, Self::AcceptAll)
    }
}

impl fmt::Debug for OptionsValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AcceptAll => f.write_str("AcceptAll"),
            Self::Compiled(_) => f.write_str("Compiled(..)"),
        }
    }
}

/// Compiles schemas through a [`SchemaEngine`], caching successes.
///
/// The cache is keyed by the schema's JSON text and belongs to this compiler
/// alone.
pub struct SchemaCompiler<E = JsonSchemaEngine> {
    engine: E,
    compiled: HashMap<String, Arc<dyn CompiledSchema>>,
}

impl SchemaCompiler {
    /// Creates a compiler using the default `jsonschema` engine.
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(JsonSchemaEngine::default())
    }
}

impl Default for SchemaCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SchemaEngine> SchemaCompiler<E> {
    /// Creates a compiler using `engine`.
    #[must_use]
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            compiled: HashMap::new(),
        }
    }

    /// Returns the underlying engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Compiles `schema`, falling back to [`OptionsValidator::AcceptAll`].
    pub fn compile(&mut self, schema: &Value) -> OptionsValidator {
        let key = cache_key(schema);
        if let Some(compiled) = self.compiled.get(&key) {
            debug!("options schema served from compiler cache");
            return OptionsValidator::Compiled(Arc::clone(compiled));
        }

        match self.engine.compile(schema) {
            Ok(compiled) => {
                self.compiled.insert(key, Arc::clone(&compiled));
                OptionsValidator::Compiled(compiled)
            }
            Err(e) => {
                warn!(error = %e, "options schema failed to compile; all options will be accepted");
                OptionsValidator::AcceptAll
            }
        }
    }

    /// Drops `schema` from the cache. Returns true if it was cached.
    pub fn evict(&mut self, schema: &Value) -> bool {
        self.compiled.remove(&cache_key(schema)).is_some()
    }

    /// Returns the number of cached schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

fn cache_key(schema: &Value) -> String {
    schema.to_string()
}
