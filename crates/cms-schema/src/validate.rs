//! # Schema Validation
//!
//! Violations are rendered as `"<context>: <description>"`. The context is
//! `(root)` for the document itself and the dotted field path otherwise
//! (`address.street`, `tags.0`). A missing required property reads
//! `"(root): name is required"`; every other violation uses the engine's own
//! description.

use std::fmt;

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Retrieve, Uri, ValidationError, Validator};
use serde_json::Value;

use crate::error::SchemaError;

/// Result of validating one payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationOutcome {
    /// Whether the payload conforms.
    pub valid: bool,
    /// One message per violation, in engine report order. Empty when valid.
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Refuses every external `$ref`.
///
/// Type schemas are self-contained. Draft metaschemas are bundled with the
/// engine and never reach the retriever, so anything that does would be a
/// network or filesystem fetch at request time.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema reference {} is not resolvable", uri.as_str()).into())
    }
}

/// A schema compiled once and reused for many payloads.
pub struct CompiledSchema {
    validator: Validator,
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchema").finish_non_exhaustive()
    }
}

impl CompiledSchema {
    /// Parse and compile a schema document.
    pub fn compile(schema: &str) -> Result<Self, SchemaError> {
        let document: Value = serde_json::from_str(schema)
            .map_err(|e| SchemaError::InvalidSchemaDocument(e.to_string()))?;
        Self::from_value(&document)
    }

    /// Compile an already-parsed schema document.
    pub fn from_value(document: &Value) -> Result<Self, SchemaError> {
        if !matches!(document, Value::Object(_) | Value::Bool(_)) {
            return Err(SchemaError::InvalidSchemaDocument(
                "a schema must be a JSON object or boolean".to_string(),
            ));
        }

        let mut opts = jsonschema::options();
        opts.with_retriever(OfflineRetriever);
        let validator = opts
            .build(document)
            .map_err(|e| SchemaError::CompileFailed(e.to_string()))?;

        Ok(Self { validator })
    }

    /// Validate a parsed payload.
    pub fn validate_value(&self, instance: &Value) -> ValidationOutcome {
        let errors = self
            .validator
            .iter_errors(instance)
            .map(|e| render(&e))
            .collect();
        ValidationOutcome::from_errors(errors)
    }

    /// Parse a raw payload and validate it.
    pub fn validate_bytes(&self, payload: &[u8]) -> Result<ValidationOutcome, SchemaError> {
        let instance = parse_payload(payload)?;
        Ok(self.validate_value(&instance))
    }

    /// Parse a textual payload and validate it.
    pub fn validate_str(&self, payload: &str) -> Result<ValidationOutcome, SchemaError> {
        self.validate_bytes(payload.as_bytes())
    }
}

/// Compile `schema` and validate `payload` against it.
pub fn validate(schema: &str, payload: &str) -> Result<ValidationOutcome, SchemaError> {
    CompiledSchema::compile(schema)?.validate_str(payload)
}

/// Parse raw payload bytes as JSON.
pub fn parse_payload(payload: &[u8]) -> Result<Value, SchemaError> {
    serde_json::from_slice(payload).map_err(|e| SchemaError::InvalidPayload(e.to_string()))
}

fn render(error: &ValidationError<'_>) -> String {
    let context = context_of(&error.instance_path.to_string());
    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = match property {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("{context}: {name} is required")
        }
        _ => format!("{context}: {error}"),
    }
}

/// Turn a JSON pointer (`/address/street`) into a dotted context.
fn context_of(pointer: &str) -> String {
    if pointer.is_empty() || pointer == "/" {
        return "(root)".to_string();
    }
    pointer
        .trim_start_matches('/')
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}
