use thiserror::Error;

/// Inputs that cannot be validated at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The schema text is not a JSON object or boolean.
    #[error("malformed schema document: {0}")]
    InvalidSchemaDocument(String),

    /// The schema parsed as JSON but the engine could not compile it.
    #[error("schema compilation failed: {0}")]
    CompileFailed(String),

    /// The payload is not well-formed JSON.
    #[error("malformed payload: {0}")]
    InvalidPayload(String),
}
