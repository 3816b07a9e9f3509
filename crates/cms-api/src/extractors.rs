//! # Request Extraction
//!
//! Handlers take extractor results as `Result<_, Rejection>` and map them
//! here, so that framework rejections go through [`AppError`] like every
//! other failure instead of producing their own status codes.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::Path;
use cms_core::Object;
use serde_json::Value;

use crate::error::{AppError, ErrorContext};
use crate::state::TypeEntry;

/// Raw request body. Unreadable or oversized bodies are malformed requests.
pub fn extract_body(
    result: Result<Bytes, BytesRejection>,
    ctx: &ErrorContext,
) -> Result<Bytes, AppError> {
    result.map_err(|err| ctx.malformed(format!("unable to read request body: {}", err.body_text())))
}

/// The `{id}` path segment.
pub fn extract_id(
    result: Result<Path<String>, PathRejection>,
    ctx: &ErrorContext,
) -> Result<String, AppError> {
    result
        .map(|Path(id)| id)
        .map_err(|err| ctx.malformed(err.body_text()))
}

/// Parse `body`, check it against the type's schema, and return it as an
/// object.
///
/// Schema violations are reported before the object-shape check.
pub fn extract_object(
    body: &[u8],
    entry: &TypeEntry,
    ctx: &ErrorContext,
) -> Result<Object, AppError> {
    let payload = cms_schema::parse_payload(body).map_err(|e| ctx.malformed(e))?;

    let outcome = entry.schema.validate_value(&payload);
    if !outcome.valid {
        return Err(ctx.invalid(outcome.errors));
    }

    match payload {
        Value::Object(object) => Ok(object),
        other => Err(ctx.malformed(format!(
            "request body must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
