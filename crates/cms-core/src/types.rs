//! # Content Types and Objects
//!
//! A content type is declared once at startup and never changes. Objects are
//! plain JSON maps; the only field the server itself interprets is the id
//! field named by the object's type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// A free-form JSON object stored under a content type.
pub type Object = serde_json::Map<String, Value>;

/// Type names that would collide with fixed API routes.
pub const RESERVED_TYPE_NAMES: &[&str] = &["describe"];

/// A declared content type.
///
/// The schema is kept as the raw text from configuration. It is echoed back
/// verbatim by the describe endpoint and compiled separately by `cms-schema`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    name: String,
    #[serde(rename = "id")]
    id_field: String,
    schema: String,
}

impl TypeDef {
    /// Declare a type. Validation of the name and id field is done by
    /// [`TypeDef::check`] and by the registry at construction.
    pub fn new(
        name: impl Into<String>,
        id_field: impl Into<String>,
        schema: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id_field: id_field.into(),
            schema: schema.into(),
        }
    }

    /// The type name. Also the URL path segment under `/api/`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The object field holding each object's identity.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// The JSON Schema document text.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Check that the declaration can be routed and keyed.
    ///
    /// Names must be non-empty and use only ASCII alphanumerics, `-`, `_`
    /// and `.`, since they become both a URL segment and a storage key prefix.
    pub fn check(&self) -> CoreResult<()> {
        let invalid = |reason: &str| CoreError::InvalidTypeDef {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(invalid(
                "name may only contain ASCII letters, digits, '-', '_' and '.'",
            ));
        }
        if self.name == "." || self.name == ".." {
            return Err(invalid("name must not be a path component"));
        }
        if RESERVED_TYPE_NAMES.contains(&self.name.as_str()) {
            return Err(invalid("name is reserved"));
        }
        if self.id_field.is_empty() {
            return Err(invalid("id field must not be empty"));
        }
        Ok(())
    }

    /// Derive the id of `object` under this type.
    pub fn object_id(&self, object: &Object) -> CoreResult<String> {
        object_id(object, &self.id_field)
    }
}

/// Derive the storage id of an object.
///
/// A string id is used as is. An integer id is rendered in decimal, so
/// `{"id": 7}` and `{"id": "7"}` address the same slot. Anything else,
/// including a missing field, is rejected.
pub fn object_id(object: &Object, id_field: &str) -> CoreResult<String> {
    match object.get(id_field) {
        Some(Value::String(s)) => {
            check_id(s)?;
            Ok(s.clone())
        }
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_string())
            } else {
                Err(CoreError::InvalidId(n.to_string()))
            }
        }
        Some(other) => Err(CoreError::InvalidId(other.to_string())),
        None => Err(CoreError::InvalidId("<missing>".to_string())),
    }
}

/// Reject ids that cannot address a distinct storage slot.
///
/// The empty string is refused: `{type}/` is the namespace prefix of the
/// bucket layout, not an object key.
pub fn check_id(id: &str) -> CoreResult<()> {
    if id.is_empty() {
        return Err(CoreError::InvalidId("\"\"".to_string()));
    }
    Ok(())
}

/// An object together with its id and owning type, as handed to storage
/// providers for seeding.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The owning type name.
    pub type_name: String,
    /// The derived id.
    pub id: String,
    /// The object body.
    pub data: Object,
}
