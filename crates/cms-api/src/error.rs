//! # API Error Types
//!
//! The single place where handler failures become HTTP responses. Two
//! envelopes exist:
//!
//! - `400 {"validationErrors": [...]}` when a payload fails its schema.
//! - `500 {"message": "..."}` for everything else, carrying the cause text.
//!
//! Not-found and malformed requests deliberately share the 500 envelope.
//! Every error is logged with its operation, type and id before the
//! response is written.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cms_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `{"message": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// `{"validationErrors": ["..."]}`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationBody {
    pub validation_errors: Vec<String>,
}

/// Where an error happened, for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Handler operation (`list`, `get`, `create`, `update`, `delete`).
    pub operation: &'static str,
    pub type_name: String,
    pub id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: &'static str, type_name: impl Into<String>) -> Self {
        Self {
            operation,
            type_name: type_name.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Payload failed schema validation.
    pub fn invalid(&self, errors: Vec<String>) -> AppError {
        AppError::Validation {
            context: self.clone(),
            errors,
        }
    }

    /// Request could not be turned into an object or id.
    pub fn malformed(&self, reason: impl ToString) -> AppError {
        AppError::MalformedRequest {
            context: self.clone(),
            reason: reason.to_string(),
        }
    }

    /// Storage provider call failed.
    pub fn storage(&self, source: StoreError) -> AppError {
        AppError::Storage {
            context: self.clone(),
            source,
        }
    }
}

/// Handler failure.
#[derive(Error, Debug)]
pub enum AppError {
    /// Payload does not conform to its type's schema (400).
    #[error("payload failed schema validation: {}", .errors.join("; "))]
    Validation {
        context: ErrorContext,
        errors: Vec<String>,
    },

    /// Body unreadable or not JSON, body not an object, or id not a
    /// string/integer (500).
    #[error("{reason}")]
    MalformedRequest {
        context: ErrorContext,
        reason: String,
    },

    /// The storage provider failed, including not-found (500).
    #[error("{source}")]
    Storage {
        context: ErrorContext,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::MalformedRequest { .. } | Self::Storage { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Validation { context, .. }
            | Self::MalformedRequest { context, .. }
            | Self::Storage { context, .. } => context,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let ctx = self.context();
        let id = ctx.id.as_deref().unwrap_or("-");

        match self {
            Self::Validation { ref errors, .. } => {
                tracing::warn!(
                    operation = ctx.operation,
                    type_name = %ctx.type_name,
                    id,
                    violations = errors.len(),
                    error = %self,
                    "payload rejected"
                );
            }
            _ => {
                tracing::error!(
                    operation = ctx.operation,
                    type_name = %ctx.type_name,
                    id,
                    error = %self,
                    "request failed"
                );
            }
        }

        match self {
            Self::Validation { errors, .. } => (
                status,
                Json(ValidationBody {
                    validation_errors: errors,
                }),
            )
                .into_response(),
            other => (
                status,
                Json(MessageBody {
                    message: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
