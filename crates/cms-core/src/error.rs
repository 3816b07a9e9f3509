//! # Error Types
//!
//! Errors raised while declaring types and deriving object ids. Storage,
//! schema, and HTTP errors live in their own crates and wrap these where
//! needed.

use thiserror::Error;

/// Errors from the core type layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A type declaration is unusable (empty name, bad characters, empty id field).
    #[error("invalid type definition {name:?}: {reason}")]
    InvalidTypeDef {
        /// The declared name as written in configuration.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Two declarations share a name.
    #[error("duplicate type name {0:?}")]
    DuplicateType(String),

    /// The id field of an object is missing or is neither a string nor an integer.
    #[error("invalid id type: {0}")]
    InvalidId(String),
}

/// Convenience alias for core results.
pub type CoreResult<T> = Result<T, CoreError>;
