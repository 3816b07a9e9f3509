//! # Storage Errors

use thiserror::Error;

/// Failures surfaced by storage providers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The id cannot be written (e.g. the empty string).
    #[error("{source}")]
    InvalidId {
        /// Owning type.
        type_name: String,
        #[source]
        source: cms_core::CoreError,
    },

    /// No object with this id is stored under the type.
    #[error("no object with id {id} found in storage")]
    NotFound {
        /// Owning type.
        type_name: String,
        /// Requested id.
        id: String,
    },

    /// A stored document could not be encoded or decoded.
    #[error("serialization error for {key}: {reason}")]
    Serialization {
        /// Storage key of the document.
        key: String,
        /// Underlying serde error text.
        reason: String,
    },

    /// The backend rejected or failed the call (I/O, auth, network).
    #[error("{operation} {key} failed: {reason}")]
    Backend {
        /// Backend operation name (`read`, `write`, `remove`, `list`).
        operation: &'static str,
        /// Key or prefix the call targeted.
        key: String,
        /// Underlying cause text.
        reason: String,
    },
}

impl StoreError {
    /// Whether this error means the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[cfg_attr(not(feature = "s3"), allow(dead_code))]
    pub(crate) fn backend(
        operation: &'static str,
        key: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Backend {
            operation,
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Refuse ids that cannot be written, identically for every backend.
    pub(crate) fn check_id(type_name: &str, id: &str) -> StoreResult<()> {
        cms_core::check_id(id).map_err(|source| Self::InvalidId {
            type_name: type_name.to_string(),
            source,
        })
    }
}

/// Convenience alias for storage results.
pub type StoreResult<T> = Result<T, StoreError>;
