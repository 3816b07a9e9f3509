//! # Application State
//!
//! Built once at startup from an already-validated [`TypeRegistry`] and a
//! constructed storage provider. Cloned into every handler; all clones share
//! the same types and store.

use std::path::PathBuf;
use std::sync::Arc;

use cms_core::{TypeDef, TypeRegistry};
use cms_schema::{CompiledSchema, SchemaError};
use cms_store::StorageProvider;

/// Default request body limit (2 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// A registered type with its schema compiled.
#[derive(Debug)]
pub struct TypeEntry {
    pub def: TypeDef,
    pub schema: CompiledSchema,
}

/// A type whose schema does not compile.
#[derive(Debug, thiserror::Error)]
#[error("schema for type {type_name:?} is invalid: {source}")]
pub struct InvalidSchema {
    pub type_name: String,
    #[source]
    pub source: SchemaError,
}

/// Router-level settings that are not part of the type model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Directory served under `/admin`. Not mounted when `None`.
    pub admin_assets: Option<PathBuf>,
    /// Larger request bodies are treated as unreadable.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            admin_assets: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Types in registration order.
    pub types: Arc<[Arc<TypeEntry>]>,
    pub store: Arc<dyn StorageProvider>,
    pub config: ServerConfig,
}

impl AppState {
    /// Create state with default server settings.
    pub fn new(
        registry: TypeRegistry,
        store: Arc<dyn StorageProvider>,
    ) -> Result<Self, InvalidSchema> {
        Self::with_config(registry, store, ServerConfig::default())
    }

    /// Create state, compiling every type's schema.
    pub fn with_config(
        registry: TypeRegistry,
        store: Arc<dyn StorageProvider>,
        config: ServerConfig,
    ) -> Result<Self, InvalidSchema> {
        let types = registry
            .into_iter()
            .map(|def| -> Result<Arc<TypeEntry>, InvalidSchema> {
                let schema = CompiledSchema::compile(def.schema()).map_err(|source| {
                    InvalidSchema {
                        type_name: def.name().to_string(),
                        source,
                    }
                })?;
                Ok(Arc::new(TypeEntry { def, schema }))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            types: types.into(),
            store,
            config,
        })
    }

    /// Look up a registered type by name.
    pub fn entry(&self, name: &str) -> Option<&Arc<TypeEntry>> {
        self.types.iter().find(|entry| entry.def.name() == name)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field(
                "types",
                &self.types.iter().map(|e| e.def.name()).collect::<Vec<_>>(),
            )
            .field("store", &self.store.backend())
            .field("config", &self.config)
            .finish()
    }
}
