//! # Bootstrap
//!
//! Turns an [`AppConfig`] into a ready [`AppState`]:
//!
//! 1. **Registry**: validate the declared types.
//! 2. **Storage**: construct the configured provider, resolving seed records
//!    against the registry.
//! 3. **Schemas**: compile every type's schema. A malformed schema fails
//!    startup rather than every write.
//! 4. **Admin assets**: mount the asset directory if it exists.

use std::sync::Arc;

use cms_core::{CoreError, Record, TypeRegistry};
use cms_store::{BucketStore, MemoryStore, S3Bucket, S3Config, StorageProvider};

use crate::config::{AppConfig, ConfigError, ProviderConfig, S3ProviderConfig, SeedRecord};
use crate::state::{AppState, InvalidSchema, ServerConfig};

/// Errors during startup.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid type configuration: {0}")]
    Registry(#[from] CoreError),

    #[error(transparent)]
    Schema(#[from] InvalidSchema),

    /// A seed record names a type that is not registered.
    #[error("initial data references unregistered type {type_name:?}")]
    UnknownSeedType { type_name: String },

    /// A seed record has no usable id.
    #[error("initial data for type {type_name:?} has no usable id: {source}")]
    SeedId {
        type_name: String,
        #[source]
        source: CoreError,
    },
}

/// Build application state from configuration.
pub async fn build_state(config: &AppConfig) -> Result<AppState, BootstrapError> {
    let registry = TypeRegistry::new(config.types.clone())?;
    let store = build_provider(&config.provider, &registry).await?;

    let admin_assets = if config.admin_assets.is_dir() {
        Some(config.admin_assets.clone())
    } else {
        tracing::warn!(
            path = %config.admin_assets.display(),
            "admin asset directory not found; /admin is disabled"
        );
        None
    };

    let types: Vec<&str> = registry.iter().map(|t| t.name()).collect();
    tracing::info!(?types, backend = store.backend(), "content types registered");

    let server = ServerConfig {
        admin_assets,
        max_body_bytes: config.max_body_bytes,
    };
    Ok(AppState::with_config(registry, store, server)?)
}

/// Construct the configured storage provider.
pub async fn build_provider(
    provider: &ProviderConfig,
    registry: &TypeRegistry,
) -> Result<Arc<dyn StorageProvider>, BootstrapError> {
    match provider {
        ProviderConfig::Memory { initial_data } => {
            let records = seed_records(initial_data, registry)?;
            tracing::info!(records = records.len(), "using in-memory storage");
            Ok(Arc::new(MemoryStore::with_records(records)))
        }
        ProviderConfig::S3(s3) => {
            let bucket = S3Bucket::connect(&s3_config(s3)).await;
            tracing::info!(
                bucket = %s3.bucket,
                endpoint = s3.endpoint.as_deref().unwrap_or("default"),
                "using S3-compatible bucket storage"
            );
            Ok(Arc::new(BucketStore::new(bucket)))
        }
    }
}

fn s3_config(s3: &S3ProviderConfig) -> S3Config {
    S3Config {
        bucket: s3.bucket.clone(),
        region: s3.region.clone(),
        endpoint: s3.endpoint.clone(),
        force_path_style: s3.force_path_style,
        access_key_id: s3.access_key_id.clone(),
        secret_access_key: s3.secret_access_key.clone(),
    }
}

/// Resolve seed records against the registry.
fn seed_records(
    seeds: &[SeedRecord],
    registry: &TypeRegistry,
) -> Result<Vec<Record>, BootstrapError> {
    seeds
        .iter()
        .map(|seed| -> Result<Record, BootstrapError> {
            let ty = registry
                .get(&seed.type_name)
                .ok_or_else(|| BootstrapError::UnknownSeedType {
                    type_name: seed.type_name.clone(),
                })?;
            let seed_id = |source| BootstrapError::SeedId {
                type_name: seed.type_name.clone(),
                source,
            };
            let id = match &seed.id {
                Some(id) => {
                    cms_core::check_id(id).map_err(seed_id)?;
                    id.clone()
                }
                None => ty.object_id(&seed.data).map_err(seed_id)?,
            };
            Ok(Record {
                type_name: ty.name().to_string(),
                id,
                data: seed.data.clone(),
            })
        })
        .collect()
}
