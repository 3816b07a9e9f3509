//! # Storage Provider Trait

use async_trait::async_trait;
use cms_core::{Object, TypeDef};

use crate::error::StoreResult;

/// Persistence for content objects, keyed by type and id.
///
/// Implementations are shared across request handlers behind an `Arc`, so
/// they must be `Send + Sync` and handle their own synchronisation. No
/// implementation retries a failed call.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Short backend name for startup logs.
    fn backend(&self) -> &'static str;

    /// All objects of `ty`, ascending by id. Empty if none were ever stored.
    async fn list(&self, ty: &TypeDef) -> StoreResult<Vec<Object>>;

    /// The object of `ty` stored under `id`.
    async fn get(&self, ty: &TypeDef, id: &str) -> StoreResult<Object>;

    /// Store `object` under `id`, replacing whatever was there.
    async fn create(&self, ty: &TypeDef, id: &str, object: Object) -> StoreResult<()>;

    /// Store `object` under `id`, replacing whatever was there.
    async fn update(&self, ty: &TypeDef, id: &str, object: Object) -> StoreResult<()>;

    /// Remove the object under `id`. Removing an absent id succeeds.
    async fn delete(&self, ty: &TypeDef, id: &str) -> StoreResult<()>;
}
