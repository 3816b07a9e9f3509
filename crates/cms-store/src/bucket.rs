//! # Bucket Store
//!
//! Stores each object as a JSON document at `{type}/{id}` in a flat
//! key/value [`Bucket`]. The store owns key layout, encoding, ordering and
//! error wrapping; the bucket only moves bytes. Nothing is cached: `list`
//! enumerates the prefix and reads every document on each call.

use std::collections::BTreeMap;

use async_trait::async_trait;
use cms_core::{Object, TypeDef};
use parking_lot::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::provider::StorageProvider;

/// A flat key/value object store.
///
/// Concurrency control is the bucket's own business; concurrent writers to
/// one key race with last-write-wins.
#[async_trait]
pub trait Bucket: Send + Sync {
    /// Backend name for startup logs.
    fn kind(&self) -> &'static str;

    /// Read a document. `Ok(None)` when the key does not exist.
    async fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Write a document, replacing any existing one.
    async fn write(&self, key: &str, body: Vec<u8>) -> StoreResult<()>;

    /// Remove a document. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Every key starting with `prefix`, in any order.
    async fn keys(&self, prefix: &str) -> StoreResult<Vec<String>>;
}

/// [`StorageProvider`] over any [`Bucket`].
#[derive(Debug)]
pub struct BucketStore<B> {
    bucket: B,
}

impl<B: Bucket> BucketStore<B> {
    pub fn new(bucket: B) -> Self {
        Self { bucket }
    }

    pub fn bucket(&self) -> &B {
        &self.bucket
    }

    async fn write_object(&self, ty: &TypeDef, id: &str, object: &Object) -> StoreResult<()> {
        StoreError::check_id(ty.name(), id)?;
        let key = object_key(ty, id);
        let body = serde_json::to_vec(object).map_err(|e| StoreError::Serialization {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.bucket.write(&key, body).await
    }
}

fn type_prefix(ty: &TypeDef) -> String {
    format!("{}/", ty.name())
}

fn object_key(ty: &TypeDef, id: &str) -> String {
    format!("{}/{}", ty.name(), id)
}

fn decode(key: &str, body: &[u8]) -> StoreResult<Object> {
    serde_json::from_slice(body).map_err(|e| StoreError::Serialization {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl<B: Bucket> StorageProvider for BucketStore<B> {
    fn backend(&self) -> &'static str {
        self.bucket.kind()
    }

    async fn list(&self, ty: &TypeDef) -> StoreResult<Vec<Object>> {
        let prefix = type_prefix(ty);
        let mut ids: Vec<String> = self
            .bucket
            .keys(&prefix)
            .await?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            // A bare `{type}/` key is the prefix itself; writes never create it.
            .filter(|id| !id.is_empty())
            .collect();
        ids.sort();

        let mut objects = Vec::with_capacity(ids.len());
        for id in ids {
            let key = object_key(ty, &id);
            match self.bucket.read(&key).await? {
                Some(body) => objects.push(decode(&key, &body)?),
                // Removed between listing and reading.
                None => tracing::debug!(key = %key, "listed key vanished before read"),
            }
        }
        Ok(objects)
    }

    async fn get(&self, ty: &TypeDef, id: &str) -> StoreResult<Object> {
        let key = object_key(ty, id);
        match self.bucket.read(&key).await? {
            Some(body) => decode(&key, &body),
            None => Err(StoreError::NotFound {
                type_name: ty.name().to_string(),
                id: id.to_string(),
            }),
        }
    }

    async fn create(&self, ty: &TypeDef, id: &str, object: Object) -> StoreResult<()> {
        self.write_object(ty, id, &object).await
    }

    async fn update(&self, ty: &TypeDef, id: &str, object: Object) -> StoreResult<()> {
        self.write_object(ty, id, &object).await
    }

    async fn delete(&self, ty: &TypeDef, id: &str) -> StoreResult<()> {
        self.bucket.remove(&object_key(ty, id)).await
    }
}

/// In-process bucket. Useful for local runs and tests of the bucket layout.
#[derive(Debug, Default)]
pub struct MemoryBucket {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

#[async_trait]
impl Bucket for MemoryBucket {
    fn kind(&self) -> &'static str {
        "memory-bucket"
    }

    async fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.objects.read().get(key).cloned())
    }

    async fn write(&self, key: &str, body: Vec<u8>) -> StoreResult<()> {
        self.objects.write().insert(key.to_string(), body);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.objects.write().remove(key);
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .objects
            .read()
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> TypeDef {
        TypeDef::new("users", "id", "{}")
    }

    #[test]
    fn keys_are_type_slash_id() {
        assert_eq!(object_key(&users(), "42"), "users/42");
        assert_eq!(type_prefix(&users()), "users/");
    }

    #[tokio::test]
    async fn prefix_scan_does_not_leak_into_sibling_types() {
        let bucket = MemoryBucket::new();
        bucket.write("users/1", b"{}".to_vec()).await.unwrap();
        bucket.write("users-archive/1", b"{}".to_vec()).await.unwrap();
        bucket.write("usersx", b"{}".to_vec()).await.unwrap();
        assert_eq!(bucket.keys("users/").await.unwrap(), ["users/1"]);
    }

    #[tokio::test]
    async fn documents_are_json() {
        let store = BucketStore::new(MemoryBucket::new());
        let mut object = Object::new();
        object.insert("id".into(), serde_json::json!("1"));
        store.create(&users(), "1", object.clone()).await.unwrap();

        let raw = store.bucket().read("users/1").await.unwrap().unwrap();
        let parsed: Object = serde_json::from_slice(&raw).unwrap();
        assert_eq!(parsed, object);
    }

    #[tokio::test]
    async fn corrupt_document_is_a_serialization_error() {
        let store = BucketStore::new(MemoryBucket::new());
        store
            .bucket()
            .write("users/1", b"not json".to_vec())
            .await
            .unwrap();
        let err = store.get(&users(), "1").await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization { .. }));
        assert!(!err.is_not_found());
    }
}
