//! # In-Memory Store
//!
//! Objects live in a `type -> (id -> object)` map behind one
//! `parking_lot::RwLock`. The lock is never held across an `.await`.
//! Inner maps are `BTreeMap`s, so listing is already in id order.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use cms_core::{Object, Record, TypeDef};
use parking_lot::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::provider::StorageProvider;

type Namespaces = HashMap<String, BTreeMap<String, Object>>;

/// Process-local storage. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Namespaces>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`. Later records win on
    /// duplicate `(type, id)` pairs.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut data = Namespaces::new();
        for record in records {
            data.entry(record.type_name)
                .or_default()
                .insert(record.id, record.data);
        }
        Self {
            data: RwLock::new(data),
        }
    }

    fn put(&self, ty: &TypeDef, id: &str, object: Object) -> StoreResult<()> {
        StoreError::check_id(ty.name(), id)?;
        self.data
            .write()
            .entry(ty.name().to_string())
            .or_default()
            .insert(id.to_string(), object);
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, ty: &TypeDef) -> StoreResult<Vec<Object>> {
        Ok(self
            .data
            .read()
            .get(ty.name())
            .map(|objects| objects.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, ty: &TypeDef, id: &str) -> StoreResult<Object> {
        self.data
            .read()
            .get(ty.name())
            .and_then(|objects| objects.get(id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                type_name: ty.name().to_string(),
                id: id.to_string(),
            })
    }

    async fn create(&self, ty: &TypeDef, id: &str, object: Object) -> StoreResult<()> {
        self.put(ty, id, object)
    }

    async fn update(&self, ty: &TypeDef, id: &str, object: Object) -> StoreResult<()> {
        self.put(ty, id, object)
    }

    async fn delete(&self, ty: &TypeDef, id: &str) -> StoreResult<()> {
        if let Some(objects) = self.data.write().get_mut(ty.name()) {
            objects.remove(id);
        }
        Ok(())
    }
}
