//! Behavioural contract every storage provider must satisfy.
//!
//! Each check receives a fresh provider. `storage_contract!` expands to one
//! `#[tokio::test]` per check for a given harness expression.

use cms_core::{Object, TypeDef};
use cms_store::{StorageProvider, StoreError};
use serde_json::{json, Value};

/// Owns a provider plus anything that must outlive it (e.g. a fake server).
pub struct Harness {
    pub store: Box<dyn StorageProvider>,
    _keepalive: Option<Box<dyn std::any::Any>>,
}

impl Harness {
    pub fn new(store: impl StorageProvider + 'static) -> Self {
        Self {
            store: Box::new(store),
            _keepalive: None,
        }
    }

    #[allow(dead_code)]
    pub fn with_keepalive(store: impl StorageProvider + 'static, guard: impl std::any::Any) -> Self {
        Self {
            store: Box::new(store),
            _keepalive: Some(Box::new(guard)),
        }
    }
}

#[macro_export]
macro_rules! storage_contract {
    ($harness:expr) => {
        storage_contract!(@cases $harness;
            list_is_empty_for_unseen_type,
            create_then_get_round_trips,
            list_is_sorted_by_id,
            create_overwrites_existing,
            update_upserts_missing,
            get_unknown_type_is_not_found,
            get_unknown_id_is_not_found,
            delete_is_idempotent,
            delete_only_removes_target,
            types_are_isolated,
            empty_id_is_refused,
            not_found_message_is_backend_independent
        );
    };
    (@cases $harness:expr; $($case:ident),*) => {
        $(
            #[tokio::test]
            async fn $case() {
                let harness = $harness;
                common::$case(&*harness.store).await;
            }
        )*
    };
}

pub fn users() -> TypeDef {
    TypeDef::new("users", "id", "{}")
}

pub fn pets() -> TypeDef {
    TypeDef::new("pets", "name", "{}")
}

pub fn object(value: Value) -> Object {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be an object, got {other}"),
    }
}

fn user(id: &str, name: &str) -> Object {
    object(json!({ "id": id, "name": name }))
}

pub async fn list_is_empty_for_unseen_type(store: &dyn StorageProvider) {
    let listed = store.list(&users()).await.unwrap();
    assert!(listed.is_empty());
}

pub async fn create_then_get_round_trips(store: &dyn StorageProvider) {
    let u = object(json!({
        "id": "1",
        "name": "name",
        "tags": ["a", "b"],
        "address": { "street": "Main", "number": 12 }
    }));
    store.create(&users(), "1", u.clone()).await.unwrap();
    assert_eq!(store.get(&users(), "1").await.unwrap(), u);
    assert_eq!(store.list(&users()).await.unwrap(), vec![u]);
}

pub async fn list_is_sorted_by_id(store: &dyn StorageProvider) {
    for id in ["c", "a", "b", "10", "2"] {
        store.create(&users(), id, user(id, id)).await.unwrap();
    }
    let ids: Vec<String> = store
        .list(&users())
        .await
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["10", "2", "a", "b", "c"]);
}

pub async fn create_overwrites_existing(store: &dyn StorageProvider) {
    store.create(&users(), "1", user("1", "first")).await.unwrap();
    store.create(&users(), "1", user("1", "second")).await.unwrap();
    assert_eq!(store.get(&users(), "1").await.unwrap(), user("1", "second"));
    assert_eq!(store.list(&users()).await.unwrap().len(), 1);
}

pub async fn update_upserts_missing(store: &dyn StorageProvider) {
    store.update(&users(), "7", user("7", "new")).await.unwrap();
    assert_eq!(store.get(&users(), "7").await.unwrap(), user("7", "new"));

    store.update(&users(), "7", user("7", "changed")).await.unwrap();
    assert_eq!(store.get(&users(), "7").await.unwrap(), user("7", "changed"));
}

pub async fn get_unknown_type_is_not_found(store: &dyn StorageProvider) {
    let err = store.get(&users(), "1").await.unwrap_err();
    assert!(err.is_not_found(), "{err}");
}

pub async fn get_unknown_id_is_not_found(store: &dyn StorageProvider) {
    store.create(&users(), "1", user("1", "x")).await.unwrap();
    let err = store.get(&users(), "2").await.unwrap_err();
    assert!(err.is_not_found(), "{err}");
}

pub async fn delete_is_idempotent(store: &dyn StorageProvider) {
    store.create(&users(), "1", user("1", "x")).await.unwrap();
    store.delete(&users(), "1").await.unwrap();
    store.delete(&users(), "1").await.unwrap();
    store.delete(&pets(), "never-existed").await.unwrap();

    assert!(store.get(&users(), "1").await.unwrap_err().is_not_found());
    assert!(store.list(&users()).await.unwrap().is_empty());
}

pub async fn delete_only_removes_target(store: &dyn StorageProvider) {
    store.create(&users(), "1", user("1", "a")).await.unwrap();
    store.create(&users(), "2", user("2", "b")).await.unwrap();
    store.delete(&users(), "1").await.unwrap();
    assert_eq!(store.list(&users()).await.unwrap(), vec![user("2", "b")]);
}

pub async fn types_are_isolated(store: &dyn StorageProvider) {
    let rex = object(json!({ "name": "rex", "kind": "dog" }));
    store.create(&users(), "rex", user("rex", "person")).await.unwrap();
    store.create(&pets(), "rex", rex.clone()).await.unwrap();

    assert_eq!(store.get(&pets(), "rex").await.unwrap(), rex);
    assert_eq!(store.get(&users(), "rex").await.unwrap(), user("rex", "person"));

    store.delete(&pets(), "rex").await.unwrap();
    assert_eq!(store.list(&users()).await.unwrap().len(), 1);
    assert!(store.list(&pets()).await.unwrap().is_empty());
}

pub async fn empty_id_is_refused(store: &dyn StorageProvider) {
    let err = store.create(&users(), "", user("", "blank")).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidId { .. }), "{err}");
    let err = store.update(&users(), "", user("", "blank")).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidId { .. }), "{err}");

    assert!(store.list(&users()).await.unwrap().is_empty());
    assert!(store.get(&users(), "").await.unwrap_err().is_not_found());
}

pub async fn not_found_message_is_backend_independent(store: &dyn StorageProvider) {
    let never_written = store.get(&users(), "1").await.unwrap_err();
    assert_eq!(never_written.to_string(), "no object with id 1 found in storage");

    store.create(&users(), "2", user("2", "x")).await.unwrap();
    let absent = store.get(&users(), "1").await.unwrap_err();
    assert_eq!(absent.to_string(), "no object with id 1 found in storage");
}
