use std::fs;
use std::sync::{Arc, Once};

use pretty_assertions::assert_eq;
use rollcall_engine::{
    JsonFileStorage, KeyValueStorage, MemoryStorage, RosterStore, StorageError, ROSTER_KEY,
};
use serde_json::{json, Value};
use tempfile::TempDir;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(rollcall_logging::initialize_for_tests);
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|n| n.to_string()).collect()
}

#[tokio::test]
async fn absent_key_loads_empty_roster() {
    init_logging();
    let store = RosterStore::new(Arc::new(MemoryStorage::new()));

    assert_eq!(store.key(), "userList");
    assert!(store.load().await.is_empty());
}

#[tokio::test]
async fn saved_roster_round_trips_in_order() {
    init_logging();
    let storage = Arc::new(MemoryStorage::new());
    let store = RosterStore::new(storage.clone());

    store.save(&names(&["Zed", "Alice", "김철수"])).await;

    assert_eq!(store.load().await, names(&["Zed", "Alice", "김철수"]));
    assert_eq!(
        storage.get(ROSTER_KEY).await.unwrap(),
        Some(json!(["Zed", "Alice", "김철수"]))
    );
}

#[tokio::test]
async fn wrong_shape_under_key_loads_empty() {
    init_logging();
    let storage = Arc::new(MemoryStorage::new());
    storage.set(ROSTER_KEY, json!({"not": "a list"})).await.unwrap();

    assert!(RosterStore::new(storage).load().await.is_empty());
}

#[tokio::test]
async fn file_storage_persists_across_instances() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("storage.json");

    let first = RosterStore::new(Arc::new(JsonFileStorage::new(path.clone())));
    first.save(&names(&["Alice", "Bob"])).await;

    let second = RosterStore::new(Arc::new(JsonFileStorage::new(path.clone())));
    assert_eq!(second.load().await, names(&["Alice", "Bob"]));

    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, json!({ "userList": ["Alice", "Bob"] }));
}

#[tokio::test]
async fn file_storage_keeps_unrelated_keys() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("storage.json");
    fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

    let storage = JsonFileStorage::new(path.clone());
    storage.set(ROSTER_KEY, json!(["Alice"])).await.unwrap();

    assert_eq!(storage.get("theme").await.unwrap(), Some(json!("dark")));
    assert_eq!(storage.get(ROSTER_KEY).await.unwrap(), Some(json!(["Alice"])));
}

#[tokio::test]
async fn corrupt_file_is_an_error_and_loads_empty() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("storage.json");
    fs::write(&path, "{ definitely not json").unwrap();
    let storage = Arc::new(JsonFileStorage::new(path.clone()));

    assert!(matches!(
        storage.get(ROSTER_KEY).await,
        Err(StorageError::Corrupt(_))
    ));
    let store = RosterStore::new(storage);
    assert!(store.load().await.is_empty());

    // Best-effort save does not clobber a file it cannot read.
    store.save(&names(&["Alice"])).await;
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ definitely not json");
}

#[tokio::test]
async fn non_object_root_is_rejected() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("storage.json");
    fs::write(&path, "[1,2,3]").unwrap();

    let result = JsonFileStorage::new(path).get(ROSTER_KEY).await;
    assert!(matches!(result, Err(StorageError::NotAnObject)));
}

#[tokio::test]
async fn unwritable_location_fails_save_without_panicking() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "x").unwrap();
    let store = RosterStore::new(Arc::new(JsonFileStorage::new(blocker.join("storage.json"))));

    assert!(store.try_save(&names(&["Alice"])).await.is_err());
    store.save(&names(&["Alice"])).await;
}
