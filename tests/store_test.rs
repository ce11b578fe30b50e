use std::{env, path::PathBuf, process};

use sporldeck::management::{
    ACCESS_TOKEN_KEY, CredentialStore, FileStore, MemoryStore, REFRESH_TOKEN_KEY,
};

// Helper function to create a unique credentials path per test
fn temp_credentials_path(name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("sporldeck-test-{}-{}", process::id(), name));
    path.push("credentials.json");
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
    path
}

#[tokio::test]
async fn test_memory_store_get_set_remove() {
    let store = MemoryStore::new();
    assert!(store.get(ACCESS_TOKEN_KEY).await.is_none());

    store.set(ACCESS_TOKEN_KEY, "T1").await.unwrap();
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("T1"));

    store.set(ACCESS_TOKEN_KEY, "T2").await.unwrap();
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("T2"));

    store.remove(ACCESS_TOKEN_KEY).await.unwrap();
    assert!(store.get(ACCESS_TOKEN_KEY).await.is_none());
}

#[tokio::test]
async fn test_memory_store_with_tokens() {
    let store = MemoryStore::with_tokens(None, Some("R1"));
    assert!(store.get(ACCESS_TOKEN_KEY).await.is_none());
    assert_eq!(store.get(REFRESH_TOKEN_KEY).await.as_deref(), Some("R1"));
}

#[tokio::test]
async fn test_file_store_missing_file_is_empty() {
    let path = temp_credentials_path("missing");
    let store = FileStore::open(path.clone()).await.unwrap();

    assert!(store.get(ACCESS_TOKEN_KEY).await.is_none());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_file_store_persists_across_reopen() {
    let path = temp_credentials_path("reopen");

    let store = FileStore::open(path.clone()).await.unwrap();
    store.set(ACCESS_TOKEN_KEY, "T1").await.unwrap();
    store.set(REFRESH_TOKEN_KEY, "R1").await.unwrap();
    drop(store);

    let reopened = FileStore::open(path.clone()).await.unwrap();
    assert_eq!(reopened.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("T1"));
    assert_eq!(reopened.get(REFRESH_TOKEN_KEY).await.as_deref(), Some("R1"));

    reopened.remove(ACCESS_TOKEN_KEY).await.unwrap();
    let reopened = FileStore::open(path).await.unwrap();
    assert!(reopened.get(ACCESS_TOKEN_KEY).await.is_none());
    assert_eq!(reopened.get(REFRESH_TOKEN_KEY).await.as_deref(), Some("R1"));
}

#[tokio::test]
async fn test_file_store_rejects_corrupt_file() {
    let path = temp_credentials_path("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();

    assert!(FileStore::open(path).await.is_err());
}
