use std::{collections::HashMap, io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

pub const ACCESS_TOKEN_KEY: &str = "spotify_access_token";
pub const REFRESH_TOKEN_KEY: &str = "spotify_refresh_token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Key/value storage for the persisted credentials.
///
/// The client never assumes anything about where values live; it only reads
/// and writes the two keys [`ACCESS_TOKEN_KEY`] and [`REFRESH_TOKEN_KEY`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Credentials kept in process memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(access_token: Option<&str>, refresh_token: Option<&str>) -> Self {
        let mut entries = HashMap::new();
        if let Some(token) = access_token {
            entries.insert(ACCESS_TOKEN_KEY.to_string(), token.to_string());
        }
        if let Some(token) = refresh_token {
            entries.insert(REFRESH_TOKEN_KEY.to_string(), token.to_string());
        }
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// Credentials persisted as a JSON object on disk.
///
/// The file is read once on [`FileStore::open`]. Every write rewrites the
/// whole file and only updates the in-memory view after the write succeeded,
/// so a failed write leaves the previous values in place.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    pub async fn open(path: PathBuf) -> Result<Self, StoreError> {
        let entries = match async_fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => HashMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StoreError::IoError(e)),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated).await?;
        *entries = updated;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut updated = entries.clone();
        updated.remove(key);
        self.persist(&updated).await?;
        *entries = updated;
        Ok(())
    }
}
