use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tokio::sync::Mutex as AsyncMutex;

use crate::error::StorageError;

// 1. LocalStorage Contract
/// LocalStorage
///
/// Durable string key/value storage, the process-side equivalent of browser local
/// storage. The session snapshot is the only thing the portal keeps here.
///
/// Swapping the file-backed implementation for the in-memory mock is how the tests
/// isolate themselves from the disk.
#[async_trait]
pub trait LocalStorage: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written or has
    /// been removed.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

// 2. The Real Implementation (JSON file on disk)
/// FileLocalStorage
///
/// Keeps all items in one JSON object file. Every write rewrites the whole file via
/// a sibling temp file and a rename, so a crash never leaves a half-written record.
pub struct FileLocalStorage {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process.
    write_lock: AsyncMutex<()>,
}

impl FileLocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: AsyncMutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(items)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl LocalStorage for FileLocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.read_all().await?;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        // An unreadable file is replaced rather than blocking every future write.
        let mut items = self.read_all().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = %self.path.display(), "discarding unreadable local storage");
            BTreeMap::new()
        });
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.read_all().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = %self.path.display(), "discarding unreadable local storage");
            BTreeMap::new()
        });
        if items.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&items).await
    }
}

// 3. The Mock Implementation (For Tests)
/// MockLocalStorage
///
/// In-memory `LocalStorage`. Clones share the same map, which lets a test simulate a
/// restart by building a fresh `SessionContext` over a clone of the same storage.
#[derive(Clone, Default)]
pub struct MockLocalStorage {
    items: Arc<Mutex<BTreeMap<String, String>>>,
    /// When true, all operations return a simulated failure.
    pub should_fail: bool,
}

impl MockLocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            items: Arc::default(),
            should_fail: true,
        }
    }

    /// Direct view of the stored items, bypassing the failure switch.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.items.lock().map(|items| items.clone()).unwrap_or_default()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.should_fail {
            return Err(StorageError::Unavailable(
                "Mock Storage Error: Simulation requested".to_string(),
            ));
        }
        Ok(())
    }

    fn with_items<R>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> R,
    ) -> Result<R, StorageError> {
        self.check()?;
        let mut items = self
            .items
            .lock()
            .map_err(|_| StorageError::Unavailable("mock storage lock poisoned".to_string()))?;
        Ok(f(&mut items))
    }
}

#[async_trait]
impl LocalStorage for MockLocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with_items(|items| items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with_items(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.with_items(|items| {
            items.remove(key);
        })
    }
}

/// StorageState
///
/// The concrete type used to share local storage access across the application.
pub type StorageState = Arc<dyn LocalStorage>;
