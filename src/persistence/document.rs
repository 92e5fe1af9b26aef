//! # JSON Document
//!
//! A single file holding a JSON array, rewritten in full on every mutation.
//!
//! Each document owns a [`WriteGuard`]. The guard is an explicit value rather
//! than process-wide state, so two documents only serialize against each other
//! when they are handed the same guard.
//!
//! The file write runs on a blocking thread that owns the guard. Dropping the
//! caller's future does not stop that write, so the guard stays taken until the
//! bytes are on disk.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard, OwnedMutexGuard};

use super::errors::{StorageError, StorageResult};

/// Mutual-exclusion guard around the write step of a document.
#[derive(Debug, Clone, Default)]
pub struct WriteGuard {
    inner: Arc<Mutex<()>>,
}

impl WriteGuard {
    /// Create a fresh, unshared guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }

    /// Wait for exclusive access with a guard that can move to another task
    pub async fn acquire_owned(&self) -> OwnedMutexGuard<()> {
        Arc::clone(&self.inner).lock_owned().await
    }
}

/// A JSON array of `T` stored in one file.
#[derive(Debug)]
pub struct JsonDocument<T> {
    path: PathBuf,
    guard: WriteGuard,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonDocument<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            guard: self.guard.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open a document with its own guard. The file is not touched.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_guard(path, WriteGuard::new())
    }

    /// Open a document that shares `guard` with other holders
    pub fn with_guard(path: impl Into<PathBuf>, guard: WriteGuard) -> Self {
        Self {
            path: path.into(),
            guard,
            _marker: PhantomData,
        }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The guard serializing writes to this document
    pub fn guard(&self) -> &WriteGuard {
        &self.guard
    }

    /// Read every item.
    ///
    /// A missing or blank file is an empty collection. Anything else that
    /// fails to parse is reported as corruption. This read takes no guard and
    /// can observe a file that a concurrent writer has only partly rewritten.
    pub async fn load(&self) -> StorageResult<Vec<T>> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&text).map_err(|e| StorageError::corrupt(&self.path, e))
    }

    /// Replace the whole file with `items`, holding the guard for the write.
    pub async fn store(&self, items: &[T]) -> StorageResult<()> {
        let body = self.encode(items)?;
        let held = self.guard.acquire_owned().await;
        self.write_locked(body, held).await
    }

    /// Replace the whole file with `items` under a guard the caller already
    /// holds. The guard is released once the write has finished.
    pub async fn store_locked(
        &self,
        items: &[T],
        held: OwnedMutexGuard<()>,
    ) -> StorageResult<()> {
        let body = self.encode(items)?;
        self.write_locked(body, held).await
    }

    fn encode(&self, items: &[T]) -> StorageResult<String> {
        serde_json::to_string_pretty(items).map_err(|e| StorageError::encode(&self.path, e))
    }

    async fn write_locked(&self, body: String, held: OwnedMutexGuard<()>) -> StorageResult<()> {
        let path = self.path.clone();
        let write = tokio::task::spawn_blocking(move || {
            let _held = held;

            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
                }
            }

            std::fs::write(&path, body).map_err(|e| StorageError::io(&path, e))
        });

        write
            .await
            .map_err(|e| StorageError::interrupted(&self.path, e))?
    }
}
