//! Notebook persistence.

mod autosave;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use autosave::{AutoSaveManager, DEFAULT_AUTOSAVE_INTERVAL_SECS};
pub use memory::MemoryRepository;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileRepository;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageRepository;

use crate::notebook::{Notebook, now_millis};
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Notebook not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable home of the notebook sequence.
///
/// Calls are synchronous and run on the UI thread. `list` returns notebooks
/// in creation order.
pub trait NotebookRepository {
    /// Look a notebook up by id.
    fn get(&self, id: &str) -> StorageResult<Option<Notebook>>;

    /// All notebooks, oldest first.
    fn list(&self) -> StorageResult<Vec<Notebook>>;

    /// Insert or overwrite by id and stamp `updated_at`.
    /// Returns the notebook as stored.
    fn upsert(&mut self, notebook: Notebook) -> StorageResult<Notebook>;

    /// Remove a notebook. Returns whether it existed.
    fn delete(&mut self, id: &str) -> StorageResult<bool>;

    /// Whether no notebook has been stored yet.
    fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.list()?.is_empty())
    }
}

/// The persistent backend of the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformRepository = FileRepository;

#[cfg(target_arch = "wasm32")]
pub type PlatformRepository = LocalStorageRepository;

/// Open the platform backend in its default location.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_repository() -> StorageResult<PlatformRepository> {
    FileRepository::default_location()
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_repository() -> StorageResult<PlatformRepository> {
    LocalStorageRepository::new()
}

/// Shared upsert over an ordered list: replace in place, or append.
fn upsert_ordered(notebooks: &mut Vec<Notebook>, mut notebook: Notebook) -> Notebook {
    notebook.updated_at = now_millis().max(notebook.created_at);
    match notebooks.iter_mut().find(|existing| existing.id == notebook.id) {
        Some(existing) => *existing = notebook.clone(),
        None => notebooks.push(notebook.clone()),
    }
    notebook
}

/// Shared delete over an ordered list.
fn delete_ordered(notebooks: &mut Vec<Notebook>, id: &str) -> bool {
    let before = notebooks.len();
    notebooks.retain(|notebook| notebook.id != id);
    notebooks.len() != before
}
