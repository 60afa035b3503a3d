//! Browser localStorage notebook repository (WASM).

use super::{NotebookRepository, StorageError, StorageResult, delete_ordered, upsert_ordered};
use crate::notebook::Notebook;
use web_sys::Storage;

/// localStorage key holding the notebook sequence.
pub const STORAGE_KEY: &str = "notecanvas-storage";

/// Notebook storage backed by `window.localStorage`.
///
/// The sequence is cached in memory and rewritten as one JSON value on
/// every change.
pub struct LocalStorageRepository {
    storage: Storage,
    notebooks: Vec<Notebook>,
}

impl LocalStorageRepository {
    /// Open the repository, reading any previously stored notebooks.
    pub fn new() -> StorageResult<Self> {
        let storage = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage unavailable: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage unavailable".to_string()))?;

        let notebooks = match storage
            .get_item(STORAGE_KEY)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", STORAGE_KEY, e)))?
        {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };

        Ok(Self { storage, notebooks })
    }

    fn flush(&self) -> StorageResult<()> {
        let json = serde_json::to_string(&self.notebooks)?;
        self.storage
            .set_item(STORAGE_KEY, &json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {:?}", STORAGE_KEY, e)))
    }
}

impl NotebookRepository for LocalStorageRepository {
    fn get(&self, id: &str) -> StorageResult<Option<Notebook>> {
        Ok(self.notebooks.iter().find(|n| n.id == id).cloned())
    }

    fn list(&self) -> StorageResult<Vec<Notebook>> {
        Ok(self.notebooks.clone())
    }

    fn upsert(&mut self, notebook: Notebook) -> StorageResult<Notebook> {
        let stored = upsert_ordered(&mut self.notebooks, notebook);
        self.flush()?;
        Ok(stored)
    }

    fn delete(&mut self, id: &str) -> StorageResult<bool> {
        let removed = delete_ordered(&mut self.notebooks, id);
        if removed {
            self.flush()?;
        }
        Ok(removed)
    }
}
