//! Auto-save functionality for notebook persistence.
//!
//! Provides periodic saving of the selected notebook's current snapshot so a
//! closed tab or crash loses at most one interval of work.

use crate::notebook::Notebook;
use crate::snapshot::RasterSnapshot;
use crate::storage::{NotebookRepository, StorageResult};

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Owns the repository and decides when the current drawing is written.
pub struct AutoSaveManager<R: NotebookRepository> {
    /// Storage backend.
    repository: R,
    /// Auto-save interval.
    interval: Duration,
    /// Last save timestamp.
    last_save: Option<Instant>,
    /// Whether the drawing has unsaved changes.
    dirty: bool,
    /// Notebook the drawing belongs to. `None` disables saving.
    notebook_id: Option<String>,
}

impl<R: NotebookRepository> AutoSaveManager<R> {
    /// Create a new auto-save manager with the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            dirty: false,
            notebook_id: None,
        }
    }

    /// Set the auto-save interval.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Get the auto-save interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Mark the drawing as having unsaved changes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if the drawing has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Switch to another notebook (or none). Pending changes of the previous
    /// one are dropped, not saved.
    pub fn set_notebook_id(&mut self, id: Option<String>) {
        self.notebook_id = id;
        self.dirty = false;
        self.last_save = Some(Instant::now());
    }

    /// Check if enough time has passed for an auto-save.
    pub fn should_save(&self) -> bool {
        if !self.dirty || self.notebook_id.is_none() {
            return false;
        }

        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Save if dirty and the interval has elapsed.
    /// Returns the stored notebook when a save happened.
    pub fn maybe_save(
        &mut self,
        snapshot: Option<&RasterSnapshot>,
    ) -> StorageResult<Option<Notebook>> {
        if !self.should_save() {
            return Ok(None);
        }
        self.save(snapshot)
    }

    /// Write `snapshot` into the current notebook immediately.
    ///
    /// No-op without a current notebook or snapshot, or when the notebook
    /// vanished from the repository.
    pub fn save(&mut self, snapshot: Option<&RasterSnapshot>) -> StorageResult<Option<Notebook>> {
        let (Some(id), Some(snapshot)) = (self.notebook_id.as_deref(), snapshot) else {
            return Ok(None);
        };
        let Some(mut notebook) = self.repository.get(id)? else {
            log::warn!("Notebook {} disappeared before save", id);
            return Ok(None);
        };

        notebook.canvas_data = Some(snapshot.clone());
        let stored = self.repository.upsert(notebook)?;

        self.last_save = Some(Instant::now());
        self.dirty = false;
        log::info!("Saved notebook {} ({} bytes)", stored.id, snapshot.len());

        Ok(Some(stored))
    }

    /// Get a reference to the repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Get a mutable reference to the repository.
    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::NotebookKind;
    use crate::storage::MemoryRepository;

    fn manager_with_notebook() -> (AutoSaveManager<MemoryRepository>, String) {
        let notebook = Notebook::new("Sketches", NotebookKind::Blank);
        let id = notebook.id.clone();
        let mut manager = AutoSaveManager::new(MemoryRepository::with_notebooks(vec![notebook]));
        manager.set_notebook_id(Some(id.clone()));
        (manager, id)
    }

    fn snap() -> RasterSnapshot {
        RasterSnapshot::from_data_url("data:image/png;base64,AAAA")
    }

    #[test]
    fn test_autosave_manager_creation() {
        let manager = AutoSaveManager::new(MemoryRepository::new());
        assert!(!manager.is_dirty());
        assert!(!manager.should_save());
        assert_eq!(manager.interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_autosave_waits_for_interval() {
        let (mut manager, _) = manager_with_notebook();
        manager.mark_dirty();
        // Interval counts from selection.
        assert!(!manager.should_save());
        assert!(manager.maybe_save(Some(&snap())).unwrap().is_none());

        manager.set_interval(Duration::ZERO);
        assert!(manager.should_save());
    }

    #[test]
    fn test_autosave_save_clears_dirty() {
        let (mut manager, id) = manager_with_notebook();
        manager.set_interval(Duration::ZERO);
        manager.mark_dirty();

        let stored = manager.maybe_save(Some(&snap())).unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert!(!manager.is_dirty());
        assert!(!manager.should_save());

        let persisted = manager.repository().get(&id).unwrap().unwrap();
        assert_eq!(persisted.canvas_data, Some(snap()));
    }

    #[test]
    fn test_autosave_disabled_without_notebook() {
        let mut manager = AutoSaveManager::new(MemoryRepository::new());
        manager.set_interval(Duration::ZERO);
        manager.mark_dirty();
        assert!(!manager.should_save());
        assert!(manager.save(Some(&snap())).unwrap().is_none());
    }

    #[test]
    fn test_switching_notebook_drops_dirty_state() {
        let (mut manager, _) = manager_with_notebook();
        manager.mark_dirty();
        manager.set_notebook_id(None);
        assert!(!manager.is_dirty());
    }

    #[test]
    fn test_save_without_snapshot_is_noop() {
        let (mut manager, id) = manager_with_notebook();
        assert!(manager.save(None).unwrap().is_none());
        let persisted = manager.repository().get(&id).unwrap().unwrap();
        assert!(persisted.canvas_data.is_none());
    }
}
