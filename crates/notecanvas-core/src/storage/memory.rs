//! In-memory notebook repository.

use super::{NotebookRepository, StorageResult, delete_ordered, upsert_ordered};
use crate::notebook::Notebook;

/// In-memory storage for testing and ephemeral use.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    notebooks: Vec<Notebook>,
}

impl MemoryRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `notebooks` in the given order.
    pub fn with_notebooks(notebooks: Vec<Notebook>) -> Self {
        Self { notebooks }
    }
}

impl NotebookRepository for MemoryRepository {
    fn get(&self, id: &str) -> StorageResult<Option<Notebook>> {
        Ok(self.notebooks.iter().find(|n| n.id == id).cloned())
    }

    fn list(&self) -> StorageResult<Vec<Notebook>> {
        Ok(self.notebooks.clone())
    }

    fn upsert(&mut self, notebook: Notebook) -> StorageResult<Notebook> {
        Ok(upsert_ordered(&mut self.notebooks, notebook))
    }

    fn delete(&mut self, id: &str) -> StorageResult<bool> {
        Ok(delete_ordered(&mut self.notebooks, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::NotebookKind;
    use crate::snapshot::RasterSnapshot;

    #[test]
    fn test_upsert_and_get() {
        let mut repo = MemoryRepository::new();
        let notebook = Notebook::new("Math", NotebookKind::Grid);
        let id = notebook.id.clone();

        repo.upsert(notebook).unwrap();
        let loaded = repo.get(&id).unwrap().unwrap();
        assert_eq!(loaded.name, "Math");
        assert!(repo.get("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let mut repo = MemoryRepository::new();
        let first = Notebook::new("first", NotebookKind::Blank);
        let second = Notebook::new("second", NotebookKind::Lined);
        repo.upsert(first.clone()).unwrap();
        repo.upsert(second).unwrap();

        let mut edited = first.clone();
        edited.canvas_data = Some(RasterSnapshot::from_data_url("data:image/png;base64,AA"));
        let stored = repo.upsert(edited).unwrap();
        assert!(stored.updated_at >= first.updated_at);

        let list = repo.list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, first.id);
        assert!(list[0].canvas_data.is_some());
        assert_eq!(list[1].name, "second");
    }

    #[test]
    fn test_delete() {
        let mut repo = MemoryRepository::new();
        let notebook = Notebook::new("gone", NotebookKind::Blank);
        let id = notebook.id.clone();
        repo.upsert(notebook).unwrap();

        assert!(repo.delete(&id).unwrap());
        assert!(!repo.delete(&id).unwrap());
        assert!(repo.is_empty().unwrap());
    }
}
