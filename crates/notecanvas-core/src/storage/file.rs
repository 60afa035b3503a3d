//! File-based notebook repository for native platforms.

use super::{NotebookRepository, StorageError, StorageResult, delete_ordered, upsert_ordered};
use crate::notebook::Notebook;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the index file inside the base directory.
const NOTEBOOKS_FILE: &str = "notebooks.json";

/// File-based storage for native platforms.
///
/// The whole ordered notebook sequence lives in one JSON file, read once on
/// open and rewritten on every change.
#[derive(Debug)]
pub struct FileRepository {
    /// Base directory for notebook storage.
    base_path: PathBuf,
    notebooks: Vec<Notebook>,
}

impl FileRepository {
    /// Open (or create) a repository in the given directory.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        let notebooks = read_notebooks(&base_path.join(NOTEBOOKS_FILE))?;
        log::debug!(
            "Opened notebook storage at {} ({} notebooks)",
            base_path.display(),
            notebooks.len()
        );
        Ok(Self {
            base_path,
            notebooks,
        })
    }

    /// Open the repository in the default location.
    ///
    /// On Unix: `~/.local/share/notecanvas/`
    /// On Windows: `%LOCALAPPDATA%\notecanvas\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("notecanvas"))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn file_path(&self) -> PathBuf {
        self.base_path.join(NOTEBOOKS_FILE)
    }

    /// Write through to disk via a temp file so a crash never leaves a
    /// half-written index.
    fn flush(&self) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(&self.notebooks)?;
        let path = self.file_path();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            StorageError::Io(format!("Failed to replace {}: {}", path.display(), e))
        })
    }
}

fn read_notebooks(path: &Path) -> StorageResult<Vec<Notebook>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&json).map_err(|e| {
        StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
    })
}

impl NotebookRepository for FileRepository {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::NotebookKind;
    use crate::snapshot::RasterSnapshot;
    use tempfile::tempdir;

    #[test]
    fn test_file_repository_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let mut notebook = Notebook::new("Lab Journal", NotebookKind::Dotted);
        notebook.canvas_data = Some(RasterSnapshot::from_data_url("data:image/png;base64,AAAA"));
        let id = notebook.id.clone();

        {
            let mut repo = FileRepository::new(dir.path().to_path_buf()).unwrap();
            repo.upsert(notebook).unwrap();
        }

        let repo = FileRepository::new(dir.path().to_path_buf()).unwrap();
        let loaded = repo.get(&id).unwrap().unwrap();
        assert_eq!(loaded.name, "Lab Journal");
        assert_eq!(loaded.kind, NotebookKind::Dotted);
        assert_eq!(
            loaded.canvas_data.unwrap().as_data_url(),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_file_repository_keeps_order() {
        let dir = tempdir().unwrap();
        let mut repo = FileRepository::new(dir.path().to_path_buf()).unwrap();
        for notebook in Notebook::defaults() {
            repo.upsert(notebook).unwrap();
        }

        let reopened = FileRepository::new(dir.path().to_path_buf()).unwrap();
        let names: Vec<_> = reopened.list().unwrap().into_iter().map(|n| n.name).collect();
        assert_eq!(names, ["Class Notes", "Meeting Notes", "Ideas and Sketches"]);
    }

    #[test]
    fn test_file_repository_delete() {
        let dir = tempdir().unwrap();
        let mut repo = FileRepository::new(dir.path().to_path_buf()).unwrap();
        let notebook = Notebook::new("temp", NotebookKind::Blank);
        let id = notebook.id.clone();
        repo.upsert(notebook).unwrap();
        assert!(repo.delete(&id).unwrap());

        let reopened = FileRepository::new(dir.path().to_path_buf()).unwrap();
        assert!(reopened.is_empty().unwrap());
    }

    #[test]
    fn test_file_repository_rejects_corrupt_index() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(NOTEBOOKS_FILE), "{not json").unwrap();
        let result = FileRepository::new(dir.path().to_path_buf());
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_file_repository_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let repo = FileRepository::new(nested.clone()).unwrap();
        assert!(nested.is_dir());
        assert_eq!(repo.base_path(), nested.as_path());
    }
}
