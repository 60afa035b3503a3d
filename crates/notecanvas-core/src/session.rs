//! The active notebook session.
//!
//! A session is the single owner of the history and the stroke engine.
//! Everything else reads derived state through accessors and changes it
//! through the methods here.

use crate::color::SerializableColor;
use crate::history::HistoryStore;
use crate::input::{PointerEvent, RawPointerInput};
use crate::notebook::{Notebook, NotebookKind};
use crate::snapshot::RasterSnapshot;
use crate::storage::{AutoSaveManager, NotebookRepository, StorageResult};
use crate::stroke::StrokeEngine;
use crate::surface::Surface;
use crate::tools::{ToolKind, ToolSettings};

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use web_time::Duration;

/// One user editing one notebook at a time.
pub struct NotebookSession<S: Surface, R: NotebookRepository> {
    autosave: AutoSaveManager<R>,
    history: HistoryStore,
    engine: StrokeEngine<S>,
    settings: ToolSettings,
    selected: Option<Notebook>,
}

impl<S: Surface, R: NotebookRepository> NotebookSession<S, R> {
    /// Create a session with no notebook selected and no surface attached.
    pub fn new(repository: R, background: SerializableColor) -> Self {
        Self {
            autosave: AutoSaveManager::new(repository),
            history: HistoryStore::new(),
            engine: StrokeEngine::new(background),
            settings: ToolSettings::default(),
            selected: None,
        }
    }

    pub fn set_autosave_interval(&mut self, interval: Duration) {
        self.autosave.set_interval(interval);
    }

    /// Seed default notebooks into an empty repository and select the first
    /// notebook if none is selected.
    pub fn start(&mut self) -> StorageResult<()> {
        let repository = self.autosave.repository_mut();
        if repository.is_empty()? {
            log::info!("Empty notebook storage, creating defaults");
            for notebook in Notebook::defaults() {
                repository.upsert(notebook)?;
            }
        }
        if self.selected.is_none() {
            if let Some(first) = self.autosave.repository().list()?.into_iter().next() {
                self.activate(first);
            }
        }
        Ok(())
    }

    /// Mount a drawing surface and paint the current state onto it.
    pub fn attach_surface(&mut self, surface: S) {
        self.engine.attach_surface(surface);
        let current = self
            .history
            .current()
            .cloned()
            .or_else(|| self.selected.as_ref().and_then(|n| n.canvas_data.clone()));
        self.engine.load(current.as_ref());
        if self.selected.is_some() && self.history.current().is_none() {
            self.history.reset(current.or_else(|| self.engine.encode()));
        }
    }

    /// Unmount the drawing surface.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.engine.detach_surface()
    }

    /// All notebooks in creation order.
    pub fn notebooks(&self) -> StorageResult<Vec<Notebook>> {
        self.autosave.repository().list()
    }

    /// Create a notebook, persist it and switch to it.
    pub fn create_notebook(&mut self, name: &str, kind: NotebookKind) -> StorageResult<Notebook> {
        let stored = self
            .autosave
            .repository_mut()
            .upsert(Notebook::new(name, kind))?;
        log::info!("Created notebook {} ({})", stored.name, stored.id);
        self.activate(stored.clone());
        Ok(stored)
    }

    /// Switch to notebook `id`. In-memory history of the previous notebook
    /// is discarded. Returns `false` when no such notebook exists.
    pub fn select_notebook(&mut self, id: &str) -> StorageResult<bool> {
        match self.autosave.repository().get(id)? {
            Some(notebook) => {
                self.activate(notebook);
                Ok(true)
            }
            None => {
                log::warn!("Cannot select unknown notebook {}", id);
                Ok(false)
            }
        }
    }

    fn activate(&mut self, notebook: Notebook) {
        self.engine.load(notebook.canvas_data.as_ref());
        // A never-saved notebook starts from its encoded blank surface so
        // the first stroke can be undone.
        let baseline = notebook
            .canvas_data
            .clone()
            .or_else(|| self.engine.encode());
        self.history.reset(baseline);
        self.autosave.set_notebook_id(Some(notebook.id.clone()));
        log::info!("Selected notebook {} ({})", notebook.name, notebook.id);
        self.selected = Some(notebook);
    }

    /// Feed a surface-local pointer event. Returns `true` when a stroke was
    /// committed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if self.selected.is_none() {
            return false;
        }
        let committed = self
            .engine
            .handle_pointer(event, &self.settings, &mut self.history);
        if committed {
            self.autosave.mark_dirty();
        }
        committed
    }

    /// Normalize raw page-coordinate input and feed it.
    pub fn handle_raw_input(&mut self, input: &RawPointerInput) -> bool {
        match input.normalize() {
            Some(event) => self.handle_pointer(event),
            None => false,
        }
    }

    /// Step back and repaint. Returns `false` at the start of history.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.engine.load(Some(&snapshot));
        self.autosave.mark_dirty();
        true
    }

    /// Step forward and repaint. Returns `false` when nothing was undone.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.engine.load(Some(&snapshot));
        self.autosave.mark_dirty();
        true
    }

    /// Wipe the page as a new history entry.
    pub fn clear(&mut self) -> bool {
        if self.selected.is_none() {
            return false;
        }
        let cleared = self.engine.clear(&mut self.history);
        if cleared {
            self.autosave.mark_dirty();
        }
        cleared
    }

    /// Persist the current snapshot into the selected notebook.
    /// Returns `false` when there was nothing to save.
    pub fn save(&mut self) -> StorageResult<bool> {
        let saved = self.autosave.save(self.history.current())?;
        Ok(self.adopt_saved(saved))
    }

    /// Timer hook: save when dirty and the autosave interval has elapsed.
    pub fn autosave_tick(&mut self) -> StorageResult<bool> {
        let saved = self.autosave.maybe_save(self.history.current())?;
        Ok(self.adopt_saved(saved))
    }

    fn adopt_saved(&mut self, saved: Option<Notebook>) -> bool {
        match saved {
            Some(notebook) => {
                self.selected = Some(notebook);
                true
            }
            None => false,
        }
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.settings.tool = tool;
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.settings.color = color;
    }

    pub fn set_thickness(&mut self, thickness: f64) {
        self.settings.set_thickness(thickness);
    }

    pub fn tool_settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn selected(&self) -> Option<&Notebook> {
        self.selected.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn current_snapshot(&self) -> Option<&RasterSnapshot> {
        self.history.current()
    }

    pub fn surface(&self) -> Option<&S> {
        self.engine.surface()
    }

    /// Whether there are changes not yet written to the repository.
    pub fn is_dirty(&self) -> bool {
        self.autosave.is_dirty()
    }

    pub fn repository(&self) -> &R {
        self.autosave.repository()
    }
}
