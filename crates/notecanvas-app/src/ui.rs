//! UI-facing actions and state.
//!
//! The host UI (DOM toolbar, sidebar) never touches the session directly:
//! it renders a [`UiState`] and sends [`UiAction`]s back.

use notecanvas_core::tools::{PALETTE, THICKNESS_PRESETS};
use notecanvas_core::{Notebook, NotebookKind, SerializableColor, ToolKind};
use serde::Serialize;

/// Actions that can be triggered by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Switch to the notebook with this id.
    SelectNotebook(String),
    /// Create a notebook and switch to it.
    CreateNotebook { name: String, kind: NotebookKind },
    /// Change the current tool.
    SetTool(ToolKind),
    /// Change the stroke colour.
    SetColor(SerializableColor),
    /// Change the stroke thickness (clamped by the session).
    SetThickness(f64),
    Undo,
    Redo,
    /// Wipe the page as an undoable step.
    Clear,
    /// Write the current drawing to storage now.
    Save,
    /// Collapse or expand the notebook sidebar.
    ToggleSidebar,
}

/// One row of the notebook sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotebookEntry {
    pub id: String,
    pub name: String,
    pub kind: NotebookKind,
    pub kind_label: &'static str,
    pub selected: bool,
}

impl NotebookEntry {
    pub(crate) fn from_notebook(notebook: &Notebook, selected_id: Option<&str>) -> Self {
        Self {
            id: notebook.id.clone(),
            name: notebook.name.clone(),
            kind: notebook.kind,
            kind_label: notebook.kind.label(),
            selected: selected_id == Some(notebook.id.as_str()),
        }
    }
}

/// A named toolbar colour swatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorPreset {
    pub name: &'static str,
    pub color: String,
}

/// A named toolbar stroke width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThicknessPreset {
    pub name: &'static str,
    pub thickness: f64,
}

/// Toolbar colour swatches.
pub fn color_presets() -> Vec<ColorPreset> {
    PALETTE
        .iter()
        .map(|&(name, color)| ColorPreset {
            name,
            color: color.to_hex(),
        })
        .collect()
}

/// Toolbar stroke widths.
pub fn thickness_presets() -> Vec<ThicknessPreset> {
    THICKNESS_PRESETS
        .iter()
        .map(|&(name, thickness)| ThicknessPreset { name, thickness })
        .collect()
}

/// Everything the UI needs to draw its chrome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiState {
    pub notebooks: Vec<NotebookEntry>,
    pub tool: ToolKind,
    /// `#rrggbb` (or `#rrggbbaa` when translucent).
    pub color: String,
    pub thickness: f64,
    pub can_undo: bool,
    pub can_redo: bool,
    pub sidebar_collapsed: bool,
    pub palette: Vec<ColorPreset>,
    pub thickness_presets: Vec<ThicknessPreset>,
}

impl UiState {
    /// The selected notebook's sidebar entry, if any.
    pub fn selected(&self) -> Option<&NotebookEntry> {
        self.notebooks.iter().find(|entry| entry.selected)
    }
}
