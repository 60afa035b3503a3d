//! NoteCanvas Application
//!
//! The application shell: configuration, UI action dispatch, keyboard
//! shortcuts and the platform entry points.

mod app;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError, AppResult, parse_color, parse_kind};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{ColorPreset, NotebookEntry, ThicknessPreset, UiAction, UiState};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebApp;
