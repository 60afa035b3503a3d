//! Core application state and action dispatch.

use std::path::PathBuf;
use std::time::Duration;

use kurbo::{Point, Rect};
use notecanvas_core::storage::{
    DEFAULT_AUTOSAVE_INTERVAL_SECS, PlatformRepository, create_default_repository,
};
use notecanvas_core::{
    DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, Notebook, NotebookKind, NotebookRepository,
    NotebookSession, PointerPhase, RawPointerInput, SerializableColor, StorageError, Surface,
    SurfaceError,
};
use notecanvas_render::RasterSurface;
use thiserror::Error;

use crate::shortcuts::ShortcutRegistry;
use crate::ui::{NotebookEntry, UiAction, UiState, color_presets, thickness_presets};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Notebook not found: {0}")]
    NotebookNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub background: SerializableColor,
    pub autosave_interval: Duration,
    /// Storage directory for the native file backend. `None` uses the
    /// platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            background: SerializableColor::white(),
            autosave_interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            data_dir: None,
        }
    }
}

impl AppConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Page colour. Alpha is ignored: the page is always opaque.
    pub fn with_background(mut self, background: SerializableColor) -> Self {
        self.background = background.opaque();
        self
    }

    pub fn with_autosave_interval(mut self, interval: Duration) -> Self {
        self.autosave_interval = interval;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

/// Parse a `#rgb` / `#rrggbb` / `#rrggbbaa` colour from the UI.
pub fn parse_color(hex: &str) -> AppResult<SerializableColor> {
    SerializableColor::from_hex(hex)
        .ok_or_else(|| AppError::InvalidInput(format!("unrecognized colour {hex:?}")))
}

/// Parse a notebook kind identifier from the UI.
pub fn parse_kind(kind: &str) -> AppResult<NotebookKind> {
    kind.parse().map_err(AppError::InvalidInput)
}

/// Main application struct.
///
/// Owns the notebook session with a CPU raster surface attached and the
/// bits of chrome state the session does not care about.
pub struct App<R: NotebookRepository> {
    config: AppConfig,
    session: NotebookSession<RasterSurface, R>,
    sidebar_collapsed: bool,
}

impl App<PlatformRepository> {
    /// Open the app on the platform backend: the file store in
    /// `config.data_dir` (or the default data directory) natively,
    /// localStorage in the browser.
    pub fn open(config: AppConfig) -> AppResult<Self> {
        let repository = match &config.data_dir {
            #[cfg(not(target_arch = "wasm32"))]
            Some(dir) => notecanvas_core::storage::FileRepository::new(dir.clone())?,
            _ => create_default_repository()?,
        };
        Self::new(config, repository)
    }
}

impl<R: NotebookRepository> App<R> {
    /// Create the app, seed storage if empty and select the first notebook.
    pub fn new(config: AppConfig, repository: R) -> AppResult<Self> {
        let mut session = NotebookSession::new(repository, config.background);
        session.set_autosave_interval(config.autosave_interval);
        session.attach_surface(RasterSurface::new(config.width, config.height));
        session.start()?;
        Ok(Self {
            config,
            session,
            sidebar_collapsed: false,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &NotebookSession<RasterSurface, R> {
        &self.session
    }

    /// Apply a UI action. Returns `true` when the surface pixels changed.
    pub fn handle_action(&mut self, action: UiAction) -> AppResult<bool> {
        log::debug!("UI action: {:?}", action);
        match action {
            UiAction::SelectNotebook(id) => Ok(self.session.select_notebook(&id)?),
            UiAction::CreateNotebook { name, kind } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(AppError::InvalidInput("notebook name is empty".to_string()));
                }
                self.session.create_notebook(name, kind)?;
                Ok(true)
            }
            UiAction::SetTool(tool) => {
                self.session.set_tool(tool);
                Ok(false)
            }
            UiAction::SetColor(color) => {
                self.session.set_color(color);
                Ok(false)
            }
            UiAction::SetThickness(thickness) => {
                self.session.set_thickness(thickness);
                Ok(false)
            }
            UiAction::Undo => Ok(self.session.undo()),
            UiAction::Redo => Ok(self.session.redo()),
            UiAction::Clear => Ok(self.session.clear()),
            UiAction::Save => {
                self.session.save()?;
                Ok(false)
            }
            UiAction::ToggleSidebar => {
                self.sidebar_collapsed = !self.sidebar_collapsed;
                Ok(false)
            }
        }
    }

    /// Dispatch a key press through the shortcut registry.
    /// Returns `Ok(None)` for unbound keys, otherwise whether pixels changed.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool) -> AppResult<Option<bool>> {
        match ShortcutRegistry::action_for(key, ctrl, shift) {
            Some(action) => self.handle_action(action).map(Some),
            None => Ok(None),
        }
    }

    /// Mouse or pen input in client coordinates. Returns `true` when a
    /// stroke was committed to history.
    pub fn handle_pointer(&mut self, phase: PointerPhase, client: Point, bounds: Rect) -> bool {
        self.session
            .handle_raw_input(&RawPointerInput::single(phase, client, bounds))
    }

    /// Touch input; only the first contact draws.
    pub fn handle_touch(
        &mut self,
        phase: PointerPhase,
        contacts: Vec<Point>,
        bounds: Rect,
    ) -> bool {
        self.session.handle_raw_input(&RawPointerInput {
            phase,
            contacts,
            surface_bounds: bounds,
        })
    }

    /// Autosave timer hook. Failures are logged, never raised.
    pub fn tick(&mut self) -> bool {
        match self.session.autosave_tick() {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!("Autosave failed: {}", e);
                false
            }
        }
    }

    /// RGBA bytes of the live surface, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.session.surface().map(RasterSurface::rgba).unwrap_or(&[])
    }

    /// Snapshot of everything the chrome renders.
    pub fn ui_state(&self) -> AppResult<UiState> {
        let selected_id = self.session.selected().map(|n| n.id.as_str());
        let notebooks = self
            .session
            .notebooks()?
            .iter()
            .map(|notebook| NotebookEntry::from_notebook(notebook, selected_id))
            .collect();
        let settings = self.session.tool_settings();
        Ok(UiState {
            notebooks,
            tool: settings.tool,
            color: settings.color.to_hex(),
            thickness: settings.thickness,
            can_undo: self.session.can_undo(),
            can_redo: self.session.can_redo(),
            sidebar_collapsed: self.sidebar_collapsed,
            palette: color_presets(),
            thickness_presets: thickness_presets(),
        })
    }

    /// Render a stored notebook onto a fresh background and encode as PNG.
    ///
    /// Uses the persisted drawing; unsaved strokes are not included.
    pub fn export_png(&self, id: &str) -> AppResult<Vec<u8>> {
        let notebook = self
            .session
            .repository()
            .get(id)?
            .ok_or_else(|| AppError::NotebookNotFound(id.to_string()))?;
        render_notebook(&notebook, &self.config)?.to_png().map_err(AppError::from)
    }
}

fn render_notebook(notebook: &Notebook, config: &AppConfig) -> AppResult<RasterSurface> {
    let mut surface = RasterSurface::new(config.width, config.height);
    let bounds = surface.bounds();
    surface.fill_rect(bounds, config.background.opaque());
    if let Some(snapshot) = &notebook.canvas_data {
        surface.draw_snapshot(snapshot)?;
    }
    Ok(surface)
}
