//! NoteCanvas Core Library
//!
//! Platform-agnostic history, stroke and notebook logic for the NoteCanvas
//! sketching app. Pixels are produced by a [`Surface`] implementation that
//! lives outside this crate.

pub mod color;
pub mod history;
pub mod input;
pub mod notebook;
pub mod session;
pub mod snapshot;
pub mod storage;
pub mod stroke;
pub mod surface;
pub mod tools;

pub use color::SerializableColor;
pub use history::HistoryStore;
pub use input::{PointerEvent, PointerPhase, RawPointerInput};
pub use notebook::{Notebook, NotebookKind};
pub use session::NotebookSession;
pub use snapshot::RasterSnapshot;
pub use storage::{MemoryRepository, NotebookRepository, StorageError, StorageResult};
pub use stroke::{StrokeEngine, StrokeState};
pub use surface::{
    DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, Surface, SurfaceError, SurfaceResult,
};
pub use tools::{LineCap, LineJoin, StrokeStyle, ToolKind, ToolSettings};
