//! Pointer-driven stroke rendering.
//!
//! The engine is a two-state machine. A pointer-down paints a dot and starts
//! a stroke; each move paints one segment from the last point; pointer-up or
//! leaving the surface encodes the whole surface and commits it to history
//! as exactly one entry.

use crate::color::SerializableColor;
use crate::history::HistoryStore;
use crate::input::PointerEvent;
use crate::snapshot::RasterSnapshot;
use crate::surface::Surface;
use crate::tools::ToolSettings;
use kurbo::Point;

/// Stroke state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Stroking {
        /// Last rendered position.
        last: Point,
    },
}

/// Turns pointer input into pixels on an owned surface.
///
/// Without an attached surface every operation is a silent no-op; this is
/// the normal state while the host is mounting or unmounting its canvas.
#[derive(Debug)]
pub struct StrokeEngine<S: Surface> {
    surface: Option<S>,
    state: StrokeState,
    background: SerializableColor,
}

impl<S: Surface> StrokeEngine<S> {
    /// Create a detached engine that fills with `background`.
    ///
    /// Alpha is dropped; the page is always filled opaque.
    pub fn new(background: SerializableColor) -> Self {
        if !background.is_opaque() {
            log::warn!("Background {} is translucent, using it opaque", background);
        }
        Self {
            surface: None,
            state: StrokeState::Idle,
            background: background.opaque(),
        }
    }

    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
        self.state = StrokeState::Idle;
    }

    /// Detach and return the surface. Any stroke in progress is dropped.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.state = StrokeState::Idle;
        self.surface.take()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.state, StrokeState::Stroking { .. })
    }

    /// Repaint the whole surface: background fill, then `snapshot` on top.
    ///
    /// Used when a notebook is activated and after undo/redo. A snapshot
    /// that fails to decode leaves the plain background and is logged.
    pub fn load(&mut self, snapshot: Option<&RasterSnapshot>) {
        self.state = StrokeState::Idle;
        let background = self.background;
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let bounds = surface.bounds();
        surface.fill_rect(bounds, background);
        if let Some(snapshot) = snapshot {
            if let Err(e) = surface.draw_snapshot(snapshot) {
                log::warn!("Failed to draw snapshot {:?}: {}", snapshot, e);
            }
        }
    }

    /// Encode the current surface pixels.
    pub fn encode(&self) -> Option<RasterSnapshot> {
        let surface = self.surface.as_ref()?;
        match surface.encode() {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("Failed to encode surface: {}", e);
                None
            }
        }
    }

    /// Feed one pointer event.
    ///
    /// Returns `true` when the event completed a stroke and a snapshot was
    /// pushed into `history`.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        settings: &ToolSettings,
        history: &mut HistoryStore,
    ) -> bool {
        match (self.state, event) {
            (StrokeState::Idle, PointerEvent::Down { position }) => {
                self.begin(position, settings);
                false
            }
            (StrokeState::Stroking { last }, PointerEvent::Move { position }) => {
                self.paint(last, position, settings);
                self.state = StrokeState::Stroking { last: position };
                false
            }
            (StrokeState::Stroking { .. }, PointerEvent::Up | PointerEvent::Leave) => {
                self.state = StrokeState::Idle;
                self.commit(history)
            }
            // A second down while stroking, or any non-down input while idle.
            _ => false,
        }
    }

    fn begin(&mut self, position: Point, settings: &ToolSettings) {
        if self.surface.is_none() || !settings.tool.draws() {
            return;
        }
        self.paint(position, position, settings);
        self.state = StrokeState::Stroking { last: position };
    }

    /// Paint one segment with the style resolved right now, so tool changes
    /// mid-stroke apply from the next segment on.
    fn paint(&mut self, from: Point, to: Point, settings: &ToolSettings) {
        let Some(style) = settings.stroke_style(self.background) else {
            return;
        };
        if let Some(surface) = self.surface.as_mut() {
            surface.stroke_segment(from, to, &style);
        }
    }

    fn commit(&mut self, history: &mut HistoryStore) -> bool {
        match self.encode() {
            Some(snapshot) => {
                history.push(snapshot);
                true
            }
            None => false,
        }
    }

    /// Replace the surface with a freshly filled one and commit it like a
    /// stroke. Returns `false` when no surface is attached.
    pub fn clear(&mut self, history: &mut HistoryStore) -> bool {
        self.state = StrokeState::Idle;
        let Some(surface) = self.surface.as_ref() else {
            return false;
        };
        let mut fresh = surface.blank();
        let bounds = fresh.bounds();
        fresh.fill_rect(bounds, self.background);
        let snapshot = match fresh.encode() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Failed to encode cleared surface: {}", e);
                return false;
            }
        };
        self.surface = Some(fresh);
        history.push(snapshot);
        true
    }
}
