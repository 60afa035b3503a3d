//! WebAssembly entry point.
//!
//! JavaScript owns the DOM: it forwards pointer and keyboard events here,
//! blits [`WebApp::pixels`] into a canvas `ImageData` and rebuilds the
//! toolbar and sidebar from [`WebApp::state_json`].

use kurbo::{Point, Rect};
use notecanvas_core::{PointerPhase, ToolKind, storage::LocalStorageRepository};
use wasm_bindgen::prelude::*;

use crate::app::{App, AppConfig, AppError, parse_color, parse_kind};
use crate::ui::UiAction;

/// Install the panic hook and console logger.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to initialize logger");
    log::info!("Starting NoteCanvas (WASM)");
}

fn to_js(error: AppError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn client_rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
    Rect::new(left, top, left + width, top + height)
}

fn touch_phase(phase: &str) -> Option<PointerPhase> {
    match phase {
        "touchstart" | "start" => Some(PointerPhase::Down),
        "touchmove" | "move" => Some(PointerPhase::Move),
        "touchend" | "end" => Some(PointerPhase::Up),
        "touchcancel" | "cancel" => Some(PointerPhase::Leave),
        _ => None,
    }
}

/// The app as seen from JavaScript.
#[wasm_bindgen]
pub struct WebApp {
    app: App<LocalStorageRepository>,
}

#[wasm_bindgen]
impl WebApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebApp, JsValue> {
        let app = App::open(AppConfig::default()).map_err(to_js)?;
        Ok(Self { app })
    }

    pub fn width(&self) -> u32 {
        self.app.config().width
    }

    pub fn height(&self) -> u32 {
        self.app.config().height
    }

    /// Copy of the RGBA pixels for `new ImageData(...)`.
    pub fn pixels(&self) -> Vec<u8> {
        self.app.pixels().to_vec()
    }

    /// UI state as JSON.
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        let state = self.app.ui_state().map_err(to_js)?;
        serde_json::to_string(&state).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    // Pointer handlers take `clientX/Y` and the canvas `getBoundingClientRect()`.

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(
        &mut self,
        x: f64,
        y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> bool {
        self.pointer(PointerPhase::Down, x, y, client_rect(left, top, width, height))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(
        &mut self,
        x: f64,
        y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> bool {
        self.pointer(PointerPhase::Move, x, y, client_rect(left, top, width, height))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> bool {
        self.pointer(PointerPhase::Up, 0.0, 0.0, Rect::ZERO)
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> bool {
        self.pointer(PointerPhase::Leave, 0.0, 0.0, Rect::ZERO)
    }

    /// Touch event; `contacts` holds `clientX, clientY` pairs of every touch.
    pub fn touch(
        &mut self,
        phase: &str,
        contacts: Vec<f64>,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> bool {
        let Some(phase) = touch_phase(phase) else {
            log::warn!("Ignoring unknown touch phase {:?}", phase);
            return false;
        };
        let contacts = contacts
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect();
        self.app
            .handle_touch(phase, contacts, client_rect(left, top, width, height))
    }

    /// Keyboard shortcut. Returns `true` when the key was bound.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool) -> Result<bool, JsValue> {
        let handled = self.app.handle_key(key, ctrl, shift).map_err(to_js)?;
        Ok(handled.is_some())
    }

    #[wasm_bindgen(js_name = selectNotebook)]
    pub fn select_notebook(&mut self, id: String) -> Result<bool, JsValue> {
        self.dispatch(UiAction::SelectNotebook(id))
    }

    #[wasm_bindgen(js_name = createNotebook)]
    pub fn create_notebook(&mut self, name: String, kind: &str) -> Result<bool, JsValue> {
        let kind = parse_kind(kind).map_err(to_js)?;
        self.dispatch(UiAction::CreateNotebook { name, kind })
    }

    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&mut self, tool: &str) -> Result<bool, JsValue> {
        let tool = tool.parse::<ToolKind>().map_err(|e| JsValue::from_str(&e))?;
        self.dispatch(UiAction::SetTool(tool))
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, hex: &str) -> Result<bool, JsValue> {
        let color = parse_color(hex).map_err(to_js)?;
        self.dispatch(UiAction::SetColor(color))
    }

    #[wasm_bindgen(js_name = setThickness)]
    pub fn set_thickness(&mut self, thickness: f64) -> Result<bool, JsValue> {
        self.dispatch(UiAction::SetThickness(thickness))
    }

    pub fn undo(&mut self) -> Result<bool, JsValue> {
        self.dispatch(UiAction::Undo)
    }

    pub fn redo(&mut self) -> Result<bool, JsValue> {
        self.dispatch(UiAction::Redo)
    }

    pub fn clear(&mut self) -> Result<bool, JsValue> {
        self.dispatch(UiAction::Clear)
    }

    pub fn save(&mut self) -> Result<bool, JsValue> {
        self.dispatch(UiAction::Save)
    }

    #[wasm_bindgen(js_name = toggleSidebar)]
    pub fn toggle_sidebar(&mut self) -> Result<bool, JsValue> {
        self.dispatch(UiAction::ToggleSidebar)
    }

    /// Call from `setInterval`; saves when the autosave interval has elapsed.
    pub fn tick(&mut self) -> bool {
        self.app.tick()
    }
}

impl WebApp {
    fn pointer(&mut self, phase: PointerPhase, x: f64, y: f64, bounds: Rect) -> bool {
        self.app.handle_pointer(phase, Point::new(x, y), bounds)
    }

    fn dispatch(&mut self, action: UiAction) -> Result<bool, JsValue> {
        self.app.handle_action(action).map_err(to_js)
    }
}
