//! WASM bridge for the drawing pad — binds the Rust controller to the page.
//!
//! Compiled via `wasm-pack build --target web`. The page creates one
//! `PadApp` after its elements exist and wires its submit/reset buttons to
//! `app.submit()` / `app.reset()`.

mod dom;
mod listeners;
mod logger;

use dom::{CanvasSurface, DomRegions, ImagePreview, ShinyChannel, get_element};
use dp_core::{PadConfig, PadError};
use dp_editor::DrawingPad;
use listeners::CaptureListeners;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlImageElement};

pub(crate) type DomPad = DrawingPad<CanvasSurface, ShinyChannel, DomRegions, ImagePreview>;

fn to_js(err: PadError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// The WASM-facing pad controller.
///
/// Owns the shared pad and the document listeners that feed it. Listener
/// registration follows the pad's capture flag after every call.
#[wasm_bindgen]
pub struct PadApp {
    pad: Rc<RefCell<DomPad>>,
    listeners: CaptureListeners,
}

#[wasm_bindgen]
impl PadApp {
    /// Mount the pad on the current page.
    ///
    /// `config_json` is a (possibly partial) JSON config object; pass `""`
    /// for the stock layout.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<PadApp, JsValue> {
        Self::mount(config_json).map_err(to_js)
    }

    /// Stop drawing, send the pixels to the backend, and show the prediction.
    pub fn submit(&mut self) -> Result<(), JsValue> {
        let result = self.pad.borrow_mut().submit();
        self.sync_listeners()?;
        result.map_err(to_js)
    }

    /// Clear the canvas, resume drawing, and restore the result plots.
    pub fn reset(&mut self) -> Result<(), JsValue> {
        let result = self.pad.borrow_mut().reset();
        self.sync_listeners()?;
        result.map_err(to_js)
    }

    /// Enable stroke capture. Returns `false` if it was already on.
    pub fn start_draw(&mut self) -> Result<bool, JsValue> {
        let changed = self.pad.borrow_mut().begin_capture();
        self.sync_listeners()?;
        Ok(changed)
    }

    /// Disable stroke capture. Returns `false` if it was already off.
    pub fn stop_draw(&mut self) -> Result<bool, JsValue> {
        let changed = self.pad.borrow_mut().end_capture();
        self.sync_listeners()?;
        Ok(changed)
    }

    /// Repaint the canvas black without touching capture or regions.
    pub fn clear(&mut self) {
        self.pad.borrow_mut().clear();
    }

    pub fn is_capturing(&self) -> bool {
        self.pad.borrow().is_capturing()
    }

    /// Get the UI-state flags as JSON:
    /// `{"count_plot":"shown","count_matrix":"shown","prob_plot":"hidden","capturing":true}`
    pub fn states_json(&self) -> String {
        serde_json::to_string(&self.pad.borrow().states()).unwrap_or_default()
    }

    /// Set the console log level (`"error"` … `"trace"`, or `"off"`).
    pub fn set_log_level(&self, level: &str) -> Result<(), JsValue> {
        log::set_max_level(logger::parse_level(level).map_err(to_js)?);
        Ok(())
    }
}

impl PadApp {
    fn mount(config_json: &str) -> Result<PadApp, PadError> {
        logger::init();
        let config = PadConfig::from_json(config_json)?;

        let window = web_sys::window().ok_or_else(|| PadError::MissingElement("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| PadError::MissingElement("document".into()))?;

        let canvas: HtmlCanvasElement = get_element(&document, &config.canvas_id)?;
        let surface = CanvasSurface::new(canvas, config.width, config.height)?;
        let img: HtmlImageElement = get_element(&document, &config.preview_id)?;
        let preview = ImagePreview::new(img);
        let regions = DomRegions::new(&document, &config)?;

        let pad = DrawingPad::new(surface, ShinyChannel::default(), regions, preview, config)?;
        let pad = Rc::new(RefCell::new(pad));

        let mut listeners = CaptureListeners::new(document.into(), &pad);
        listeners.attach()?;
        log::info!("drawing pad mounted");

        Ok(PadApp { pad, listeners })
    }

    fn sync_listeners(&mut self) -> Result<(), JsValue> {
        let capturing = self.pad.borrow().is_capturing();
        self.listeners.sync(capturing).map_err(to_js)?;
        debug_assert_eq!(self.listeners.is_attached(), capturing);
        Ok(())
    }
}
