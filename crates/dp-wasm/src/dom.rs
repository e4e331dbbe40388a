//! DOM-backed implementations of the pad's boundary traits.

use dp_core::model::{Color, Preview, Region, StrokeStyle, Visibility};
use dp_core::{
    PadConfig, PadError, PixelBuffer, Point, PreviewTarget, Rect, RegionView, SubmitChannel,
    Surface,
};
use smallvec::SmallVec;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlImageElement,
};

/// Convert a thrown JS value into a backend error.
pub fn js_error(err: JsValue) -> PadError {
    let msg = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    PadError::Backend(msg)
}

/// Look up an element by id and cast it to the expected type.
pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, PadError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PadError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| PadError::MissingElement(format!("{id} (unexpected element type)")))
}

// ─── Canvas ──────────────────────────────────────────────────────────────

/// [`Surface`] over an HTML `<canvas>` 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Size the canvas backing store and acquire its 2D context.
    pub fn new(canvas: HtmlCanvasElement, width: u32, height: u32) -> Result<Self, PadError> {
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or(PadError::MissingContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PadError::MissingContext)?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn client_rect(&self) -> Rect {
        let r = self.canvas.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn fill(&mut self, color: Color) {
        let (w, h) = self.size();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, f64::from(w), f64::from(h));
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.ctx.begin_path();
        self.ctx.set_line_width(style.width);
        self.ctx.set_line_cap(StrokeStyle::LINE_CAP);
        self.ctx.set_stroke_style_str(&style.color.to_css());
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn read_rgba(&self) -> Result<Vec<u8>, PadError> {
        let (w, h) = self.size();
        let image = self
            .ctx
            .get_image_data(0.0, 0.0, f64::from(w), f64::from(h))
            .map_err(js_error)?;
        Ok(image.data().0)
    }

    fn preview(&self) -> Result<Preview, PadError> {
        self.canvas
            .to_data_url_with_type("image/png")
            .map(Preview::DataUrl)
            .map_err(js_error)
    }
}

// ─── Preview image ───────────────────────────────────────────────────────

/// The `<img>` that mirrors the canvas.
pub struct ImagePreview {
    img: HtmlImageElement,
}

impl ImagePreview {
    pub fn new(img: HtmlImageElement) -> Self {
        Self { img }
    }
}

impl PreviewTarget for ImagePreview {
    fn show_preview(&mut self, preview: Preview) -> Result<(), PadError> {
        match preview {
            Preview::DataUrl(url) => {
                self.img.set_src(&url);
                Ok(())
            }
            Preview::Png(_) => Err(PadError::Backend(
                "image preview expects a data URL".to_string(),
            )),
        }
    }
}

// ─── Result regions ──────────────────────────────────────────────────────

/// Result regions resolved once from the page.
pub struct DomRegions {
    elements: SmallVec<[(Region, HtmlElement); 3]>,
}

impl DomRegions {
    /// Resolve every region element by its configured id.
    pub fn new(document: &Document, config: &PadConfig) -> Result<Self, PadError> {
        let mut elements = SmallVec::new();
        for region in Region::ALL {
            let el: HtmlElement = get_element(document, config.region_id(region))?;
            elements.push((region, el));
        }
        Ok(Self { elements })
    }
}

impl RegionView for DomRegions {
    fn set_visible(&mut self, region: Region, visible: bool) -> Result<(), PadError> {
        let Some((_, el)) = self.elements.iter().find(|(r, _)| *r == region) else {
            return Err(PadError::MissingElement(region.name().to_string()));
        };
        let display = if visible {
            Visibility::Shown
        } else {
            Visibility::Hidden
        }
        .css_display();
        el.style().set_property("display", display).map_err(js_error)
    }
}

// ─── Shiny input channel ─────────────────────────────────────────────────

/// Submits pixel buffers through `window.Shiny.setInputValue(name, value)`.
pub struct ShinyChannel {
    global: String,
    method: String,
}

impl Default for ShinyChannel {
    fn default() -> Self {
        Self {
            global: "Shiny".to_string(),
            method: "setInputValue".to_string(),
        }
    }
}

impl SubmitChannel for ShinyChannel {
    fn submit(&mut self, channel: &str, pixels: &PixelBuffer) -> Result<(), PadError> {
        let window = web_sys::window().ok_or_else(|| PadError::Backend("no window".into()))?;
        let target = js_sys::Reflect::get(&window, &JsValue::from_str(&self.global))
            .map_err(js_error)?;
        if target.is_undefined() || target.is_null() {
            return Err(PadError::Backend(format!("{} is not loaded", self.global)));
        }
        let method = js_sys::Reflect::get(&target, &JsValue::from_str(&self.method))
            .map_err(js_error)?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| {
                PadError::Backend(format!("{}.{} is not a function", self.global, self.method))
            })?;

        // Plain array of numbers, which the server decodes as an integer vector
        let values: js_sys::Array = pixels.as_slice().iter().map(|&v| JsValue::from(v)).collect();
        method
            .call2(&target, &JsValue::from_str(channel), &values)
            .map_err(js_error)?;
        Ok(())
    }
}
