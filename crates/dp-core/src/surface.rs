//! Drawing backend abstraction.
//!
//! The controller never talks to a canvas directly. The browser bridge
//! implements [`Surface`] over `CanvasRenderingContext2d`; native hosts and
//! tests use the software raster from `dp-render`.

use crate::error::PadError;
use crate::model::{Color, Preview, Region, StrokeStyle};
use crate::pixels::PixelBuffer;
use kurbo::{Point, Rect};

/// A fixed-size RGBA drawing surface.
pub trait Surface {
    /// Backing-store size in device pixels. Constant for the surface lifetime.
    fn size(&self) -> (u32, u32);

    /// On-screen bounding rectangle, in the same client coordinates as
    /// pointer events.
    fn client_rect(&self) -> Rect;

    /// Paint the whole surface with `color`.
    fn fill(&mut self, color: Color);

    /// Stroke one straight segment as a single path.
    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Raw RGBA bytes, row-major, `width * height * 4` long.
    fn read_rgba(&self) -> Result<Vec<u8>, PadError>;

    /// Export the current contents as a displayable image.
    fn preview(&self) -> Result<Preview, PadError>;
}

/// Receives the current preview after every stroke segment.
pub trait PreviewTarget {
    fn show_preview(&mut self, preview: Preview) -> Result<(), PadError>;
}

/// Outbound "submit image data" boundary: delivers the pixel buffer to the
/// prediction backend. Fire-and-forget; no response is consumed.
pub trait SubmitChannel {
    fn submit(&mut self, channel: &str, pixels: &PixelBuffer) -> Result<(), PadError>;
}

/// Shows or hides a page region.
pub trait RegionView {
    fn set_visible(&mut self, region: Region, visible: bool) -> Result<(), PadError>;
}
