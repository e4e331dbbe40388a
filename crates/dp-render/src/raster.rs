//! In-memory RGBA raster implementing [`Surface`].
//!
//! Mirrors an HTML canvas backing store: row-major, four bytes per pixel,
//! starts fully transparent.

use crate::paint::{blend, coverage};
use dp_core::model::{Color, Preview, StrokeStyle};
use dp_core::pixels::CHANNELS;
use dp_core::{PadError, Surface};
use kurbo::{Line, Point, Rect};

#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    /// Top-left corner in client coordinates.
    origin: Point,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * CHANNELS],
            origin: Point::ZERO,
        }
    }

    /// Place the raster at `origin` in client coordinates, as if laid out on a page.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = &self.pixels[i..i + CHANNELS];
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }

    /// Encode the raster as an 8-bit RGBA PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, PadError> {
        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| PadError::Backend(format!("png header: {e}")))?;
        writer
            .write_image_data(&self.pixels)
            .map_err(|e| PadError::Backend(format!("png data: {e}")))?;
        writer
            .finish()
            .map_err(|e| PadError::Backend(format!("png finish: {e}")))?;
        Ok(out)
    }

    /// Pixel-index bounds `[x0, x1) × [y0, y1)` touched by a stroke of `width`.
    fn stroke_bounds(&self, from: Point, to: Point, width: f64) -> (u32, u32, u32, u32) {
        let pad = width / 2.0 + 1.0;
        let clamp_x = |v: f64| v.clamp(0.0, f64::from(self.width)) as u32;
        let clamp_y = |v: f64| v.clamp(0.0, f64::from(self.height)) as u32;
        (
            clamp_x((from.x.min(to.x) - pad).floor()),
            clamp_x((from.x.max(to.x) + pad).ceil()),
            clamp_y((from.y.min(to.y) - pad).floor()),
            clamp_y((from.y.max(to.y) + pad).ceil()),
        )
    }
}

impl Surface for Raster {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn client_rect(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + f64::from(self.width),
            self.origin.y + f64::from(self.height),
        )
    }

    fn fill(&mut self, color: Color) {
        let rgba = [color.r, color.g, color.b, color.a];
        for px in self.pixels.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&rgba);
        }
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        let line = Line::new(from, to);
        let (x0, x1, y0, y1) = self.stroke_bounds(from, to, style.width);
        let stride = self.width as usize * CHANNELS;

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let c = coverage(line, center, style.width);
                if c > 0.0 {
                    let i = y as usize * stride + x as usize * CHANNELS;
                    blend(&mut self.pixels[i..i + CHANNELS], style.color, c);
                }
            }
        }
    }

    fn read_rgba(&self) -> Result<Vec<u8>, PadError> {
        Ok(self.pixels.clone())
    }

    fn preview(&self) -> Result<Preview, PadError> {
        self.encode_png().map(Preview::Png)
    }
}
