//! Stroke coverage and blending for the software raster.
//!
//! A stroke segment is a round-capped capsule around its centerline. Each
//! pixel is sampled at its center and gets a one-pixel linear ramp at the
//! shape edge, which is close to what browser canvases produce for
//! axis-aligned and diagonal pen strokes.

use dp_core::model::Color;
use kurbo::{Line, ParamCurveNearest, Point};

/// Accuracy passed to kurbo's nearest-point query. Exact for lines.
const NEAREST_ACCURACY: f64 = 1e-9;

/// Linear ramp: 0 when `inside <= -0.5`, 1 when `inside >= 0.5`.
fn edge(inside: f64) -> f64 {
    (inside + 0.5).clamp(0.0, 1.0)
}

/// Fraction of the pixel centered at `p` covered by the stroked `line`.
///
/// A zero-length line still paints a dot of diameter `width`.
pub fn coverage(line: Line, p: Point, width: f64) -> f64 {
    let d = line.nearest(p, NEAREST_ACCURACY).distance_sq.sqrt();
    edge(width / 2.0 - d)
}

/// Source-over blend of `color` at `coverage` into one RGBA pixel.
pub fn blend(dst: &mut [u8], color: Color, coverage: f64) {
    let alpha = coverage * f64::from(color.a) / 255.0;
    if alpha <= 0.0 {
        return;
    }
    let src = [color.r, color.g, color.b];
    for (channel, &s) in dst.iter_mut().zip(src.iter()) {
        let mixed = f64::from(s) * alpha + f64::from(*channel) * (1.0 - alpha);
        *channel = mixed.round().clamp(0.0, 255.0) as u8;
    }
    let dst_alpha = f64::from(dst[3]) / 255.0;
    dst[3] = ((alpha + dst_alpha * (1.0 - alpha)) * 255.0).round() as u8;
}
