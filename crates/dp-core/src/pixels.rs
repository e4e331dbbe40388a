//! Grayscale pixel extraction from an RGBA backing store.
//!
//! The pad only ever paints black and white, so the red channel of each pixel
//! already equals its grayscale intensity. See [`crate::model::INK`].

use crate::error::PadError;

/// Bytes per pixel in the RGBA backing store.
pub const CHANNELS: usize = 4;

/// Read-only grayscale snapshot of the surface, row-major, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Take the red channel of each pixel in `rgba`.
    ///
    /// # Errors
    /// Returns [`PadError::SizeMismatch`] unless `rgba` holds exactly
    /// `width * height` four-channel pixels.
    pub fn from_rgba(rgba: &[u8], width: u32, height: u32) -> Result<Self, PadError> {
        let pixels = width as usize * height as usize;
        let expected = pixels * CHANNELS;
        if rgba.len() != expected {
            return Err(PadError::SizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }

        let data: Vec<u8> = rgba.chunks_exact(CHANNELS).map(|px| px[0]).collect();
        debug_assert_eq!(data.len(), pixels);

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Intensity at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// One row of intensities.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Some(&self.data[start..start + w])
    }

    /// True when nothing has been drawn (every pixel is background).
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    /// Average-pool `factor × factor` blocks into single pixels.
    ///
    /// 280×280 with factor 10 gives the 28×28 MNIST input size.
    ///
    /// # Errors
    /// Returns [`PadError::Downsample`] if `factor` is zero or does not divide
    /// both dimensions.
    pub fn downsample(&self, factor: u32) -> Result<Self, PadError> {
        if factor == 0 || self.width % factor != 0 || self.height % factor != 0 {
            return Err(PadError::Downsample {
                width: self.width,
                height: self.height,
                factor,
            });
        }
        if factor == 1 {
            return Ok(self.clone());
        }

        let out_w = self.width / factor;
        let out_h = self.height / factor;
        let src_w = self.width as usize;
        let f = factor as usize;
        // Wide enough for factor² × 255 at any u32 factor
        let area = u64::from(factor) * u64::from(factor);

        let mut data = Vec::with_capacity(out_w as usize * out_h as usize);
        for oy in 0..out_h as usize {
            for ox in 0..out_w as usize {
                let mut sum: u64 = 0;
                for dy in 0..f {
                    let row = (oy * f + dy) * src_w + ox * f;
                    sum += self.data[row..row + f].iter().map(|&v| u64::from(v)).sum::<u64>();
                }
                // Round to nearest
                data.push(((sum + area / 2) / area) as u8);
            }
        }

        Ok(Self {
            width: out_w,
            height: out_h,
            data,
        })
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
