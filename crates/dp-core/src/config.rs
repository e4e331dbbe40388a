//! Pad configuration: surface size, pen width, and the page element ids
//! the browser bridge wires to.

use crate::error::PadError;
use crate::model::Region;
use serde::Deserialize;

/// Configuration for a drawing pad.
///
/// Every field has a default matching the stock page layout, so a partial
/// JSON object (or none at all) is enough.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Backing-store width in pixels. Default: **280**.
    pub width: u32,
    /// Backing-store height in pixels. Default: **280**.
    pub height: u32,
    /// Pen width in device pixels. Default: **28**.
    pub line_width: f64,

    /// Backend input channel that receives the pixel buffer.
    pub input_channel: String,

    pub canvas_id: String,
    /// `<img>` that mirrors the canvas after every stroke segment.
    pub preview_id: String,
    pub count_plot_id: String,
    pub count_matrix_id: String,
    pub prob_plot_id: String,

    /// Average-pool factor applied before submit (10 turns 280×280 into 28×28).
    /// Default: **none**, the full-resolution buffer is sent.
    pub downsample: Option<u32>,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            width: 280,
            height: 280,
            line_width: 28.0,
            input_channel: "canvas_image".to_string(),
            canvas_id: "input-canvas".to_string(),
            preview_id: "canvas-img".to_string(),
            count_plot_id: Region::CountPlot.name().to_string(),
            count_matrix_id: Region::CountMatrix.name().to_string(),
            prob_plot_id: Region::ProbPlot.name().to_string(),
            downsample: None,
        }
    }
}

impl PadConfig {
    /// Parse a JSON object. An empty or whitespace-only string yields the defaults.
    ///
    /// # Errors
    /// Returns [`PadError::Config`] on malformed JSON and
    /// [`PadError::InvalidConfig`] if the values fail [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, PadError> {
        let config = if json.trim().is_empty() {
            Self::default()
        } else {
            serde_json::from_str(json)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PadError> {
        if self.width == 0 || self.height == 0 {
            return Err(PadError::InvalidConfig(format!(
                "surface size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(PadError::InvalidConfig(format!(
                "line_width {} must be positive",
                self.line_width
            )));
        }
        if self.input_channel.is_empty() {
            return Err(PadError::InvalidConfig("input_channel is empty".into()));
        }
        if let Some(factor) = self.downsample
            && (factor == 0 || self.width % factor != 0 || self.height % factor != 0)
        {
            return Err(PadError::InvalidConfig(format!(
                "downsample factor {factor} does not divide {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Page element id of a result region.
    pub fn region_id(&self, region: Region) -> &str {
        match region {
            Region::CountPlot => &self.count_plot_id,
            Region::CountMatrix => &self.count_matrix_id,
            Region::ProbPlot => &self.prob_plot_id,
        }
    }

    /// Number of pixels in the backing store.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
