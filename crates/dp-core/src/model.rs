//! Core data model for the drawing pad.
//!
//! The pad paints with exactly two colors: [`BACKGROUND`] (pure black) and
//! [`INK`] (pure white). Pixel extraction relies on this, since every channel
//! of a black/white pixel (and of the anti-aliased grays in between) carries
//! the same value. Introducing a colored ink means revisiting
//! [`PixelBuffer::from_rgba`](crate::pixels::PixelBuffer::from_rgba).

use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// 8-bit RGBA color, matching the canvas backing store layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Emit as a CSS color string: `#RRGGBB` when opaque, `#RRGGBBAA` otherwise.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// True when all three color channels are equal.
    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

/// Fill color of an empty surface.
pub const BACKGROUND: Color = Color::BLACK;

/// Stroke color of the pen.
pub const INK: Color = Color::WHITE;

// ─── Stroke style ────────────────────────────────────────────────────────

/// Pen parameters for one stroke segment. Ends are always round-capped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Line width in device pixels.
    pub width: f64,
    pub color: Color,
}

impl StrokeStyle {
    /// `CanvasRenderingContext2D.lineCap` for every pad stroke.
    pub const LINE_CAP: &'static str = "round";

    /// The pad's pen: white ink.
    pub fn pen(width: f64) -> Self {
        Self { width, color: INK }
    }
}

// ─── Result regions ──────────────────────────────────────────────────────

/// Page regions whose visibility the pad drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    CountPlot,
    CountMatrix,
    ProbPlot,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::CountPlot, Region::CountMatrix, Region::ProbPlot];

    /// Regions hidden while a prediction is on screen.
    pub const RESULT_PLOTS: [Region; 2] = [Region::CountPlot, Region::CountMatrix];

    pub fn name(self) -> &'static str {
        match self {
            Self::CountPlot => "count_plot",
            Self::CountMatrix => "count_matrix",
            Self::ProbPlot => "prob_plot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    pub fn is_shown(self) -> bool {
        matches!(self, Self::Shown)
    }

    /// CSS `display` value for this state.
    pub fn css_display(self) -> &'static str {
        match self {
            Self::Shown => "block",
            Self::Hidden => "none",
        }
    }
}

/// UI-state flags: one visibility per region plus stroke-capture interactivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStates {
    pub count_plot: Visibility,
    pub count_matrix: Visibility,
    pub prob_plot: Visibility,
    /// Whether the input canvas accepts strokes.
    pub capturing: bool,
}

impl Default for RegionStates {
    /// The post-reset state: result plots shown, prediction hidden, drawing enabled.
    fn default() -> Self {
        Self {
            count_plot: Visibility::Shown,
            count_matrix: Visibility::Shown,
            prob_plot: Visibility::Hidden,
            capturing: true,
        }
    }
}

impl RegionStates {
    pub fn get(&self, region: Region) -> Visibility {
        match region {
            Region::CountPlot => self.count_plot,
            Region::CountMatrix => self.count_matrix,
            Region::ProbPlot => self.prob_plot,
        }
    }

    pub fn set(&mut self, region: Region, visibility: Visibility) {
        match region {
            Region::CountPlot => self.count_plot = visibility,
            Region::CountMatrix => self.count_matrix = visibility,
            Region::ProbPlot => self.prob_plot = visibility,
        }
    }
}

// ─── Preview ─────────────────────────────────────────────────────────────

/// Displayable export of the surface, assigned to the preview image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// `data:image/png;base64,...` as produced by `HTMLCanvasElement.toDataURL`.
    DataUrl(String),
    /// Encoded PNG bytes (native backends).
    Png(Vec<u8>),
}
