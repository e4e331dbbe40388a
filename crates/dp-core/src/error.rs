use thiserror::Error;

/// Errors surfaced by the pad and its backends.
#[derive(Debug, Error)]
pub enum PadError {
    /// A UI element the pad is wired to does not exist on the page.
    #[error("missing UI element #{0}")]
    MissingElement(String),

    #[error("canvas 2D context unavailable")]
    MissingContext,

    /// The surface backing store does not hold `width * height` RGBA pixels.
    #[error("pixel data has {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("cannot downsample {width}x{height} by factor {factor}")]
    Downsample { width: u32, height: u32, factor: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// Failure inside a drawing or submit backend (JS exception, encoder error).
    #[error("backend error: {0}")]
    Backend(String),
}
