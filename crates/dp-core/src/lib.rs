pub mod config;
pub mod error;
pub mod model;
pub mod pixels;
pub mod surface;

pub use config::PadConfig;
pub use error::PadError;
pub use model::*;
pub use pixels::PixelBuffer;
pub use surface::{PreviewTarget, RegionView, SubmitChannel, Surface};

// Re-export kurbo geometry so downstream crates share one Point/Rect type
pub use kurbo::{Point, Rect};
