//! Software rendering backend for the drawing pad.

pub mod paint;
pub mod raster;

pub use raster::Raster;
