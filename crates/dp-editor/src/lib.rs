pub mod capture;
pub mod input;
pub mod pad;

pub use capture::StrokeCapture;
pub use input::{InputEvent, PRIMARY_BUTTON, Signal};
pub use pad::DrawingPad;
