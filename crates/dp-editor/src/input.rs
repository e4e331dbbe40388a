//! Input abstraction layer.
//!
//! Normalizes DOM mouse events into an `InputEvent` carrying client
//! coordinates and the `buttons` bitmask, so the pad never sees web types.

use dp_core::{Point, Rect};

/// `MouseEvent.buttons` value when only the primary button is held.
pub const PRIMARY_BUTTON: u16 = 1;

/// A pointer event in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer entered the document.
    PointerEnter { x: f64, y: f64, buttons: u16 },
    /// Button pressed.
    PointerDown { x: f64, y: f64, buttons: u16 },
    /// Pointer moved, with whatever buttons are currently held.
    PointerMove { x: f64, y: f64, buttons: u16 },
}

/// DOM event types the pad listens to while capturing strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    MouseMove,
    MouseDown,
    MouseEnter,
}

impl Signal {
    pub const ALL: [Signal; 3] = [Signal::MouseMove, Signal::MouseDown, Signal::MouseEnter];

    /// Event type passed to `addEventListener`.
    pub fn event_type(self) -> &'static str {
        match self {
            Self::MouseMove => "mousemove",
            Self::MouseDown => "mousedown",
            Self::MouseEnter => "mouseenter",
        }
    }

    /// Build the event for this signal from raw DOM values.
    pub fn event(self, x: f64, y: f64, buttons: u16) -> InputEvent {
        match self {
            Self::MouseMove => InputEvent::PointerMove { x, y, buttons },
            Self::MouseDown => InputEvent::PointerDown { x, y, buttons },
            Self::MouseEnter => InputEvent::PointerEnter { x, y, buttons },
        }
    }
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64, buttons: u16) -> Self {
        Self::PointerDown { x, y, buttons }
    }

    pub fn from_pointer_move(x: f64, y: f64, buttons: u16) -> Self {
        Self::PointerMove { x, y, buttons }
    }

    pub fn from_pointer_enter(x: f64, y: f64, buttons: u16) -> Self {
        Self::PointerEnter { x, y, buttons }
    }

    pub fn signal(&self) -> Signal {
        match self {
            Self::PointerEnter { .. } => Signal::MouseEnter,
            Self::PointerDown { .. } => Signal::MouseDown,
            Self::PointerMove { .. } => Signal::MouseMove,
        }
    }

    pub fn client_position(&self) -> Point {
        match *self {
            Self::PointerEnter { x, y, .. }
            | Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. } => Point::new(x, y),
        }
    }

    pub fn buttons(&self) -> u16 {
        match *self {
            Self::PointerEnter { buttons, .. }
            | Self::PointerDown { buttons, .. }
            | Self::PointerMove { buttons, .. } => buttons,
        }
    }

    /// Exactly the primary button is held. Any other combination,
    /// including none, is not a drawing gesture.
    pub fn is_drawing(&self) -> bool {
        self.buttons() == PRIMARY_BUTTON
    }

    /// Position relative to the top-left of `rect`.
    pub fn relative_to(&self, rect: Rect) -> Point {
        let p = self.client_position();
        Point::new(p.x - rect.x0, p.y - rect.y0)
    }
}
