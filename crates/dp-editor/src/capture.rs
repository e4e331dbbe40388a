//! Stroke-capture state.
//!
//! The browser bridge adds or removes its document listeners whenever this
//! flag actually flips, so a repeated `begin` never registers a second set of
//! handlers and a move is never painted twice.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeCapture {
    active: bool,
}

impl Default for StrokeCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeCapture {
    /// Capture starts enabled.
    pub fn new() -> Self {
        Self { active: true }
    }

    /// Enable capture. Returns `false` if it was already enabled.
    pub fn begin(&mut self) -> bool {
        let changed = !self.active;
        self.active = true;
        changed
    }

    /// Disable capture. Returns `false` if it was already disabled.
    pub fn end(&mut self) -> bool {
        let changed = self.active;
        self.active = false;
        changed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
