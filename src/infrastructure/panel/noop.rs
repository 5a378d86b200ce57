//! No-op panel adapters
//!
//! Used when the binary is built without GPIO support.

use crate::application::ports::{ButtonPanel, Led, StatusLeds};
use crate::domain::control::ButtonState;

/// Buttons that are never pressed
#[derive(Debug, Default)]
pub struct NoOpButtons;

impl NoOpButtons {
    pub fn new() -> Self {
        Self
    }
}

impl ButtonPanel for NoOpButtons {
    fn sample(&mut self) -> ButtonState {
        ButtonState::default()
    }
}

/// LEDs that ignore every update
#[derive(Debug, Default)]
pub struct NoOpLeds;

impl NoOpLeds {
    pub fn new() -> Self {
        Self
    }
}

impl StatusLeds for NoOpLeds {
    fn set(&mut self, _led: Led, _on: bool) {}
}
