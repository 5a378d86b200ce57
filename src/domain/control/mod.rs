//! Control domain module: light gate and button actions

mod action;
mod light;

pub use action::{ButtonState, PendingAction};
pub use light::{LightGate, LightReading, DEFAULT_LIGHT_THRESHOLD};
