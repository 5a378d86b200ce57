//! Control panel port interfaces: light sensor, buttons, status LEDs

use std::fmt;

use thiserror::Error;

use crate::domain::control::{ButtonState, LightReading};

/// Panel hardware errors
#[derive(Debug, Clone, Error)]
pub enum PanelError {
    #[error("GPIO error: {0}")]
    Gpio(String),

    #[error("Failed to read light sensor: {0}")]
    SensorRead(String),
}

/// Status LEDs on the enclosure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Led {
    /// Lit while the enclosure is open
    Gate,
    /// Lit while an action is being processed
    Busy,
}

impl Led {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gate => "gate",
            Self::Busy => "busy",
        }
    }
}

impl fmt::Display for Led {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Port for the ambient light sensor
pub trait LightSensor: Send {
    fn read(&mut self) -> Result<LightReading, PanelError>;
}

/// Port for the two action buttons
pub trait ButtonPanel: Send {
    /// Sample both buttons once
    fn sample(&mut self) -> ButtonState;
}

/// Port for the status LEDs
pub trait StatusLeds: Send {
    fn set(&mut self, led: Led, on: bool);
}

impl<T: LightSensor + ?Sized> LightSensor for Box<T> {
    fn read(&mut self) -> Result<LightReading, PanelError> {
        (**self).read()
    }
}

impl<T: ButtonPanel + ?Sized> ButtonPanel for Box<T> {
    fn sample(&mut self) -> ButtonState {
        (**self).sample()
    }
}

impl<T: StatusLeds + ?Sized> StatusLeds for Box<T> {
    fn set(&mut self, led: Led, on: bool) {
        (**self).set(led, on)
    }
}
