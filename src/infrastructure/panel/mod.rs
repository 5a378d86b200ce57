//! Control panel adapters: light sensor, buttons and status LEDs

mod iio;
mod noop;
#[cfg(feature = "gpio")]
mod rppal;

pub use iio::IioLightSensor;
pub use noop::{NoOpButtons, NoOpLeds};
#[cfg(feature = "gpio")]
pub use self::rppal::{RppalButtons, RppalLeds};

use crate::application::ports::{ButtonPanel, PanelError, StatusLeds};
use crate::domain::config::GpioPins;

/// Boxed button and LED adapters for the resolved pin assignment
pub type PanelIo = (Box<dyn ButtonPanel>, Box<dyn StatusLeds>);

/// Create GPIO-backed buttons and LEDs
#[cfg(feature = "gpio")]
pub fn create_panel(pins: GpioPins) -> Result<PanelIo, PanelError> {
    let buttons = RppalButtons::new(pins.insert_button, pins.remove_button)?;
    let leds = RppalLeds::new(pins.gate_led, pins.busy_led)?;
    Ok((Box::new(buttons), Box::new(leds)))
}

/// Without GPIO support the buttons never fire and the LEDs stay dark
#[cfg(not(feature = "gpio"))]
pub fn create_panel(pins: GpioPins) -> Result<PanelIo, PanelError> {
    tracing::warn!(
        ?pins,
        "Built without the gpio feature; buttons and LEDs are disabled"
    );
    Ok((Box::new(NoOpButtons::new()), Box::new(NoOpLeds::new())))
}
