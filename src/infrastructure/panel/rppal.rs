//! Raspberry Pi GPIO adapters built on `rppal`

use rppal::gpio::{Gpio, InputPin, OutputPin};

use crate::application::ports::{ButtonPanel, Led, PanelError, StatusLeds};
use crate::domain::control::ButtonState;

fn gpio() -> Result<Gpio, PanelError> {
    Gpio::new().map_err(|e| PanelError::Gpio(e.to_string()))
}

/// Active-low push buttons with internal pull-ups
pub struct RppalButtons {
    insert: InputPin,
    remove: InputPin,
}

impl RppalButtons {
    pub fn new(insert_pin: u8, remove_pin: u8) -> Result<Self, PanelError> {
        let gpio = gpio()?;
        let input = |pin: u8| -> Result<InputPin, PanelError> {
            gpio.get(pin)
                .map(|p| p.into_input_pullup())
                .map_err(|e| PanelError::Gpio(format!("pin {}: {}", pin, e)))
        };

        Ok(Self {
            insert: input(insert_pin)?,
            remove: input(remove_pin)?,
        })
    }
}

impl ButtonPanel for RppalButtons {
    fn sample(&mut self) -> ButtonState {
        ButtonState::new(self.insert.is_low(), self.remove.is_low())
    }
}

/// Gate and busy LEDs driven high when lit
pub struct RppalLeds {
    gate: OutputPin,
    busy: OutputPin,
}

impl RppalLeds {
    pub fn new(gate_pin: u8, busy_pin: u8) -> Result<Self, PanelError> {
        let gpio = gpio()?;
        let output = |pin: u8| -> Result<OutputPin, PanelError> {
            gpio.get(pin)
                .map(|p| p.into_output_low())
                .map_err(|e| PanelError::Gpio(format!("pin {}: {}", pin, e)))
        };

        Ok(Self {
            gate: output(gate_pin)?,
            busy: output(busy_pin)?,
        })
    }
}

impl StatusLeds for RppalLeds {
    fn set(&mut self, led: Led, on: bool) {
        let pin = match led {
            Led::Gate => &mut self.gate,
            Led::Busy => &mut self.busy,
        };
        if on {
            pin.set_high();
        } else {
            pin.set_low();
        }
    }
}
