//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::control::DEFAULT_LIGHT_THRESHOLD;
use crate::domain::timing::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TTS_URL: &str = "http://localhost:5002/api/tts";
pub const DEFAULT_SERIAL_PORT: &str = "/dev/serial0";
pub const DEFAULT_BAUD_RATE: u32 = 115_200;
pub const DEFAULT_LIGHT_SENSOR: &str = "/sys/bus/iio/devices/iio:device0/in_voltage0_raw";
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Default BCM pin numbers: insert button, remove button, gate LED, busy LED
pub const DEFAULT_GPIO_PINS: GpioPins = GpioPins {
    insert_button: 17,
    remove_button: 27,
    gate_led: 22,
    busy_led: 23,
};

/// Resolved GPIO pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioPins {
    pub insert_button: u8,
    pub remove_button: u8,
    pub gate_led: u8,
    pub busy_led: u8,
}

/// GPIO pin configuration (BCM numbering).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GpioConfig {
    pub insert_button: Option<u8>,
    pub remove_button: Option<u8>,
    pub gate_led: Option<u8>,
    pub busy_led: Option<u8>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub api_base_url: Option<String>,
    pub tts_url: Option<String>,
    pub serial_port: Option<String>,
    pub baud_rate: Option<u32>,
    pub light_threshold: Option<u16>,
    pub light_sensor: Option<String>,
    pub capture_timeout: Option<String>,
    pub playback_timeout: Option<String>,
    pub request_timeout: Option<String>,
    pub inventory_path: Option<String>,
    pub volume: Option<f32>,
    pub gpio: Option<GpioConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            model: Some(DEFAULT_MODEL.to_string()),
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
            tts_url: Some(DEFAULT_TTS_URL.to_string()),
            serial_port: Some(DEFAULT_SERIAL_PORT.to_string()),
            baud_rate: Some(DEFAULT_BAUD_RATE),
            light_threshold: Some(DEFAULT_LIGHT_THRESHOLD),
            light_sensor: Some(DEFAULT_LIGHT_SENSOR.to_string()),
            capture_timeout: Some(Duration::default_capture_timeout().to_string()),
            playback_timeout: Some(Duration::default_playback_timeout().to_string()),
            request_timeout: Some(Duration::default_request_timeout().to_string()),
            inventory_path: None,
            volume: Some(DEFAULT_VOLUME),
            gpio: Some(GpioConfig {
                insert_button: Some(DEFAULT_GPIO_PINS.insert_button),
                remove_button: Some(DEFAULT_GPIO_PINS.remove_button),
                gate_led: Some(DEFAULT_GPIO_PINS.gate_led),
                busy_led: Some(DEFAULT_GPIO_PINS.busy_led),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            model: other.model.or(self.model),
            api_base_url: other.api_base_url.or(self.api_base_url),
            tts_url: other.tts_url.or(self.tts_url),
            serial_port: other.serial_port.or(self.serial_port),
            baud_rate: other.baud_rate.or(self.baud_rate),
            light_threshold: other.light_threshold.or(self.light_threshold),
            light_sensor: other.light_sensor.or(self.light_sensor),
            capture_timeout: other.capture_timeout.or(self.capture_timeout),
            playback_timeout: other.playback_timeout.or(self.playback_timeout),
            request_timeout: other.request_timeout.or(self.request_timeout),
            inventory_path: other.inventory_path.or(self.inventory_path),
            volume: other.volume.or(self.volume),
            gpio: Self::merge_gpio_config(self.gpio, other.gpio),
        }
    }

    /// Merge GPIO config sections
    fn merge_gpio_config(base: Option<GpioConfig>, other: Option<GpioConfig>) -> Option<GpioConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(GpioConfig {
                insert_button: o.insert_button.or(b.insert_button),
                remove_button: o.remove_button.or(b.remove_button),
                gate_led: o.gate_led.or(b.gate_led),
                busy_led: o.busy_led.or(b.busy_led),
            }),
        }
    }

    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn api_base_url_or_default(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn tts_url_or_default(&self) -> &str {
        self.tts_url.as_deref().unwrap_or(DEFAULT_TTS_URL)
    }

    pub fn serial_port_or_default(&self) -> &str {
        self.serial_port.as_deref().unwrap_or(DEFAULT_SERIAL_PORT)
    }

    pub fn baud_rate_or_default(&self) -> u32 {
        self.baud_rate.unwrap_or(DEFAULT_BAUD_RATE)
    }

    pub fn light_threshold_or_default(&self) -> u16 {
        self.light_threshold.unwrap_or(DEFAULT_LIGHT_THRESHOLD)
    }

    pub fn light_sensor_or_default(&self) -> PathBuf {
        PathBuf::from(self.light_sensor.as_deref().unwrap_or(DEFAULT_LIGHT_SENSOR))
    }

    /// Get capture_timeout as parsed Duration, or default if not set/invalid
    pub fn capture_timeout_or_default(&self) -> Duration {
        Self::parse_or(&self.capture_timeout, Duration::default_capture_timeout())
    }

    /// Get playback_timeout as parsed Duration, or default if not set/invalid
    pub fn playback_timeout_or_default(&self) -> Duration {
        Self::parse_or(&self.playback_timeout, Duration::default_playback_timeout())
    }

    /// Get request_timeout as parsed Duration, or default if not set/invalid
    pub fn request_timeout_or_default(&self) -> Duration {
        Self::parse_or(&self.request_timeout, Duration::default_request_timeout())
    }

    /// Inventory file, defaulting to the user data directory
    pub fn inventory_path_or_default(&self) -> PathBuf {
        match self.inventory_path.as_deref() {
            Some(path) => PathBuf::from(path),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("~/.local/share"))
                .join("fridge-sentry")
                .join("inventory.json"),
        }
    }

    /// Playback volume clamped to 0.0..=1.0
    pub fn volume_or_default(&self) -> f32 {
        self.volume.unwrap_or(DEFAULT_VOLUME).clamp(0.0, 1.0)
    }

    /// Resolved pin assignment, filling gaps with defaults
    pub fn gpio_pins_or_default(&self) -> GpioPins {
        let gpio = self.gpio.clone().unwrap_or_default();
        GpioPins {
            insert_button: gpio.insert_button.unwrap_or(DEFAULT_GPIO_PINS.insert_button),
            remove_button: gpio.remove_button.unwrap_or(DEFAULT_GPIO_PINS.remove_button),
            gate_led: gpio.gate_led.unwrap_or(DEFAULT_GPIO_PINS.gate_led),
            busy_led: gpio.busy_led.unwrap_or(DEFAULT_GPIO_PINS.busy_led),
        }
    }

    fn parse_or(value: &Option<String>, default: Duration) -> Duration {
        value
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default)
    }
}
