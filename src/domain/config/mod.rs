//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, GpioConfig, GpioPins, DEFAULT_API_BASE_URL, DEFAULT_BAUD_RATE, DEFAULT_GPIO_PINS,
    DEFAULT_LIGHT_SENSOR, DEFAULT_MODEL, DEFAULT_SERIAL_PORT, DEFAULT_TTS_URL, DEFAULT_VOLUME,
};
