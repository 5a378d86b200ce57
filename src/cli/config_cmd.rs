//! Config command handler

use std::str::FromStr;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, GpioConfig};
use crate::domain::error::ConfigError;
use crate::domain::timing::Duration;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    // Validate before touching the file
    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;

    match read_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            read_value(&config, key).as_deref().unwrap_or(NOT_SET),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Parse and store a value for a known key
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "api_key" => config.api_key = Some(value.to_string()),
        "model" => config.model = Some(value.to_string()),
        "api_base_url" => config.api_base_url = Some(parse_url(key, value)?),
        "tts_url" => config.tts_url = Some(parse_url(key, value)?),
        "serial_port" => config.serial_port = Some(value.to_string()),
        "baud_rate" => config.baud_rate = Some(parse_number(key, value)?),
        "light_threshold" => config.light_threshold = Some(parse_number(key, value)?),
        "light_sensor" => config.light_sensor = Some(value.to_string()),
        "capture_timeout" => config.capture_timeout = Some(parse_duration(key, value)?),
        "playback_timeout" => config.playback_timeout = Some(parse_duration(key, value)?),
        "request_timeout" => config.request_timeout = Some(parse_duration(key, value)?),
        "inventory_path" => config.inventory_path = Some(value.to_string()),
        "volume" => config.volume = Some(parse_volume(key, value)?),
        gpio_key => {
            let pin: u8 = parse_number(key, value)?;
            let gpio = config.gpio.get_or_insert_with(GpioConfig::default);
            match gpio_key {
                "gpio.insert_button" => gpio.insert_button = Some(pin),
                "gpio.remove_button" => gpio.remove_button = Some(pin),
                "gpio.gate_led" => gpio.gate_led = Some(pin),
                "gpio.busy_led" => gpio.busy_led = Some(pin),
                _ => return ensure_known_key(key),
            }
        }
    }
    Ok(())
}

/// Display form of a stored value
fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    let gpio = config.gpio.as_ref();
    match key {
        "api_key" => config.api_key.as_deref().map(mask_api_key),
        "model" => config.model.clone(),
        "api_base_url" => config.api_base_url.clone(),
        "tts_url" => config.tts_url.clone(),
        "serial_port" => config.serial_port.clone(),
        "baud_rate" => config.baud_rate.map(|v| v.to_string()),
        "light_threshold" => config.light_threshold.map(|v| v.to_string()),
        "light_sensor" => config.light_sensor.clone(),
        "capture_timeout" => config.capture_timeout.clone(),
        "playback_timeout" => config.playback_timeout.clone(),
        "request_timeout" => config.request_timeout.clone(),
        "inventory_path" => config.inventory_path.clone(),
        "volume" => config.volume.map(|v| v.to_string()),
        "gpio.insert_button" => gpio.and_then(|g| g.insert_button).map(|v| v.to_string()),
        "gpio.remove_button" => gpio.and_then(|g| g.remove_button).map(|v| v.to_string()),
        "gpio.gate_led" => gpio.and_then(|g| g.gate_led).map(|v| v.to_string()),
        "gpio.busy_led" => gpio.and_then(|g| g.busy_led).map(|v| v.to_string()),
        _ => None,
    }
}

fn parse_duration(key: &str, value: &str) -> Result<String, ConfigError> {
    let duration = value
        .parse::<Duration>()
        .map_err(|e| ConfigError::ValidationError {
            key: key.to_string(),
            message: e.to_string(),
        })?;
    Ok(duration.to_string())
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Invalid number '{}'", value),
    })
}

fn parse_volume(key: &str, value: &str) -> Result<f32, ConfigError> {
    let volume: f32 = parse_number(key, value)?;
    if !(0.0..=1.0).contains(&volume) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: "Value must be between 0.0 and 1.0".to_string(),
        });
    }
    Ok(volume)
}

fn parse_url(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.to_string())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: "Value must be an http:// or https:// URL".to_string(),
        })
    }
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    if key.len() <= 8 {
        "*".repeat(key.len())
    } else {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_api_key_long() {
        let masked = mask_api_key("abcdefghijklmnop");
        assert_eq!(masked, "abcd...mnop");
    }

    #[test]
    fn mask_api_key_short() {
        let masked = mask_api_key("short");
        assert_eq!(masked, "*****");
    }

    #[test]
    fn duration_is_normalized() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "capture_timeout", "5000ms").unwrap();
        assert_eq!(config.capture_timeout.as_deref(), Some("5s"));
    }

    #[test]
    fn duration_invalid() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "playback_timeout", "soon").is_err());
        assert!(config.playback_timeout.is_none());
    }

    #[test]
    fn threshold_must_fit_adc_range() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "light_threshold", "3500").is_ok());
        assert!(apply_value(&mut config, "light_threshold", "70000").is_err());
        assert_eq!(config.light_threshold, Some(3500));
    }

    #[test]
    fn volume_range() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "volume", "0.8").is_ok());
        assert!(apply_value(&mut config, "volume", "1.5").is_err());
        assert!(apply_value(&mut config, "volume", "loud").is_err());
    }

    #[test]
    fn url_requires_scheme() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "tts_url", "localhost:5002").is_err());
        assert!(apply_value(&mut config, "tts_url", "http://localhost:5002/api/tts").is_ok());
    }

    #[test]
    fn gpio_pin_creates_table() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "gpio.busy_led", "5").unwrap();
        assert_eq!(config.gpio.as_ref().and_then(|g| g.busy_led), Some(5));
        assert_eq!(read_value(&config, "gpio.busy_led").as_deref(), Some("5"));
        assert!(read_value(&config, "gpio.gate_led").is_none());
    }

    #[test]
    fn api_key_is_masked_on_read() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "api_key", "sk-abcdefghijkl").unwrap();
        assert_eq!(read_value(&config, "api_key").as_deref(), Some("sk-a...ijkl"));
    }
}
