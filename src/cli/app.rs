//! App runner and adapter wiring

use std::env;
use std::process::ExitCode;

use thiserror::Error;

use crate::application::ports::{ConfigStore, InventoryError, PanelError, SerialError};
use crate::application::{AnnouncementPlayer, EventLoop, Hardware, ImageFramer, Services};
use crate::domain::capture::{CaptureLimits, MAX_FRAME_SIZE};
use crate::domain::config::AppConfig;
use crate::domain::control::LightGate;
use crate::infrastructure::{
    create_panel, HttpSpeechSynthesizer, IioLightSensor, JsonInventoryStore, OpenAiRecognizer,
    RodioOutput, SerialCamera, SerialPortLink, SystemClock, XdgConfigStore,
};

use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Errors raised while wiring the controller together
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Missing API key. Set OPENAI_API_KEY environment variable or run 'fridge-sentry config set api_key <key>'")]
    MissingApiKey,

    #[error(transparent)]
    Serial(#[from] SerialError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Panel(#[from] PanelError),

    #[error("Failed to setup signal handler: {0}")]
    Signal(#[from] std::io::Error),
}

/// Camera on the configured serial port
pub type ConfiguredCamera = SerialCamera<SerialPortLink, SystemClock>;

/// Announcer using the configured TTS server and audio device
pub type ConfiguredAnnouncer = AnnouncementPlayer<HttpSpeechSynthesizer, RodioOutput, SystemClock>;

/// Run the controller loop until SIGINT/SIGTERM
pub async fn run_controller(config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    match build_and_run(&config, &presenter).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn build_and_run(config: &AppConfig, presenter: &Presenter) -> Result<(), ControllerError> {
    // Fail fast before touching any hardware
    let api_key = require_api_key(config)?;

    let shutdown = ShutdownSignal::new();
    shutdown.setup().await?;

    let clock = SystemClock::new();
    let camera = open_camera(config, clock)?;
    let inventory = JsonInventoryStore::open(config.inventory_path_or_default()).await?;
    let (buttons, leds) = create_panel(config.gpio_pins_or_default())?;

    let hardware = Hardware {
        sensor: IioLightSensor::new(config.light_sensor_or_default()),
        buttons,
        leds,
    };
    let services = Services {
        camera,
        recognizer: build_recognizer(config, api_key),
        inventory,
        announcer: build_announcer(config, clock),
    };

    let gate = LightGate::new(config.light_threshold_or_default());
    let mut controller = EventLoop::new(gate, hardware, services);

    presenter.info("Controller running. Press Ctrl+C to stop.");
    controller.run(shutdown.flag()).await;
    presenter.success("Controller stopped");

    Ok(())
}

/// Open the serial camera with the configured port and capture timeout
pub fn open_camera(
    config: &AppConfig,
    clock: SystemClock,
) -> Result<ConfiguredCamera, ControllerError> {
    let link = SerialPortLink::open(
        config.serial_port_or_default(),
        config.baud_rate_or_default(),
    )?;
    let limits = CaptureLimits::new(MAX_FRAME_SIZE, config.capture_timeout_or_default());
    Ok(SerialCamera::new(ImageFramer::with_limits(link, clock, limits)))
}

/// Recognizer for the configured endpoint and model
pub fn build_recognizer(config: &AppConfig, api_key: String) -> OpenAiRecognizer {
    OpenAiRecognizer::new(api_key)
        .with_model(config.model_or_default())
        .with_base_url(config.api_base_url_or_default())
        .with_timeout(config.request_timeout_or_default())
}

/// Announcer for the configured TTS server, volume and playback timeout
pub fn build_announcer(config: &AppConfig, clock: SystemClock) -> ConfiguredAnnouncer {
    let synthesizer = HttpSpeechSynthesizer::new(config.tts_url_or_default())
        .with_timeout(config.request_timeout_or_default());
    AnnouncementPlayer::new(
        synthesizer,
        RodioOutput::new(config.volume_or_default()),
        clock,
        config.playback_timeout_or_default(),
    )
}

/// API key from the merged config
pub fn require_api_key(config: &AppConfig) -> Result<String, ControllerError> {
    config
        .api_key
        .clone()
        .filter(|key| !key.is_empty())
        .ok_or(ControllerError::MissingApiKey)
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|e| {
        tracing::warn!("Ignoring config file: {}", e);
        AppConfig::empty()
    });

    // Build env config
    let env_config = AppConfig {
        api_key: env::var(API_KEY_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
