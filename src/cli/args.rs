//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// FridgeSentry - light-gated fridge inventory controller
#[derive(Parser, Debug)]
#[command(name = "fridge-sentry")]
#[command(version)]
#[command(about = "Fridge inventory controller with serial camera capture, AI recognition and spoken feedback")]
#[command(long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Serial device the camera is attached to
    #[arg(long, value_name = "DEVICE", global = true)]
    pub serial_port: Option<String>,

    /// Inventory file
    #[arg(long, value_name = "FILE", global = true)]
    pub inventory: Option<PathBuf>,

    /// Subcommand (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the controller loop until interrupted
    Run,
    /// Capture a single image from the camera
    Capture {
        /// Write the JPEG to this file
        #[arg(short = 'o', long, value_name = "FILE", default_value = "capture.jpg")]
        output: PathBuf,
    },
    /// Speak a text through the TTS service
    Announce {
        /// Text to speak
        text: String,
    },
    /// Inspect or edit the inventory
    Inventory {
        #[command(subcommand)]
        action: InventoryAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Inventory action subcommands
#[derive(Subcommand, Debug)]
pub enum InventoryAction {
    /// List stocked products
    List,
    /// Add one unit of a product
    Add {
        /// Product name
        name: String,
    },
    /// Remove one unit of a product
    Remove {
        /// Product name
        name: String,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_key",
    "model",
    "api_base_url",
    "tts_url",
    "serial_port",
    "baud_rate",
    "light_threshold",
    "light_sensor",
    "capture_timeout",
    "playback_timeout",
    "request_timeout",
    "inventory_path",
    "volume",
    "gpio.insert_button",
    "gpio.remove_button",
    "gpio.gate_led",
    "gpio.busy_led",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
