//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the adapter wiring for each subcommand.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod device_cmd;
pub mod inventory_cmd;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{
    load_merged_config, run_controller, ControllerError, EXIT_ERROR, EXIT_SUCCESS,
    EXIT_USAGE_ERROR,
};
pub use args::{Cli, Commands, ConfigAction, InventoryAction};
pub use presenter::Presenter;
