//! FridgeSentry CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fridge_sentry::cli::{
    app::{load_merged_config, run_controller, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    device_cmd::{handle_announce, handle_capture},
    inventory_cmd::run_inventory_command,
    presenter::Presenter,
};
use fridge_sentry::domain::config::AppConfig;
use fridge_sentry::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version also arrive here
            return if e.use_stderr() {
                ExitCode::from(EXIT_USAGE_ERROR)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(cli.verbose);
    let presenter = Presenter::new();

    // Build CLI config from args
    let cli_config = AppConfig {
        serial_port: cli.serial_port.clone(),
        inventory_path: cli
            .inventory
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
        ..AppConfig::empty()
    };

    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        None | Some(Commands::Run) => run_controller(load_merged_config(cli_config).await).await,
        Some(Commands::Capture { output }) => {
            handle_capture(&load_merged_config(cli_config).await, &output).await
        }
        Some(Commands::Announce { text }) => {
            handle_announce(&load_merged_config(cli_config).await, &text).await
        }
        Some(Commands::Inventory { action }) => {
            let config = load_merged_config(cli_config).await;
            run_inventory_command(action, config.inventory_path_or_default(), &presenter).await
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the `-v` level
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
