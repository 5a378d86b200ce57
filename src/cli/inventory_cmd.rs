//! Inventory command handler

use std::path::PathBuf;
use std::process::ExitCode;

use crate::application::ports::{InventoryError, InventoryStore};
use crate::infrastructure::JsonInventoryStore;

use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::args::InventoryAction;
use super::presenter::Presenter;

/// Open the inventory file and run the action against it
pub async fn run_inventory_command(
    action: InventoryAction,
    path: PathBuf,
    presenter: &Presenter,
) -> ExitCode {
    let result = match JsonInventoryStore::open(path).await {
        Ok(store) => handle_inventory_command(action, &store, presenter).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Handle inventory subcommand
pub async fn handle_inventory_command<S: InventoryStore>(
    action: InventoryAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), InventoryError> {
    match action {
        InventoryAction::List => {
            let inventory = store.snapshot().await?;
            if inventory.is_empty() {
                presenter.info("Inventory is empty");
            }
            for (name, count) in inventory.iter() {
                presenter.stock_line(name, count);
            }
        }
        InventoryAction::Add { name } => {
            let count = store.add(&name).await?;
            presenter.success(&format!("{} (now {})", name, count));
        }
        InventoryAction::Remove { name } => {
            if store.remove(&name).await? {
                presenter.success(&format!("Removed one {}", name));
            } else {
                presenter.warn(&format!("{} is not in the inventory", name));
            }
        }
    }
    Ok(())
}
