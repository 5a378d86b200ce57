//! Inventory store port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::inventory::Inventory;

/// Inventory persistence errors
#[derive(Debug, Clone, Error)]
pub enum InventoryError {
    #[error("Failed to read inventory: {0}")]
    ReadError(String),

    #[error("Failed to parse inventory: {0}")]
    ParseError(String),

    #[error("Failed to write inventory: {0}")]
    WriteError(String),
}

/// Port for the persistent name -> count store
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Add one unit of a product, returning its new count
    async fn add(&self, name: &str) -> Result<u32, InventoryError>;

    /// Remove one unit of a product. Returns false if it was not stocked.
    async fn remove(&self, name: &str) -> Result<bool, InventoryError>;

    /// Current contents
    async fn snapshot(&self) -> Result<Inventory, InventoryError>;
}
