//! JSON file inventory store adapter

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ports::{InventoryError, InventoryStore};
use crate::domain::inventory::Inventory;

/// Inventory kept in memory and written through to a JSON file
pub struct JsonInventoryStore {
    path: PathBuf,
    inventory: Mutex<Inventory>,
}

impl JsonInventoryStore {
    /// Open a store, loading existing contents. A missing file is an empty inventory.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, InventoryError> {
        let path = path.into();
        let inventory = Self::load(&path).await?;
        debug!(path = %path.display(), items = inventory.len(), "Inventory loaded");

        Ok(Self {
            path,
            inventory: Mutex::new(inventory),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(path: &Path) -> Result<Inventory, InventoryError> {
        if !path.exists() {
            return Ok(Inventory::new());
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| InventoryError::ReadError(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| InventoryError::ParseError(e.to_string()))
    }

    async fn save(&self, inventory: &Inventory) -> Result<(), InventoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| InventoryError::WriteError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(inventory)
            .map_err(|e| InventoryError::WriteError(e.to_string()))?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| InventoryError::WriteError(e.to_string()))
    }
}

#[async_trait]
impl InventoryStore for JsonInventoryStore {
    async fn add(&self, name: &str) -> Result<u32, InventoryError> {
        let mut inventory = self.inventory.lock().await;
        // Memory only changes once the file does
        let mut updated = inventory.clone();
        let count = updated.add(name);
        self.save(&updated).await?;
        *inventory = updated;
        Ok(count)
    }

    async fn remove(&self, name: &str) -> Result<bool, InventoryError> {
        let mut inventory = self.inventory.lock().await;
        let mut updated = inventory.clone();
        if !updated.remove(name) {
            return Ok(false);
        }
        self.save(&updated).await?;
        *inventory = updated;
        Ok(true)
    }

    async fn snapshot(&self) -> Result<Inventory, InventoryError> {
        Ok(self.inventory.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = JsonInventoryStore::open(temp.path().join("inventory.json"))
            .await
            .unwrap();

        assert!(store.snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn contents_survive_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("inventory.json");

        let store = JsonInventoryStore::open(&path).await.unwrap();
        assert_eq!(store.add("Milk").await.unwrap(), 1);
        assert_eq!(store.add("Milk").await.unwrap(), 2);
        assert_eq!(store.add("Butter").await.unwrap(), 1);
        assert!(store.remove("Butter").await.unwrap());

        let reopened = JsonInventoryStore::open(&path).await.unwrap();
        let inventory = reopened.snapshot().await.unwrap();
        assert_eq!(inventory.count("Milk"), 2);
        assert_eq!(inventory.count("Butter"), 0);
        assert_eq!(inventory.len(), 1);
    }

    #[tokio::test]
    async fn removing_unknown_item_does_not_write() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.json");

        let store = JsonInventoryStore::open(&path).await.unwrap();
        assert!(!store.remove("Cheese").await.unwrap());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn failed_write_leaves_inventory_unchanged() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.json");

        let store = JsonInventoryStore::open(&path).await.unwrap();
        assert_eq!(store.add("Milk").await.unwrap(), 1);

        // A regular file where the parent directory should be
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let broken = JsonInventoryStore {
            path: blocker.join("inventory.json"),
            inventory: Mutex::new(store.snapshot().await.unwrap()),
        };

        let result = broken.add("Butter").await;
        assert!(matches!(result, Err(InventoryError::WriteError(_))));
        let result = broken.remove("Milk").await;
        assert!(matches!(result, Err(InventoryError::WriteError(_))));

        let inventory = broken.snapshot().await.unwrap();
        assert_eq!(inventory.count("Butter"), 0);
        assert_eq!(inventory.count("Milk"), 1);
    }

    #[tokio::test]
    async fn corrupt_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("inventory.json");
        std::fs::write(&path, "not json").unwrap();

        let result = JsonInventoryStore::open(&path).await;
        assert!(matches!(result, Err(InventoryError::ParseError(_))));
    }
}
