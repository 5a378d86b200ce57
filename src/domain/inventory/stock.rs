//! Inventory entity

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Product name to count map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `name`, returning the new count
    pub fn add(&mut self, name: &str) -> u32 {
        let count = self.items.entry(name.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Remove one unit of `name`. Returns false if it was not stocked.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.items.get_mut(name) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.items.remove(name);
                true
            }
            None => false,
        }
    }

    pub fn count(&self, name: &str) -> u32 {
        self.items.get(name).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// One "name: count" line per product
    pub fn listing(&self) -> String {
        self.iter()
            .map(|(name, count)| format!("{}: {}", name, count))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
