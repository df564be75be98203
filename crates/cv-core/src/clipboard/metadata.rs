use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::ItemId;

/// Structured metadata attached to an item at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub item_id: ItemId,
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl ItemMetadata {
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            attributes: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: &str, value: impl Into<serde_json::Value>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    pub fn with(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }
}
