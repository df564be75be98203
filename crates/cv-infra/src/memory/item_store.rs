use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use cv_core::ports::ItemStorePort;
use cv_core::{ClipboardItem, ContentHash, ItemId};
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    items: HashMap<ItemId, ClipboardItem>,
    by_hash: HashMap<ContentHash, ItemId>,
}

/// Process-local item store, used by the `memory` backend and by tests.
#[derive(Default)]
pub struct InMemoryItemStore {
    inner: RwLock<Inner>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn all_items(&self) -> Vec<ClipboardItem> {
        self.inner.read().await.items.values().cloned().collect()
    }
}

#[async_trait]
impl ItemStorePort for InMemoryItemStore {
    async fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<ClipboardItem>> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_hash
            .get(hash)
            .and_then(|id| inner.items.get(id))
            .cloned())
    }

    async fn insert(&self, item: &ClipboardItem) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.by_hash.contains_key(&item.content_hash) {
            anyhow::bail!("content hash {} already stored", item.content_hash);
        }
        if inner.items.contains_key(&item.id) {
            anyhow::bail!("item {} already stored", item.id);
        }
        inner
            .by_hash
            .insert(item.content_hash.clone(), item.id.clone());
        inner.items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn touch_last_accessed(&self, id: &ItemId, at_ms: i64) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.items.get_mut(id) {
            Some(item) => {
                item.last_accessed_at_ms = item.touched_at(at_ms);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_item(&self, id: &ItemId) -> Result<Option<ClipboardItem>> {
        Ok(self.inner.read().await.items.get(id).cloned())
    }
}
