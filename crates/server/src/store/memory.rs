//! In-process document store.
//!
//! Reference implementation of [`DocumentStore`] backed by maps behind
//! an async lock. Serves as the store for local runs (the real remote
//! document service is an external collaborator) and for every test.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{RwLock, watch};
use uuid::Uuid;

use super::{Document, DocumentStore, StoreError};

type Collection = BTreeMap<String, Value>;

/// In-memory [`DocumentStore`].
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Collection>>,
    // watch senders are created lazily, one per collection, and kept
    // alive here so receivers outlive individual writes
    channels: Mutex<HashMap<String, watch::Sender<u64>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn notify(&self, collection: &str) {
        let mut channels = self.channels.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let sender = channels
            .entry(collection.to_owned())
            .or_insert_with(|| watch::channel(0).0);
        sender.send_modify(|version| *version += 1);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let data = self.data.read().await;
        Ok(data.get(collection).and_then(|c| c.get(id)).cloned())
    }

    async fn set(&self, collection: &str, id: &str, doc: Value) -> Result<(), StoreError> {
        {
            let mut data = self.data.write().await;
            data.entry(collection.to_owned())
                .or_default()
                .insert(id.to_owned(), doc);
        }
        self.notify(collection);
        Ok(())
    }

    async fn add(&self, collection: &str, doc: Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        {
            let mut data = self.data.write().await;
            data.entry(collection.to_owned())
                .or_default()
                .insert(id.clone(), doc);
        }
        self.notify(collection);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::Backend(
                "update patch must be a JSON object".to_owned(),
            ));
        };

        {
            let mut data = self.data.write().await;
            let doc = data
                .get_mut(collection)
                .and_then(|c| c.get_mut(id))
                .ok_or_else(|| StoreError::NotFound {
                    collection: collection.to_owned(),
                    id: id.to_owned(),
                })?;

            let Value::Object(fields) = doc else {
                return Err(StoreError::Backend(format!(
                    "document {collection}/{id} is not an object"
                )));
            };
            for (key, value) in patch {
                fields.insert(key, value);
            }
        }
        self.notify(collection);
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .get(collection)
            .map(|c| {
                c.iter()
                    .map(|(id, value)| Document {
                        id: id.clone(),
                        data: value.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn subscribe(&self, collection: &str) -> watch::Receiver<u64> {
        let mut channels = self.channels.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        channels
            .entry(collection.to_owned())
            .or_insert_with(|| watch::channel(0).0)
            .subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("profiles", "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        store
            .set("profiles", "u1", json!({"email": "a@b.c", "role": "user"}))
            .await
            .unwrap();
        let doc = store.get("profiles", "u1").await.unwrap().unwrap();
        assert_eq!(doc["role"], "user");
    }

    #[tokio::test]
    async fn test_add_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.add("orders", json!({"n": 1})).await.unwrap();
        let b = store.add("orders", json!({"n": 2})).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.list("orders").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        store
            .set("orders", "o1", json!({"status": "pending", "days": 3}))
            .await
            .unwrap();
        store
            .update("orders", "o1", json!({"status": "completed"}))
            .await
            .unwrap();
        let doc = store.get("orders", "o1").await.unwrap().unwrap();
        assert_eq!(doc["status"], "completed");
        assert_eq!(doc["days"], 3);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update("orders", "ghost", json!({"status": "completed"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_subscribe_sees_writes() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe("orders");
        let before = *rx.borrow();
        store.add("orders", json!({"n": 1})).await.unwrap();
        rx.changed().await.unwrap();
        assert!(*rx.borrow() > before);
    }
}
