//! In-memory key-value storage.

use super::types::{Key, KeyRef, StoreError, Value};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// Handle to a map shared by every clone.
///
/// A single lock guards the whole map: readers share it, `set` and `delete`
/// hold it exclusively for one map access.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<HashMap<Key, Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

#[async_trait]
impl super::Store for InMemoryStore {
    async fn get<'k>(&self, key: KeyRef<'k>) -> Result<Option<Value>, StoreError> {
        Ok(self.data.read().await.get(key).map(Value::clone))
    }

    async fn set(&self, key: Key, value: Value) -> Result<(), StoreError> {
        self.data.write().await.insert(key, value);
        Ok(())
    }

    async fn delete<'k>(&self, key: KeyRef<'k>) -> Result<(), StoreError> {
        self.data.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Store;

    #[tokio::test]
    async fn returns_none_for_key_never_written() {
        // Pre-condition.
        let store = InMemoryStore::new();

        // Action.
        let value = store.get("missing").await;

        // Post-condition.
        assert_eq!(value, Ok(None));
    }

    #[tokio::test]
    async fn overwrites_existing_value() {
        // Pre-condition.
        let store = InMemoryStore::new();
        store.set("k".into(), "v1".into()).await.unwrap();

        // Action.
        store.set("k".into(), "v2".into()).await.unwrap();

        // Post-condition.
        assert_eq!(store.get("k").await, Ok(Some("v2".into())));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn keeps_empty_value_distinct_from_absence() {
        // Pre-condition.
        let store = InMemoryStore::new();

        // Action.
        store.set("b".into(), "".into()).await.unwrap();

        // Post-condition.
        assert_eq!(store.get("b").await, Ok(Some("".into())));
    }

    #[tokio::test]
    async fn deletes_idempotently() {
        // Pre-condition.
        let store = InMemoryStore::new();
        store.set("a".into(), "1".into()).await.unwrap();
        store.set("b".into(), "2".into()).await.unwrap();

        // Action & Post-condition.
        for _ in 0..2 {
            assert_eq!(store.delete("a").await, Ok(()));
            assert_eq!(store.get("a").await, Ok(None));
            assert_eq!(store.get("b").await, Ok(Some("2".into())));
            assert_eq!(store.len().await, 1);
        }
    }

    #[tokio::test]
    async fn shares_data_between_clones() {
        // Pre-condition.
        let store = InMemoryStore::new();
        let other = store.clone();

        // Action.
        other.set("k".into(), "v".into()).await.unwrap();

        // Post-condition.
        assert_eq!(store.get("k").await, Ok(Some("v".into())));
        assert!(!store.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_sets_leave_one_of_the_written_values() {
        // Pre-condition.
        let store = InMemoryStore::new();
        let values = (0..64).map(|i| format!("value-{}", i)).collect::<Vec<_>>();

        // Action.
        let tasks = values
            .iter()
            .cloned()
            .map(|value| {
                let store = store.clone();
                tokio::spawn(async move { store.set("k".into(), value).await })
            })
            .collect::<Vec<_>>();

        for task in tasks {
            assert_eq!(task.await.unwrap(), Ok(()));
        }

        // Post-condition.
        let stored = store.get("k").await.unwrap().unwrap();
        assert!(values.contains(&stored), "unexpected value {}", stored);
        assert_eq!(store.len().await, 1);
    }
}
