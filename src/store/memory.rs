use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{DEFAULT_TABLE, KvStore, StoreError};

/// In-process stand-in for [`super::PgStore`] used by tests.
///
/// `None` models a table that has not been created (or has been dropped), so
/// the schema lifecycle behaves like the database one.
#[derive(Default)]
pub struct MemoryStore {
    table: Mutex<Option<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the table already created.
    pub fn with_schema() -> Self {
        Self {
            table: Mutex::new(Some(HashMap::new())),
        }
    }

    /// Number of records, or `None` if the table does not exist.
    pub fn len(&self) -> Option<usize> {
        self.table.lock().unwrap().as_ref().map(HashMap::len)
    }

    fn missing() -> StoreError {
        StoreError::MissingTable(DEFAULT_TABLE.to_string())
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.table.lock().unwrap().get_or_insert_with(HashMap::new);
        Ok(())
    }

    async fn set(&self, key: &str, val: &str) -> Result<(), StoreError> {
        let mut table = self.table.lock().unwrap();
        let rows = table.as_mut().ok_or_else(Self::missing)?;
        rows.insert(key.to_string(), val.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String, StoreError> {
        let table = self.table.lock().unwrap();
        let rows = table.as_ref().ok_or_else(Self::missing)?;
        rows.get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn reset_all(&self) -> Result<(), StoreError> {
        self.table
            .lock()
            .unwrap()
            .take()
            .map(|_| ())
            .ok_or_else(Self::missing)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreErrorKind;
    use std::sync::Arc;

    async fn ready_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.ensure_schema().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_set_then_get_round_trip() {
        let store = ready_store().await;
        store.set("x", "1").await.unwrap();
        assert_eq!(store.get("x").await.unwrap(), "1");
    }

    #[tokio::test]
    async fn test_set_replaces_existing_value() {
        let store = ready_store().await;
        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), "v2");
        assert_eq!(store.len(), Some(1));
    }

    #[tokio::test]
    async fn test_empty_value_round_trip() {
        let store = ready_store().await;
        store.set("blank", "").await.unwrap();
        assert_eq!(store.get("blank").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_get_absent_key_is_not_found() {
        let store = ready_store().await;
        let err = store.get("never-set").await.unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let store = ready_store().await;
        store.set("keep", "me").await.unwrap();

        store.ensure_schema().await.unwrap();
        store.ensure_schema().await.unwrap();

        assert_eq!(store.get("keep").await.unwrap(), "me");
        assert_eq!(store.len(), Some(1));
    }

    #[tokio::test]
    async fn test_operations_fail_before_schema() {
        let store = MemoryStore::new();
        assert_eq!(store.set("a", "b").await.unwrap_err().kind(), StoreErrorKind::Storage);
        assert_eq!(store.get("a").await.unwrap_err().kind(), StoreErrorKind::Storage);
    }

    #[tokio::test]
    async fn test_reset_all_drops_table() {
        let store = ready_store().await;
        store.set("a", "1").await.unwrap();

        store.reset_all().await.unwrap();
        assert_eq!(store.len(), None);

        // Second drop has no table to act on
        let err = store.reset_all().await.unwrap_err();
        assert!(matches!(err, StoreError::MissingTable(_)));

        store.ensure_schema().await.unwrap();
        assert_eq!(store.get("a").await.unwrap_err().kind(), StoreErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_concurrent_writers_same_key() {
        let store = Arc::new(ready_store().await);
        let values: Vec<String> = (0..32).map(|i| format!("value-{i}")).collect();

        let mut tasks = Vec::new();
        for value in values.clone() {
            let store = Arc::clone(&store);
            tasks.push(tokio::spawn(async move { store.set("shared", &value).await }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let final_value = store.get("shared").await.unwrap();
        assert!(values.contains(&final_value));
        assert_eq!(store.len(), Some(1));
    }
}
