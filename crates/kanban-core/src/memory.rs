//! In-Memory Adapters
//!
//! Storage and todo store kept in process memory. Selected at composition
//! time for offline use, and used throughout the tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{ApiError, ApiResult, StorageError};
use crate::storage::KeyValueStorage;
use crate::todo::{TodoFields, TodoItem, TodoStore};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// Todo list held in memory; ids are assigned sequentially
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    items: Mutex<Vec<TodoItem>>,
    next_id: AtomicU64,
}

impl MemoryTodoStore {
    pub fn with_items(items: Vec<TodoItem>) -> Self {
        Self {
            items: Mutex::new(items),
            next_id: AtomicU64::new(0),
        }
    }

    fn not_found(id: &str) -> ApiError {
        ApiError::new(404, format!("Todo {} no encontrado", id))
    }
}

#[async_trait(?Send)]
impl TodoStore for MemoryTodoStore {
    async fn list(&self) -> ApiResult<Vec<TodoItem>> {
        Ok(lock(&self.items).clone())
    }

    async fn create(&self, fields: &TodoFields) -> ApiResult<TodoItem> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let item = TodoItem {
            id: format!("local-{}", id),
            title: fields.title.clone(),
            description: fields.description.clone(),
            completed: fields.completed.clone(),
            category: fields.category.clone(),
            user_id: None,
        };
        lock(&self.items).push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: &str, fields: &TodoFields) -> ApiResult<TodoItem> {
        let mut items = lock(&self.items);
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        item.title = fields.title.clone();
        item.description = fields.description.clone();
        item.completed = fields.completed.clone();
        item.category = fields.category.clone();
        Ok(item.clone())
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        let mut items = lock(&self.items);
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn delete_all(&self) -> ApiResult<()> {
        lock(&self.items).clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnId;

    #[tokio::test]
    async fn test_crud_roundtrip() {
        let store = MemoryTodoStore::default();
        let created = store
            .create(&TodoFields::new("Escribir informe", None, ColumnId::Pendiente))
            .await
            .unwrap();
        assert_eq!(created.id, "local-1");

        let updated = store
            .update(&created.id, &TodoFields::new("Escribir informe", None, ColumnId::Completados))
            .await
            .unwrap();
        assert_eq!(updated.category, "Completados");

        store.delete(&created.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.delete(&created.id).await.unwrap_err().status, 404);
    }

    #[test]
    fn test_storage_set_get_remove() {
        let storage = MemoryStorage::default();
        storage.set("token", "abc").unwrap();
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("abc"));
        storage.remove("token").unwrap();
        assert_eq!(storage.get("token").unwrap(), None);
    }
}
