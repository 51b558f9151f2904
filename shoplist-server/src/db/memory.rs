//! Document-style in-process store
//!
//! Each list is kept as one document with its items embedded, keyed by the
//! list uuid. Add pushes onto the embedded array, remove pulls from it.
//! Every operation runs under a single lock acquisition, which makes it
//! atomic with respect to concurrent requests. Contents do not survive a
//! restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DbError, ShoppingListStore};
use crate::models::{Item, ItemId, ItemName, ShoppingList};

/// In-memory document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    lists: RwLock<HashMap<String, ShoppingList>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShoppingListStore for MemoryStore {
    async fn create_list(&self) -> Result<ShoppingList, DbError> {
        let mut lists = self.lists.write().await;

        let mut list = ShoppingList::new();
        while lists.contains_key(&list.uuid) {
            list = ShoppingList::new();
        }

        lists.insert(list.uuid.clone(), list.clone());
        tracing::debug!(list = %list.uuid, "created shopping list document");
        Ok(list)
    }

    async fn get_list(&self, list: &str) -> Result<ShoppingList, DbError> {
        self.lists
            .read()
            .await
            .get(list)
            .cloned()
            .ok_or_else(|| DbError::list_not_found(list))
    }

    async fn delete_list(&self, list: &str) -> Result<(), DbError> {
        self.lists
            .write()
            .await
            .remove(list)
            .map(|_| ())
            .ok_or_else(|| DbError::list_not_found(list))
    }

    async fn add_item(&self, list: &str, name: ItemName) -> Result<Item, DbError> {
        let mut lists = self.lists.write().await;
        let doc = lists
            .get_mut(list)
            .ok_or_else(|| DbError::list_not_found(list))?;

        let item = Item::new(doc.next_item_id(), name);
        doc.items.push(item.clone());
        Ok(item)
    }

    async fn complete_item(&self, list: &str, item: ItemId) -> Result<(), DbError> {
        let mut lists = self.lists.write().await;
        let doc = lists
            .get_mut(list)
            .ok_or_else(|| DbError::list_not_found(list))?;

        let entry = doc
            .item_mut(item)
            .ok_or_else(|| DbError::item_not_found(list, item))?;
        entry.completed = true;
        Ok(())
    }

    async fn remove_item(&self, list: &str, item: ItemId) -> Result<(), DbError> {
        let mut lists = self.lists.write().await;
        let doc = lists
            .get_mut(list)
            .ok_or_else(|| DbError::list_not_found(list))?;

        let before = doc.items.len();
        doc.items.retain(|entry| entry.uuid != item);
        if doc.items.len() == before {
            return Err(DbError::item_not_found(list, item));
        }
        Ok(())
    }

    async fn get_item(&self, list: &str, item: ItemId) -> Result<Item, DbError> {
        let lists = self.lists.read().await;
        let doc = lists
            .get(list)
            .ok_or_else(|| DbError::list_not_found(list))?;

        doc.item(item)
            .cloned()
            .ok_or_else(|| DbError::item_not_found(list, item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn name(s: &str) -> ItemName {
        ItemName::new(s).unwrap()
    }

    #[tokio::test]
    async fn created_list_is_empty() {
        let store = MemoryStore::new();
        let list = store.create_list().await.unwrap();

        let fetched = store.get_list(&list.uuid).await.unwrap();
        assert_eq!(fetched.uuid, list.uuid);
        assert!(fetched.items.is_empty());
    }

    #[tokio::test]
    async fn unknown_list_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get_list("abc").await.unwrap_err();
        assert!(err.is_not_found());

        let err = store.add_item("abc", name("milk")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn added_item_is_listed_incomplete() {
        let store = MemoryStore::new();
        let list = store.create_list().await.unwrap();

        let item = store.add_item(&list.uuid, name("milk")).await.unwrap();
        let fetched = store.get_list(&list.uuid).await.unwrap();

        assert_eq!(fetched.items.len(), 1);
        assert_eq!(fetched.items[0], item);
        assert_eq!(fetched.items[0].name, "milk");
        assert!(!fetched.items[0].completed);
    }

    #[tokio::test]
    async fn items_keep_insertion_order() {
        let store = MemoryStore::new();
        let list = store.create_list().await.unwrap();

        for n in ["milk", "bread", "eggs"] {
            store.add_item(&list.uuid, name(n)).await.unwrap();
        }

        let fetched = store.get_list(&list.uuid).await.unwrap();
        let names: Vec<_> = fetched.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["milk", "bread", "eggs"]);
    }

    #[tokio::test]
    async fn complete_twice_is_idempotent() {
        let store = MemoryStore::new();
        let list = store.create_list().await.unwrap();
        let item = store.add_item(&list.uuid, name("milk")).await.unwrap();

        store.complete_item(&list.uuid, item.uuid).await.unwrap();
        store.complete_item(&list.uuid, item.uuid).await.unwrap();

        let fetched = store.get_item(&list.uuid, item.uuid).await.unwrap();
        assert!(fetched.completed);
    }

    #[tokio::test]
    async fn removing_missing_item_is_not_found() {
        let store = MemoryStore::new();
        let list = store.create_list().await.unwrap();

        let err = store
            .remove_item(&list.uuid, ItemId::new(12345))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "item", .. }));

        let err = store
            .complete_item(&list.uuid, ItemId::new(12345))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn removed_item_disappears() {
        let store = MemoryStore::new();
        let list = store.create_list().await.unwrap();
        let keep = store.add_item(&list.uuid, name("bread")).await.unwrap();
        let gone = store.add_item(&list.uuid, name("milk")).await.unwrap();

        store.remove_item(&list.uuid, gone.uuid).await.unwrap();

        let fetched = store.get_list(&list.uuid).await.unwrap();
        assert_eq!(fetched.items, vec![keep]);
        assert!(store
            .get_item(&list.uuid, gone.uuid)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn item_ids_stay_unique_after_many_additions() {
        let store = MemoryStore::new();
        let list = store.create_list().await.unwrap();

        let mut ids = HashSet::new();
        for i in 0..1000 {
            let item = store
                .add_item(&list.uuid, name(&format!("item {}", i)))
                .await
                .unwrap();
            ids.insert(item.uuid);
        }
        assert_eq!(ids.len(), 1000);
    }

    #[tokio::test]
    async fn items_are_owned_by_their_list() {
        let store = MemoryStore::new();
        let a = store.create_list().await.unwrap();
        let b = store.create_list().await.unwrap();
        let item = store.add_item(&a.uuid, name("milk")).await.unwrap();

        assert!(store
            .get_item(&b.uuid, item.uuid)
            .await
            .unwrap_err()
            .is_not_found());
        assert!(store.get_list(&b.uuid).await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn get_item_tells_missing_list_from_missing_item() {
        let store = MemoryStore::new();
        let missing = ItemId::new(7);

        let err = store.get_item("no-such-list", missing).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::NotFound {
                resource: "shopping list",
                ..
            }
        ));

        let list = store.create_list().await.unwrap();
        let err = store.get_item(&list.uuid, missing).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "item", .. }));
    }

    #[tokio::test]
    async fn deleted_list_is_gone() {
        let store = MemoryStore::new();
        let list = store.create_list().await.unwrap();
        store.add_item(&list.uuid, name("milk")).await.unwrap();

        store.delete_list(&list.uuid).await.unwrap();

        assert!(store.get_list(&list.uuid).await.unwrap_err().is_not_found());
        assert!(store.delete_list(&list.uuid).await.unwrap_err().is_not_found());
    }
}
