//! Data-access contract shared by every backend
//!
//! Handlers only see `dyn ShoppingListStore`; the concrete backend is picked
//! once at startup.

use async_trait::async_trait;

use crate::models::{Item, ItemId, ItemName, ShoppingList};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub fn list_not_found(list: &str) -> Self {
        Self::NotFound {
            resource: "shopping list",
            id: list.to_owned(),
        }
    }

    pub fn item_not_found(list: &str, item: ItemId) -> Self {
        Self::NotFound {
            resource: "item",
            id: format!("{}/{}", list, item),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Storage operations for shopping lists and their items.
///
/// Every operation either fully applies or leaves the store untouched.
#[async_trait]
pub trait ShoppingListStore: Send + Sync {
    /// Persist a fresh, empty list with a new globally unique uuid.
    async fn create_list(&self) -> Result<ShoppingList, DbError>;

    /// Fetch a list with its items in insertion order.
    async fn get_list(&self, list: &str) -> Result<ShoppingList, DbError>;

    /// Delete a list together with all of its items.
    async fn delete_list(&self, list: &str) -> Result<(), DbError>;

    /// Append a new, not yet completed item under an id unused in the list.
    async fn add_item(&self, list: &str, name: ItemName) -> Result<Item, DbError>;

    /// Mark an item completed. Completing an already completed item succeeds.
    async fn complete_item(&self, list: &str, item: ItemId) -> Result<(), DbError>;

    /// Delete an item from its list.
    async fn remove_item(&self, list: &str, item: ItemId) -> Result<(), DbError>;

    /// Point lookup of one item.
    async fn get_item(&self, list: &str, item: ItemId) -> Result<Item, DbError>;
}
