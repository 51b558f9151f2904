//! PostgreSQL store
//!
//! Operations that look up the list and then touch an item run inside one
//! transaction. The list row is locked with `FOR UPDATE` first, so
//! concurrent writers to the same list are serialised and the item id check
//! in `add_item` cannot race.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::{FromRow, PgConnection, PgPool, Row};

use super::{DbError, ShoppingListStore};
use crate::models::{Item, ItemId, ItemName, ShoppingList};

/// Item record from database
#[derive(Debug, Clone, FromRow)]
struct ItemRow {
    id: i64,
    uuid: i64,
    name: String,
    completed: bool,
}

impl ItemRow {
    fn into_item(self) -> Result<Item, sqlx::Error> {
        Ok(Item {
            id: Some(self.id),
            uuid: ItemId::try_from(self.uuid).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
            name: self.name,
            completed: self.completed,
        })
    }
}

/// Shopping list store backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Resolve a list uuid to its row id, locking the row until the
/// surrounding transaction ends.
async fn lock_list(conn: &mut PgConnection, list: &str) -> Result<i64, DbError> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM shoppinglists WHERE uuid = $1 FOR UPDATE")
        .bind(list)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DbError::list_not_found(list))
}

#[async_trait]
impl ShoppingListStore for PgStore {
    async fn create_list(&self) -> Result<ShoppingList, DbError> {
        let list = ShoppingList::new();

        let id: i64 = sqlx::query_scalar("INSERT INTO shoppinglists (uuid) VALUES ($1) RETURNING id")
            .bind(&list.uuid)
            .fetch_one(&self.pool)
            .await?;

        Ok(ShoppingList {
            id: Some(id),
            ..list
        })
    }

    /// Single LEFT JOIN; a list without items yields one row of NULL item columns.
    async fn get_list(&self, list: &str) -> Result<ShoppingList, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                l.id AS list_id,
                i.id AS item_id,
                i.uuid AS item_uuid,
                i.name AS item_name,
                i.completed AS item_completed
            FROM shoppinglists l
            LEFT JOIN items i ON i.shoppinglist_id = l.id
            WHERE l.uuid = $1
            ORDER BY i.id
            "#,
        )
        .bind(list)
        .fetch_all(&self.pool)
        .await?;

        let Some(first) = rows.first() else {
            return Err(DbError::list_not_found(list));
        };
        let list_id: i64 = first.try_get("list_id")?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let Some(item_id) = row.try_get::<Option<i64>, _>("item_id")? else {
                continue;
            };
            let item = ItemRow {
                id: item_id,
                uuid: row.try_get("item_uuid")?,
                name: row.try_get("item_name")?,
                completed: row.try_get("item_completed")?,
            };
            items.push(item.into_item()?);
        }

        Ok(ShoppingList {
            id: Some(list_id),
            uuid: list.to_owned(),
            items,
        })
    }

    async fn delete_list(&self, list: &str) -> Result<(), DbError> {
        // items go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM shoppinglists WHERE uuid = $1")
            .bind(list)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::list_not_found(list));
        }
        Ok(())
    }

    async fn add_item(&self, list: &str, name: ItemName) -> Result<Item, DbError> {
        let mut tx = self.pool.begin().await?;
        let list_id = lock_list(&mut tx, list).await?;

        let taken: HashSet<i64> =
            sqlx::query_scalar::<_, i64>("SELECT uuid FROM items WHERE shoppinglist_id = $1")
                .bind(list_id)
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .collect();
        let uuid = ItemId::fresh(|candidate| taken.contains(&candidate.as_i64()));

        let row: ItemRow = sqlx::query_as(
            r#"
            INSERT INTO items (uuid, shoppinglist_id, name, completed)
            VALUES ($1, $2, $3, FALSE)
            RETURNING id, uuid, name, completed
            "#,
        )
        .bind(uuid.as_i64())
        .bind(list_id)
        .bind(name.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into_item()?)
    }

    async fn complete_item(&self, list: &str, item: ItemId) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        let list_id = lock_list(&mut tx, list).await?;

        let result = sqlx::query(
            "UPDATE items SET completed = TRUE WHERE shoppinglist_id = $1 AND uuid = $2",
        )
        .bind(list_id)
        .bind(item.as_i64())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::item_not_found(list, item));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn remove_item(&self, list: &str, item: ItemId) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        let list_id = lock_list(&mut tx, list).await?;

        let result = sqlx::query("DELETE FROM items WHERE shoppinglist_id = $1 AND uuid = $2")
            .bind(list_id)
            .bind(item.as_i64())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::item_not_found(list, item));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_item(&self, list: &str, item: ItemId) -> Result<Item, DbError> {
        // Outer join keeps the list row, so an absent list and an absent
        // item are told apart.
        let row = sqlx::query(
            r#"
            SELECT
                i.id AS item_id,
                i.uuid AS item_uuid,
                i.name AS item_name,
                i.completed AS item_completed
            FROM shoppinglists l
            LEFT JOIN items i ON i.shoppinglist_id = l.id AND i.uuid = $2
            WHERE l.uuid = $1
            "#,
        )
        .bind(list)
        .bind(item.as_i64())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::list_not_found(list))?;

        let Some(item_id) = row.try_get::<Option<i64>, _>("item_id")? else {
            return Err(DbError::item_not_found(list, item));
        };

        let found = ItemRow {
            id: item_id,
            uuid: row.try_get("item_uuid")?,
            name: row.try_get("item_name")?,
            completed: row.try_get("item_completed")?,
        };
        Ok(found.into_item()?)
    }
}
