//! Schema migrations for the relational backend
//!
//! Every statement is idempotent, so this runs on each startup.

use sqlx::PgPool;

/// Create the shopping list tables if they do not exist yet
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running shoplist migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shoppinglists (
            id BIGSERIAL PRIMARY KEY,
            uuid TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // uuid is an unsigned 32-bit value widened to BIGINT
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id BIGSERIAL PRIMARY KEY,
            uuid BIGINT NOT NULL CHECK (uuid BETWEEN 0 AND 4294967295),
            shoppinglist_id BIGINT NOT NULL REFERENCES shoppinglists(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            completed BOOLEAN NOT NULL DEFAULT FALSE,
            UNIQUE (shoppinglist_id, uuid)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_items_shoppinglist ON items(shoppinglist_id, id)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Shoplist migrations complete");
    Ok(())
}
