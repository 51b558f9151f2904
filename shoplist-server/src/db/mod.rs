//! Database layer - store trait, backends, pool and migrations
//!
//! # Design Principles
//!
//! - One `ShoppingListStore` trait, two substitutable backends
//! - Connection pool for PostgreSQL - no Arc<Mutex<Connection>>
//! - Transactions for list lookup + item statement pairs

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod store;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use memory::MemoryStore;
pub use pool::{create_pool, DatabaseConfig};
pub use postgres::PgStore;
pub use store::{DbError, ShoppingListStore};

/// Which backend serves the shopping lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// Relational backend (sqlx + PostgreSQL)
    #[default]
    Postgres,
    /// Document-style in-process backend, lost on restart
    Memory,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!(
                "unknown store '{}', expected 'postgres' or 'memory'",
                other
            )),
        }
    }
}

/// Open the configured backend.
///
/// For PostgreSQL this connects the pool and runs migrations before
/// returning.
pub async fn open_store(
    kind: StoreKind,
    config: &DatabaseConfig,
) -> Result<Arc<dyn ShoppingListStore>, DbError> {
    match kind {
        StoreKind::Postgres => {
            tracing::info!(database = %config.redacted_url(), "Connecting to PostgreSQL");
            let pool = create_pool(config).await?;
            migrations::run(&pool).await?;
            Ok(Arc::new(PgStore::new(pool)))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store - lists are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_kinds() {
        assert_eq!("postgres".parse::<StoreKind>().unwrap(), StoreKind::Postgres);
        assert_eq!("PG".parse::<StoreKind>().unwrap(), StoreKind::Postgres);
        assert_eq!("memory".parse::<StoreKind>().unwrap(), StoreKind::Memory);
        assert!("mongo".parse::<StoreKind>().is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for kind in [StoreKind::Postgres, StoreKind::Memory] {
            assert_eq!(kind.to_string().parse::<StoreKind>().unwrap(), kind);
        }
    }

    #[tokio::test]
    async fn memory_store_opens_without_database() {
        let store = open_store(StoreKind::Memory, &DatabaseConfig::default())
            .await
            .unwrap();
        let list = store.create_list().await.unwrap();
        assert!(store.get_list(&list.uuid).await.is_ok());
    }
}
