//! shoplist-server: shared shopping lists over HTTP
//!
//! A visit to `/` creates a list and redirects to its unique URL. Items are
//! added, completed and removed through htmx requests that return rendered
//! HTML fragments. Lists live in PostgreSQL or in an in-process document
//! store, chosen at startup.

pub mod db;
pub mod http;
pub mod models;

pub use db::{open_store, DatabaseConfig, DbError, ShoppingListStore, StoreKind};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
