//! HTTP server command
//!
//! Resolves backend and database settings from flags and environment, opens
//! the store and runs the server until shutdown.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use shoplist_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use shoplist_server::{open_store, run_server, DatabaseConfig, ServerConfig, StoreKind};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "SHOPLIST_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Storage backend: postgres or memory
    #[arg(long, env = "SHOPLIST_STORE", default_value = "postgres")]
    pub store: StoreKind,

    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "postgres", hide_env_values = true)]
    pub db_password: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "shoppinglist")]
    pub db_name: String,

    /// Full database URL (overrides the DB_* settings)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl ServeArgs {
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            name: self.db_name.clone(),
            url: self.database_url.clone(),
            max_connections: self.max_connections,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!(store = %args.store, "Starting shoplist server on {}", args.bind);

    let store = open_store(args.store, &args.database_config())
        .await
        .with_context(|| format!("Failed to open {} store", args.store))?;

    let config = ServerConfig {
        bind_addr: args.bind,
    };

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
