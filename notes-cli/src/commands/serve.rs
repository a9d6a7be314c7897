//! HTTP server command
//!
//! Picks a store backend once, then hands it to the server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use notes_server::db::{migrations, PgNoteStore, PoolOptions};
use notes_server::http::{run_server, ServerConfig};
use notes_server::store::{MemoryNoteStore, SharedStore};

/// Which store backs the API
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// PostgreSQL (durable)
    Postgres,
    /// Process memory (lost on exit)
    Memory,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Store backend
    #[arg(long, value_enum, default_value_t = StoreKind::Postgres)]
    pub store: StoreKind,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = 10)]
    pub max_connections: u32,

    /// Per-request deadline in seconds
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout_secs: u64,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Do not create the notes table on startup
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Build the configured store
async fn open_store(args: &ServeArgs) -> Result<SharedStore> {
    match args.store {
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store; notes are lost on exit");
            Ok(Arc::new(MemoryNoteStore::new()))
        }
        StoreKind::Postgres => {
            let database_url = super::require_database_url(args.database_url.clone())?;
            let options = PoolOptions {
                max_connections: args.max_connections,
                ..PoolOptions::default()
            };

            let store = PgNoteStore::connect(&database_url, options)
                .await
                .context("Failed to create database pool")?;

            if !args.skip_migrations {
                migrations::run(store.pool())
                    .await
                    .context("Failed to create notes table")?;
            }
            Ok(Arc::new(store))
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting notes server on {}", args.bind);

    let store = open_store(&args).await?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.request_timeout_secs),
    };

    // Blocks until shutdown; the store is closed on the way out
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
