//! Link store handle lifecycle.
//!
//! The pool is created once at startup, handed to repositories explicitly and
//! closed on shutdown. Connections are acquired per query by sqlx.

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;

/// Owned handle to the PostgreSQL pool backing the link store.
#[derive(Clone)]
pub struct Database {
    pool: Arc<PgPool>,
}

impl Database {
    /// Connects using the pool and timeout settings from `config`.
    ///
    /// Every session gets a `statement_timeout`, so a stuck query fails with a
    /// database error instead of hanging the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or the first connection fails.
    pub async fn connect(config: &Config) -> Result<Self> {
        let options = PgConnectOptions::from_str(&config.database_url)
            .context("Invalid database URL")?
            .options([(
                "statement_timeout",
                config.db_statement_timeout_ms.to_string(),
            )]);

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .idle_timeout(Duration::from_secs(config.db_idle_timeout))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime))
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        tracing::info!(
            max_connections = config.db_max_connections,
            "Connected to database"
        );

        Ok(Self::from_pool(pool))
    }

    /// Wraps an existing pool (used by tests and tools).
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Applies embedded migrations from `./migrations`.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(self.pool.as_ref())
            .await
            .context("Failed to run migrations")?;

        tracing::info!("Migrations applied");
        Ok(())
    }

    /// Shared pool for repositories.
    pub fn pool(&self) -> Arc<PgPool> {
        self.pool.clone()
    }

    /// Closes all connections. Pending acquisitions fail with `PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
