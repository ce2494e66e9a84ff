//! SQLite database and per-request sessions

use crate::config::DatabaseConfig;
use crate::storage::Schema;
use anyhow::{Context, Result};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::str::FromStr;

pub struct Database {
    pool: SqlitePool,
}

/// A transaction on one pooled connection, scoped to a single request.
///
/// Dropping the session without calling [`DbSession::commit`] rolls the
/// transaction back and hands the connection back to the pool.
pub struct DbSession {
    pub(super) tx: Transaction<'static, Sqlite>,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig, schema: &Schema) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", config.url);

        let mut options = SqliteConnectOptions::from_str(&config.url)
            .with_context(|| format!("Invalid database URL: {}", config.url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
        if config.is_in_memory() {
            // Each connection to an in-memory URL sees its own database, so
            // keep exactly one alive for the lifetime of the pool.
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to SQLite database at: {}", config.url))?;

        tracing::info!("SQLite connection established, creating tables...");

        Self::apply_schema(&pool, schema)
            .await
            .context("Failed to create database tables")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn apply_schema(pool: &SqlitePool, schema: &Schema) -> Result<()> {
        for statement in schema.statements() {
            sqlx::query(*statement).execute(pool).await?;
        }
        Ok(())
    }

    /// Open a session for one request.
    pub async fn session(&self) -> Result<DbSession> {
        let tx = self
            .pool
            .begin()
            .await
            .context("Failed to open database session")?;
        tracing::trace!("Database session opened");
        Ok(DbSession { tx })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl DbSession {
    pub async fn commit(self) -> Result<()> {
        self.tx
            .commit()
            .await
            .context("Failed to commit database session")?;
        tracing::trace!("Database session committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() -> Result<()> {
        let db = Database::connect(&DatabaseConfig::in_memory(), &Schema::quiz()).await?;
        // Re-applying against existing tables is a no-op.
        Database::apply_schema(&db.pool, &Schema::quiz()).await?;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('questions', 'choices') ORDER BY name",
        )
        .fetch_all(&db.pool)
        .await?;
        assert_eq!(
            tables,
            vec![("choices".to_string(),), ("questions".to_string(),)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_dropped_session_rolls_back() -> Result<()> {
        let db = Database::connect(&DatabaseConfig::in_memory(), &Schema::quiz()).await?;

        {
            let mut session = db.session().await?;
            sqlx::query("INSERT INTO questions (question_text) VALUES ('Never committed')")
                .execute(&mut *session.tx)
                .await?;
        }

        // The single in-memory connection is back in the pool and clean.
        let mut session = db.session().await?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&mut *session.tx)
            .await?;
        assert_eq!(count, 0);
        Ok(())
    }
}
