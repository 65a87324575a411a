//! SQLite database connection pool and migration runner.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

use crate::persistence::PersistenceError;

/// Holds a connection pool to the SQLite database.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the existing database at `path`, run migrations, and return a
    /// ready-to-use `Database`.
    ///
    /// A missing file is a [`PersistenceError::Connection`]; nothing is
    /// created on disk.
    pub async fn open(path: &Path) -> Result<Self, PersistenceError> {
        Self::connect(path, false).await
    }

    /// Open the database at `path`, creating the file and its parent
    /// directories if they do not exist yet.
    pub async fn open_or_create(path: &Path) -> Result<Self, PersistenceError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::connect(path, true).await
    }

    async fn connect(path: &Path, create: bool) -> Result<Self, PersistenceError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(create)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|source| PersistenceError::Connection {
                target: path.display().to_string(),
                source,
            })?;

        let db = Self { pool };
        db.run_migrations().await?;
        info!(path = %path.display(), create, "Database ready");
        Ok(db)
    }

    /// Create an in-memory database for testing. Migrations are applied.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self, PersistenceError> {
        use std::str::FromStr;

        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|source| PersistenceError::Connection {
                target: ":memory:".to_string(),
                source,
            })?;

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Run embedded migrations from `zhwotd/migrations/`.
    async fn run_migrations(&self) -> Result<(), PersistenceError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| PersistenceError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
