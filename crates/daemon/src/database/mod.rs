mod user_queries;

pub use user_queries::{UserRecord, UserStoreError};

use std::ops::Deref;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// User-record store: a thin newtype over a sqlite pool.
#[derive(Clone, Debug)]
pub struct Database(SqlitePool);

// Bootstrap is a single idempotent statement so startup needs no migration
// tooling or prepared-statement cache.
const BOOTSTRAP: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

impl Database {
    pub async fn connect(database_url: &url::Url) -> Result<Self, DatabaseSetupError> {
        if database_url.scheme() != "sqlite" {
            return Err(DatabaseSetupError::UnknownDbType(
                database_url.scheme().to_string(),
            ));
        }

        let options = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(DatabaseSetupError::Unavailable)?
            .create_if_missing(true);

        // an in-memory database exists per connection; keep the pool on one
        let in_memory = database_url.as_str().contains(":memory:");
        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 8 })
            .idle_timeout(if in_memory { None } else { Some(std::time::Duration::from_secs(600)) })
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(DatabaseSetupError::Unavailable)?;

        sqlx::query(BOOTSTRAP)
            .execute(&pool)
            .await
            .map_err(DatabaseSetupError::MigrationFailed)?;

        Ok(Database(pool))
    }

    pub fn new(pool: SqlitePool) -> Self {
        Self(pool)
    }
}

impl Deref for Database {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseSetupError {
    #[error("error occurred while bootstrapping the database schema: {0}")]
    MigrationFailed(sqlx::Error),

    #[error("unable to perform initial connection and check of the database: {0}")]
    Unavailable(sqlx::Error),

    #[error("requested database type was not recognized: {0}")]
    UnknownDbType(String),
}

#[cfg(test)]
pub(crate) async fn memory_database() -> Database {
    let url = url::Url::parse("sqlite::memory:").unwrap();
    Database::connect(&url).await.unwrap()
}
