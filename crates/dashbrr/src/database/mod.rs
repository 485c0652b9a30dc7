//! SQLite persistence for services and users using `SQLx`.
//!
//! - Connection pooling (no Arc<Mutex<>>)
//! - Embedded idempotent schema (no migration files)
//! - Implements the core `ServiceStore` and `UserStore` contracts

use std::path::{Path, PathBuf};

use dashbrr_core::{Error, Result};
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use tokio::sync::OnceCell;
use tracing::debug;

mod schema;
mod service_ops;
mod user_ops;
mod validation;

/// Pooled handle to the dashbrr database.
///
/// A handle made with [`Database::lazy`] touches the filesystem on the first
/// query, so commands that never read a store never need the file.
pub struct Database {
    path: Option<PathBuf>,
    pool: OnceCell<SqlitePool>,
}

impl Database {
    /// Handle to the database at `path`; nothing is created until first use.
    pub fn lazy(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            pool: OnceCell::new(),
        }
    }

    /// Open the database at `path` now, creating the file and its parent
    /// directory when missing.
    ///
    /// # Errors
    ///
    /// Returns `Error::Collaborator` if the directory cannot be created, the
    /// file cannot be opened, or schema initialization fails.
    pub async fn open(path: &Path) -> Result<Self> {
        let database = Self::lazy(path);
        database.pool().await?;
        Ok(database)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns error if schema initialization fails.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new().in_memory(true);
        // A second pooled connection would see a different in-memory database.
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        schema::init_schema(&pool).await?;
        Ok(Self {
            path: None,
            pool: OnceCell::from(pool),
        })
    }

    /// The pool, connecting and applying the schema on first call.
    pub(crate) async fn pool(&self) -> Result<&SqlitePool> {
        self.pool
            .get_or_try_init(|| async {
                let path = self
                    .path
                    .as_deref()
                    .ok_or_else(|| Error::internal("in-memory database has no pool"))?;
                validation::prepare_database_path(path).await?;

                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true);
                let pool = schema::create_connection_pool(options).await?;
                schema::init_schema(&pool).await?;

                debug!(path = %path.display(), "database opened");
                Ok::<_, Error>(pool)
            })
            .await
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.path)
            .field("connections", &self.pool.get().map(SqlitePool::size))
            .finish()
    }
}
