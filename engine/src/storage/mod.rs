//! Storage module
//!
//! Object-store writes and project-metadata persistence. The metadata
//! table lives in SQLite (WAL mode); artifacts go through the
//! [`ObjectStore`] trait so the backing bucket is swappable.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

pub mod object_store;
pub mod projects;
pub mod sink;

// Re-export commonly used types
pub use object_store::{FsObjectStore, ObjectStore};
pub use projects::{ArtifactIndexEntry, ProjectRecord, ProjectRepository, ProjectStatus};
pub use sink::{ArtifactIndex, Sink};

/// Metadata database connection pool
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the metadata database at the given path and run
    /// the schema migration. WAL mode is enabled for concurrent readers.
    pub async fn new(db_path: &Path) -> Result<Self> {
        info!("Initializing metadata table at: {}", db_path.display());

        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))
            .context("Invalid database path")?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to open metadata database")?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// In-memory database for tests.
    pub async fn in_memory() -> Result<Self> {
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").context("Invalid sqlite URI")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database")?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS projects (
                project_id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                kind TEXT NOT NULL,
                primary_service TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                storage_prefix TEXT NOT NULL,
                artifact_index TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .context("Failed to run projects migration")?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Checkpoint and close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
