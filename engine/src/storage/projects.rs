//! Project metadata persistence
//!
//! One row per project, keyed by project id. Rows are created on the
//! first completing generation and replaced wholesale on every upsert
//! (the artifact index always describes the latest run). The core never
//! deletes rows.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use std::time::{SystemTime, UNIX_EPOCH};

/// Project lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
        }
    }

    fn from_str(s: &str) -> Self {
        match s {
            "completed" => ProjectStatus::Completed,
            _ => ProjectStatus::InProgress,
        }
    }
}

/// One entry of a project's artifact index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactIndexEntry {
    /// Artifact kind label (e.g. "template")
    pub kind: String,

    /// Full object key under the storage prefix
    pub object_key: String,

    /// Size of the written object; zero for failed writes
    pub size_bytes: u64,

    /// Error marker for artifacts that failed to persist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Metadata row for a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub project_id: String,
    pub user_id: String,
    pub name: String,
    pub kind: String,
    pub primary_service: String,
    pub status: ProjectStatus,
    pub created_at: i64,
    pub updated_at: i64,
    pub storage_prefix: String,
    pub artifact_index: Vec<ArtifactIndexEntry>,
}

/// Repository for project metadata rows
pub struct ProjectRepository {
    pool: SqlitePool,
}

impl ProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or replace the project row.
    ///
    /// `created_at` is preserved across upserts; everything else,
    /// including the artifact index, is replaced.
    pub async fn upsert(&self, record: &ProjectRecord) -> Result<()> {
        let index_json =
            serde_json::to_string(&record.artifact_index).context("Failed to encode index")?;

        sqlx::query(
            "INSERT INTO projects \
             (project_id, user_id, name, kind, primary_service, status, created_at, updated_at, storage_prefix, artifact_index) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(project_id) DO UPDATE SET \
             user_id = excluded.user_id, \
             name = excluded.name, \
             kind = excluded.kind, \
             primary_service = excluded.primary_service, \
             status = excluded.status, \
             updated_at = excluded.updated_at, \
             storage_prefix = excluded.storage_prefix, \
             artifact_index = excluded.artifact_index",
        )
        .bind(&record.project_id)
        .bind(&record.user_id)
        .bind(&record.name)
        .bind(&record.kind)
        .bind(&record.primary_service)
        .bind(record.status.as_str())
        .bind(record.created_at)
        .bind(record.updated_at)
        .bind(&record.storage_prefix)
        .bind(index_json)
        .execute(&self.pool)
        .await
        .context("Failed to upsert project")?;

        Ok(())
    }

    /// Fetch a project row by id.
    pub async fn get(&self, project_id: &str) -> Result<Option<ProjectRecord>> {
        let row = sqlx::query(
            "SELECT project_id, user_id, name, kind, primary_service, status, created_at, updated_at, storage_prefix, artifact_index \
             FROM projects WHERE project_id = ?",
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch project")?;

        row.map(row_to_record).transpose()
    }

    /// Most recently updated projects.
    pub async fn recent(&self, limit: i64) -> Result<Vec<ProjectRecord>> {
        let rows = sqlx::query(
            "SELECT project_id, user_id, name, kind, primary_service, status, created_at, updated_at, storage_prefix, artifact_index \
             FROM projects ORDER BY updated_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch recent projects")?;

        rows.into_iter().map(row_to_record).collect()
    }
}

fn row_to_record(r: sqlx::sqlite::SqliteRow) -> Result<ProjectRecord> {
    let index_json: String = r.get("artifact_index");
    let artifact_index: Vec<ArtifactIndexEntry> =
        serde_json::from_str(&index_json).context("Failed to decode index")?;

    Ok(ProjectRecord {
        project_id: r.get("project_id"),
        user_id: r.get("user_id"),
        name: r.get("name"),
        kind: r.get("kind"),
        primary_service: r.get("primary_service"),
        status: ProjectStatus::from_str(&r.get::<String, _>("status")),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
        storage_prefix: r.get("storage_prefix"),
        artifact_index,
    })
}

/// Current unix time in seconds.
pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
