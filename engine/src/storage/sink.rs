//! Artifact sink
//!
//! Persists a generated artifact set under the per-project prefix and
//! upserts the metadata row. Writes are best-effort: a failed artifact
//! is recorded with an error marker and the remaining artifacts still
//! go out. The metadata row always reflects what actually landed.

use crate::artifacts::Artifact;
use crate::extract::ProjectDescriptor;
use crate::storage::object_store::ObjectStore;
use crate::storage::projects::{
    now_unix, ArtifactIndexEntry, ProjectRecord, ProjectRepository, ProjectStatus,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of one persistence run
#[derive(Debug, Clone)]
pub struct ArtifactIndex {
    /// Per-project prefix all keys share
    pub storage_prefix: String,

    /// One entry per artifact, successes and failures alike
    pub entries: Vec<ArtifactIndexEntry>,

    /// False when the metadata upsert itself failed
    pub metadata_recorded: bool,
}

impl ArtifactIndex {
    /// Number of artifacts that landed in storage.
    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|e| e.error.is_none()).count()
    }
}

/// Best-effort artifact persistence over an object store and the
/// project metadata table
pub struct Sink {
    store: Arc<dyn ObjectStore>,
    projects: Arc<ProjectRepository>,
}

impl Sink {
    pub fn new(store: Arc<dyn ObjectStore>, projects: Arc<ProjectRepository>) -> Self {
        Self { store, projects }
    }

    /// Write every artifact under `projects/<user>/<project>/`, then
    /// upsert the metadata row. Never fails the request: write failures
    /// become error-marked index entries, and a failed row upsert is
    /// reported through `metadata_recorded`.
    pub async fn persist(
        &self,
        descriptor: &ProjectDescriptor,
        artifacts: &[Artifact],
    ) -> ArtifactIndex {
        let prefix = format!(
            "projects/{}/{}/",
            descriptor.user_id, descriptor.project_id
        );

        let mut entries = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let key = format!("{}{}", prefix, artifact.filename);
            match self
                .store
                .put_object(&key, &artifact.bytes, artifact.content_type)
                .await
            {
                Ok(()) => entries.push(ArtifactIndexEntry {
                    kind: artifact.kind.as_str().to_string(),
                    object_key: key,
                    size_bytes: artifact.size_bytes() as u64,
                    error: None,
                }),
                Err(e) => {
                    warn!(kind = artifact.kind.as_str(), error = %e, "artifact write failed");
                    entries.push(ArtifactIndexEntry {
                        kind: artifact.kind.as_str().to_string(),
                        object_key: key,
                        size_bytes: 0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let succeeded = entries.iter().filter(|e| e.error.is_none()).count();
        let status = if succeeded > 0 {
            ProjectStatus::Completed
        } else {
            ProjectStatus::InProgress
        };

        let now = now_unix();
        let record = ProjectRecord {
            project_id: descriptor.project_id.clone(),
            user_id: descriptor.user_id.clone(),
            name: descriptor.name.clone(),
            kind: descriptor.kind.as_str().to_string(),
            primary_service: descriptor.primary_service.clone(),
            status,
            created_at: now,
            updated_at: now,
            storage_prefix: prefix.clone(),
            artifact_index: entries.clone(),
        };

        let metadata_recorded = match self.projects.upsert(&record).await {
            Ok(()) => true,
            Err(e) => {
                warn!(project_id = %descriptor.project_id, error = %e, "metadata upsert failed");
                false
            }
        };

        info!(
            project_id = %descriptor.project_id,
            uploaded = succeeded,
            failed = entries.len() - succeeded,
            "artifact set persisted"
        );

        ArtifactIndex {
            storage_prefix: prefix,
            entries,
            metadata_recorded,
        }
    }
}
