//! Object storage abstraction
//!
//! The pipeline writes artifacts through the [`ObjectStore`] trait.
//! The filesystem implementation backs local deployments and tests; a
//! cloud bucket is one more implementation of the same trait.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Blob sink keyed by slash-separated object keys
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object, overwriting any previous content under the key.
    async fn put_object(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()>;
}

/// Directory-rooted object store
///
/// Object keys map to paths under the root; parent directories are
/// created on demand. Writes are whole-file replacements, so re-running
/// a generation overwrites in place.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys are produced internally, but reject traversal anyway.
        if key.split('/').any(|part| part == "..") {
            anyhow::bail!("invalid object key: {}", key);
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put_object(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(key, size = bytes.len(), "object written");
        Ok(())
    }
}
