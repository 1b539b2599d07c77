//! Filesystem-backed artifact store.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{ArtifactStore, StoreError};

/// Stores artifacts under a local directory, mirroring the key layout.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ArtifactStore for LocalStore {
    async fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<(), StoreError> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::new(key, e))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StoreError::new(key, e))?;
        Ok(())
    }
}
