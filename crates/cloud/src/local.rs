//! Filesystem object store.
//!
//! Objects live at `{root}/{container}/{object_name}`. The API serves `root`
//! over HTTP so the returned URLs resolve.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use places_core::object_name::is_safe_object_name;
use url::Url;

use crate::{object_url, parse_base_url, ObjectStore, StorageError};

/// Stores objects as plain files under a root directory.
#[derive(Debug)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: Url,
    /// Suffix source for temporary files, unique per process.
    tmp_counter: AtomicU64,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Result<Self, StorageError> {
        Ok(Self {
            root: root.into(),
            public_base_url: parse_base_url(public_base_url)?,
            tmp_counter: AtomicU64::new(0),
        })
    }

    /// Filesystem path of an object.
    pub fn object_path(&self, container: &str, object_name: &str) -> PathBuf {
        self.root.join(container).join(object_name)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn upload(
        &self,
        container: &str,
        object_name: &str,
        data: Bytes,
    ) -> Result<String, StorageError> {
        for name in [container, object_name] {
            if !is_safe_object_name(name) {
                return Err(StorageError::InvalidObjectName(name.to_string()));
            }
        }

        let dir = self.root.join(container);
        tokio::fs::create_dir_all(&dir).await?;

        // Write then rename so readers never observe a partial object and the
        // last concurrent writer wins.
        let seq = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let tmp_path = dir.join(format!(".{object_name}.{}.{seq}.part", std::process::id()));
        let final_path = dir.join(object_name);

        if let Err(e) = tokio::fs::write(&tmp_path, &data).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp_path, &final_path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        tracing::debug!(
            container,
            object_name,
            size_bytes = data.len(),
            path = %final_path.display(),
            "Object written to local storage",
        );

        object_url(&self.public_base_url, &[container, object_name])
    }

    fn provider(&self) -> &'static str {
        "local"
    }
}
