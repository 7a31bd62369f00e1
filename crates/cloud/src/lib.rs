//! Object storage for uploaded place photos.
//!
//! [`ObjectStore`] accepts a named payload for a named container and returns
//! an absolute URL for it. Two providers implement it: S3-compatible storage
//! ([`s3::S3ObjectStore`]) and the local filesystem
//! ([`local::LocalObjectStore`]). Writing an existing name overwrites it.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

pub mod config;
pub mod local;
pub mod s3;

pub use config::{LocalStorageConfig, S3StorageConfig, StorageConfig};
pub use local::LocalObjectStore;
pub use s3::S3ObjectStore;

/// Errors raised by object store providers.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object name: '{0}'")]
    InvalidObjectName(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Invalid storage URL: {0}")]
    InvalidUrl(String),

    #[error("Storage configuration error: {0}")]
    Config(String),
}

/// A blob store with named containers and public URLs.
///
/// Implementations must be safe to call from many requests at once.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` as `object_name` inside `container` and return the
    /// absolute URL the object can be fetched from.
    async fn upload(
        &self,
        container: &str,
        object_name: &str,
        data: Bytes,
    ) -> Result<String, StorageError>;

    /// Short provider name for logs and health output.
    fn provider(&self) -> &'static str;
}

/// Build the configured provider.
pub async fn build_object_store(
    config: &StorageConfig,
) -> Result<Arc<dyn ObjectStore>, StorageError> {
    let store: Arc<dyn ObjectStore> = match config {
        StorageConfig::Local(local) => Arc::new(LocalObjectStore::new(
            local.root.clone(),
            &local.public_base_url,
        )?),
        StorageConfig::S3(s3) => Arc::new(S3ObjectStore::new(s3).await?),
    };

    tracing::info!(provider = store.provider(), "Object store initialized");
    Ok(store)
}

/// Append `segments` to `base`, percent-encoding each one.
pub(crate) fn object_url(base: &Url, segments: &[&str]) -> Result<String, StorageError> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| StorageError::InvalidUrl(format!("'{base}' cannot be a base URL")))?;
        path.pop_if_empty().extend(segments);
    }
    Ok(String::from(url))
}

/// Parse an absolute URL, mapping failures to [`StorageError::InvalidUrl`].
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, StorageError> {
    Url::parse(raw).map_err(|e| StorageError::InvalidUrl(format!("'{raw}': {e}")))
}

/// MIME type from the object name's extension.
pub fn content_type_for(object_name: &str) -> &'static str {
    let ext = object_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpeg" | "jpg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}
