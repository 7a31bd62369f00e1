//! Object store configuration loaded from environment variables.

use std::path::PathBuf;

use crate::StorageError;

/// Which provider to use and how to reach it.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    Local(LocalStorageConfig),
    S3(S3StorageConfig),
}

/// Filesystem provider settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalStorageConfig {
    /// Directory containing one sub-directory per container.
    pub root: PathBuf,
    /// Absolute URL under which `root` is served.
    pub public_base_url: String,
}

/// S3-compatible provider settings. Containers map to buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct S3StorageConfig {
    pub region: String,
    /// Custom endpoint (MinIO, LocalStack, ...).
    pub endpoint_url: Option<String>,
    /// Force path-style addressing (required by MinIO).
    pub force_path_style: bool,
    /// Static credentials; the default AWS provider chain is used when unset.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Overrides the base of returned URLs (CDN, public gateway).
    pub public_base_url: Option<String>,
}

impl StorageConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                        |
    /// |------------------------|--------------------------------|
    /// | `STORAGE_BACKEND`      | `local`                        |
    /// | `LOCAL_STORAGE_ROOT`   | `storage`                      |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:3000/blobs`  |
    /// | `S3_REGION`            | `us-east-1`                    |
    /// | `S3_ENDPOINT_URL`      | unset                          |
    /// | `S3_FORCE_PATH_STYLE`  | `false`                        |
    /// | `S3_ACCESS_KEY_ID`     | unset                          |
    /// | `S3_SECRET_ACCESS_KEY` | unset                          |
    /// | `S3_PUBLIC_BASE_URL`   | unset                          |
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let backend = get("STORAGE_BACKEND").unwrap_or_else(|| "local".into());

        match backend.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local(LocalStorageConfig {
                root: PathBuf::from(get("LOCAL_STORAGE_ROOT").unwrap_or_else(|| "storage".into())),
                public_base_url: get("PUBLIC_BASE_URL")
                    .unwrap_or_else(|| "http://localhost:3000/blobs".into()),
            })),
            "s3" => {
                let access_key_id = get("S3_ACCESS_KEY_ID");
                let secret_access_key = get("S3_SECRET_ACCESS_KEY");
                if access_key_id.is_some() != secret_access_key.is_some() {
                    return Err(StorageError::Config(
                        "S3_ACCESS_KEY_ID and S3_SECRET_ACCESS_KEY must be set together".into(),
                    ));
                }

                let force_path_style = match get("S3_FORCE_PATH_STYLE") {
                    None => false,
                    Some(v) => parse_bool(&v).ok_or_else(|| {
                        StorageError::Config(format!(
                            "S3_FORCE_PATH_STYLE must be a boolean, got '{v}'"
                        ))
                    })?,
                };

                Ok(Self::S3(S3StorageConfig {
                    region: get("S3_REGION").unwrap_or_else(|| "us-east-1".into()),
                    endpoint_url: get("S3_ENDPOINT_URL"),
                    force_path_style,
                    access_key_id,
                    secret_access_key,
                    public_base_url: get("S3_PUBLIC_BASE_URL"),
                }))
            }
            other => Err(StorageError::Config(format!(
                "Unknown STORAGE_BACKEND '{other}'. Must be one of: local, s3"
            ))),
        }
    }

    /// Directory to serve over HTTP, for providers that need it.
    pub fn served_root(&self) -> Option<&PathBuf> {
        match self {
            Self::Local(local) => Some(&local.root),
            Self::S3(_) => None,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
