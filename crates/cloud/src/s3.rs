//! S3-compatible object store. Containers are buckets.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Builder as S3ConfigBuilder;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use url::Url;

use crate::config::S3StorageConfig;
use crate::{content_type_for, object_url, parse_base_url, ObjectStore, StorageError};

/// How returned object URLs are built.
#[derive(Debug, Clone, PartialEq)]
enum UrlStyle {
    /// `{base}/{bucket}/{key}`, for custom endpoints and public gateways.
    PathStyle(Url),
    /// `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
    VirtualHosted { region: String },
}

/// Uploads objects with `PutObject`.
pub struct S3ObjectStore {
    client: S3Client,
    url_style: UrlStyle,
}

impl S3ObjectStore {
    pub async fn new(config: &S3StorageConfig) -> Result<Self, StorageError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let (Some(key), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key.clone(),
                secret.clone(),
                None,
                None,
                "places-config",
            ));
        }

        let aws_config = loader.load().await;
        let mut builder = S3ConfigBuilder::from(&aws_config);

        if let Some(ref endpoint_url) = config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }
        if config.force_path_style {
            builder = builder.force_path_style(true);
        }

        let client = S3Client::from_conf(builder.build());
        let url_style = url_style(config)?;

        tracing::info!(
            region = %config.region,
            endpoint = config.endpoint_url.as_deref().unwrap_or("aws"),
            "S3 object store initialized",
        );

        Ok(Self { client, url_style })
    }

    fn public_url(&self, bucket: &str, key: &str) -> Result<String, StorageError> {
        match &self.url_style {
            UrlStyle::PathStyle(base) => object_url(base, &[bucket, key]),
            UrlStyle::VirtualHosted { region } => virtual_hosted_url(bucket, region, key),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(
        &self,
        container: &str,
        object_name: &str,
        data: Bytes,
    ) -> Result<String, StorageError> {
        if container.is_empty() || object_name.is_empty() {
            return Err(StorageError::InvalidObjectName(format!(
                "{container}/{object_name}"
            )));
        }

        let size_bytes = data.len();

        self.client
            .put_object()
            .bucket(container)
            .key(object_name)
            .content_type(content_type_for(object_name))
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StorageError::Upload(DisplayErrorContext(e).to_string()))?;

        tracing::debug!(bucket = container, key = object_name, size_bytes, "Object uploaded to S3");

        self.public_url(container, object_name)
    }

    fn provider(&self) -> &'static str {
        "s3"
    }
}

/// Pick the URL style: explicit public base, then custom endpoint, then AWS.
fn url_style(config: &S3StorageConfig) -> Result<UrlStyle, StorageError> {
    if let Some(base) = config.public_base_url.as_deref().or(config.endpoint_url.as_deref()) {
        return Ok(UrlStyle::PathStyle(parse_base_url(base)?));
    }
    Ok(UrlStyle::VirtualHosted {
        region: config.region.clone(),
    })
}

fn virtual_hosted_url(bucket: &str, region: &str, key: &str) -> Result<String, StorageError> {
    let base = parse_base_url(&format!("https://{bucket}.s3.{region}.amazonaws.com/"))?;
    object_url(&base, &[key])
}
