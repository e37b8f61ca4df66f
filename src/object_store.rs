use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Builder as S3ConfigBuilder, Credentials};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::config::S3Config;

/// Errors from the storage backend, one variant per operation kind.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to store object: {0}")]
    Put(String),

    #[error("failed to list objects: {0}")]
    List(String),

    #[error("failed to presign object: {0}")]
    Presign(String),

    #[error("failed to remove object: {0}")]
    Remove(String),
}

/// A time-limited signed read URL for a stored object.
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    pub key: String,
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// The object-storage capability the gateway consumes.
///
/// Exactly four operations are used: put, list, presign-get, remove. The
/// production implementation wraps `aws-sdk-s3`; tests substitute an
/// in-memory implementation. Implementations must be safe for concurrent
/// use from multiple request handlers.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store a fully-buffered payload under `key` with the given
    /// content-type as object metadata.
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Enumerate every key currently in the bucket, in backend order.
    async fn list_keys(&self) -> Result<Vec<String>, StoreError>;

    /// Generate a read-capable signed URL for `key`, valid for `expiry`.
    async fn presign_get(&self, key: &str, expiry: Duration) -> Result<PresignedUrl, StoreError>;

    /// Remove `key` from the bucket. Removing a key that does not exist is
    /// not an error.
    async fn remove_object(&self, key: &str) -> Result<(), StoreError>;
}

/// Production S3-compatible store (AWS S3, MinIO, LocalStack).
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Create a new store from configuration.
    pub async fn new(config: &S3Config) -> anyhow::Result<Self> {
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut s3_config_builder = S3ConfigBuilder::from(&aws_config);

        // Custom endpoint for MinIO/LocalStack
        if let Some(endpoint_url) = config.endpoint_url() {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint_url);
        }

        // Static credentials from configuration, so callers never see them
        if let (Some(access_key), Some(secret_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            s3_config_builder = s3_config_builder.credentials_provider(Credentials::new(
                access_key.clone(),
                secret_key.clone(),
                None,
                None,
                "gateway-config",
            ));
        }

        // Path-style access for MinIO compatibility
        if config.force_path_style {
            s3_config_builder = s3_config_builder.force_path_style(true);
        }

        let client = S3Client::from_conf(s3_config_builder.build());

        info!(
            bucket = %config.bucket,
            region = %config.region,
            "S3 object store initialized"
        );

        Ok(Self {
            client,
            bucket: config.bucket.clone(),
        })
    }

    /// Get the bucket name
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self, data), fields(key = %key, size_bytes = data.len()))]
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StoreError> {
        let size = data.len();
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_length(size as i64)
            .body(ByteStream::from(data));

        if let Some(content_type) = content_type {
            request = request.content_type(content_type);
        }

        request
            .send()
            .await
            .map_err(|e| StoreError::Put(e.to_string()))?;

        debug!(key = %key, size_bytes = size, "Object stored");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| StoreError::List(e.to_string()))?;
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|obj| obj.key().map(String::from)),
            );
        }

        debug!(count = keys.len(), "Listed bucket keys");
        Ok(keys)
    }

    #[instrument(skip(self))]
    async fn presign_get(&self, key: &str, expiry: Duration) -> Result<PresignedUrl, StoreError> {
        let presigning_config = PresigningConfig::expires_in(expiry)
            .map_err(|e| StoreError::Presign(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| StoreError::Presign(e.to_string()))?;

        let expires_at = Utc::now()
            + chrono::Duration::from_std(expiry)
                .map_err(|e| StoreError::Presign(e.to_string()))?;

        Ok(PresignedUrl {
            key: key.to_string(),
            url: presigned.uri().to_string(),
            expires_at,
        })
    }

    #[instrument(skip(self))]
    async fn remove_object(&self, key: &str) -> Result<(), StoreError> {
        // S3 delete-object succeeds for missing keys, so absence is not
        // distinguishable from presence here.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StoreError::Remove(e.to_string()))?;

        debug!(key = %key, "Object removed");
        Ok(())
    }
}
