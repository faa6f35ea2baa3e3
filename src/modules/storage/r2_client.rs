//! Cloudflare R2 (S3-compatible) storage client
//!
//! Uploads scratch files to a bucket with path-style addressing.
//! Uses rust-s3 for signing and transfer.

use std::path::Path;

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, info};

use super::object_store::{ObjectStore, StorageCredentials, StoreConnector};
use crate::core::error::{AppError, Result};
use crate::shared::constants::R2_REGION;

/// R2 storage client bound to one bucket
pub struct R2Client {
    bucket: Box<Bucket>,
}

impl R2Client {
    /// Create a client for the bucket named in `credentials`.
    ///
    /// Builds the signer only; no request is sent.
    pub fn new(credentials: &StorageCredentials) -> Result<Self> {
        let creds = Credentials::new(
            Some(&credentials.access_key),
            Some(&credentials.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Configuration(format!("Invalid R2 credentials: {}", e)))?;

        let region = Region::Custom {
            region: R2_REGION.to_string(),
            endpoint: credentials.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&credentials.bucket, region, creds).map_err(|e| {
            AppError::Configuration(format!(
                "Failed to open R2 bucket '{}': {}",
                credentials.bucket, e
            ))
        })?;

        // Path-style URLs (https://endpoint/bucket/key) work for every
        // S3-compatible endpoint, including ones without wildcard DNS
        bucket.set_path_style();

        debug!(
            "R2 client ready for endpoint: {}, bucket: {}",
            credentials.endpoint,
            bucket.name()
        );

        Ok(Self { bucket })
    }

    /// Get the bucket name
    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }
}

#[async_trait]
impl ObjectStore for R2Client {
    async fn put_file(&self, local_path: &Path, key: &str, content_type: &str) -> Result<()> {
        let data = tokio::fs::read(local_path).await.map_err(|e| {
            AppError::Upload(format!(
                "Failed to read '{}' for upload: {}",
                local_path.display(),
                e
            ))
        })?;

        let response = self
            .bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to upload '{}': {}", key, e)))?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(AppError::Upload(format!(
                "Upload of '{}' to bucket '{}' was not confirmed (status {})",
                key,
                self.bucket_name(),
                status
            )));
        }

        info!(
            "Uploaded '{}' ({} bytes) to bucket '{}'",
            key,
            data.len(),
            self.bucket_name()
        );
        Ok(())
    }
}

/// Opens an [`R2Client`] per invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct R2Connector;

impl StoreConnector for R2Connector {
    fn connect(&self, credentials: &StorageCredentials) -> Result<Box<dyn ObjectStore>> {
        Ok(Box::new(R2Client::new(credentials)?))
    }
}
