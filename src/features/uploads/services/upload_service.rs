use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::credentials::{resolve_credentials, resolve_webhook_url, EnvLookup};
use super::scratch::ScratchDir;
use crate::core::error::{AppError, Result};
use crate::features::uploads::models::{ImageInput, NodeInputs, UploadMetadata, UploadResult};
use crate::modules::notification::{SlackWebhookClient, UploadAnnouncement};
use crate::modules::storage::{ObjectStore, StorageCredentials, StoreConnector};
use crate::shared::constants::{
    IMAGE_CONTENT_TYPE, IMAGE_EXTENSION, METADATA_CONTENT_TYPE, METADATA_EXTENSION,
};
use crate::shared::content_hash::hash_file;

/// Pipeline node that uploads a generated image and its prompt metadata
pub struct UploadNode {
    connector: Arc<dyn StoreConnector>,
    notifier: SlackWebhookClient,
    env: EnvLookup,
    scratch_root: Option<PathBuf>,
}

impl UploadNode {
    pub fn new(
        connector: Arc<dyn StoreConnector>,
        notifier: SlackWebhookClient,
        env: EnvLookup,
        scratch_root: Option<PathBuf>,
    ) -> Self {
        Self {
            connector,
            notifier,
            env,
            scratch_root,
        }
    }

    pub(crate) fn env(&self) -> &EnvLookup {
        &self.env
    }

    /// Run one invocation: validate, upload image and metadata, notify.
    ///
    /// Scratch files are removed before this returns, on success and on
    /// every error path. A failed notification does not fail the call.
    pub async fn execute(&self, inputs: NodeInputs) -> Result<UploadResult> {
        let NodeInputs {
            image,
            metadata,
            webhook_url,
            credentials,
        } = inputs;

        image.validate().inspect_err(|e| {
            error!("Rejected image input: {}", e);
        })?;

        let credentials = resolve_credentials(&credentials, &self.env).inspect_err(|e| {
            error!("Cannot upload: {}", e);
        })?;
        let webhook_url = resolve_webhook_url(webhook_url.as_deref(), &self.env);

        let store = self.connector.connect(&credentials)?;
        let scratch = ScratchDir::create(self.scratch_root.as_deref())?;

        let outcome = self
            .persist_and_upload(&scratch, store.as_ref(), image, &metadata, &credentials)
            .await;

        if let (Ok(result), Some(webhook_url)) = (&outcome, webhook_url.as_deref()) {
            self.notify(webhook_url, result, &metadata).await;
        }

        scratch.remove().await;

        outcome.inspect_err(|e| {
            error!("Upload to bucket '{}' failed: {}", credentials.bucket, e);
        })
    }

    /// Write the image and metadata to scratch files named by the image's
    /// content hash, upload both, and build their public URLs
    pub async fn persist_and_upload(
        &self,
        scratch: &ScratchDir,
        store: &dyn ObjectStore,
        image: ImageInput,
        metadata: &UploadMetadata,
        credentials: &StorageCredentials,
    ) -> Result<UploadResult> {
        let image_path = scratch.file(&format!("image.{}", IMAGE_EXTENSION));
        let png_path = image_path.clone();
        tokio::task::spawn_blocking(move || image.write_png(&png_path))
            .await
            .map_err(|e| AppError::Internal(format!("PNG encoding task failed: {}", e)))??;
        debug!("Saved temporary image {}", image_path.display());

        let hash = hash_file(&image_path).await?;
        info!("Generated file hash: {}", hash);

        let metadata_name = format!("{}.{}", hash, METADATA_EXTENSION);
        let metadata_path = scratch.file(&metadata_name);
        let body = serde_json::to_vec(metadata)
            .map_err(|e| AppError::Internal(format!("Failed to serialize metadata: {}", e)))?;
        tokio::fs::write(&metadata_path, body).await.map_err(|e| {
            AppError::Internal(format!("Failed to save metadata JSON: {}", e))
        })?;

        let metadata_key = credentials.object_key(&metadata_name);
        store
            .put_file(&metadata_path, &metadata_key, METADATA_CONTENT_TYPE)
            .await?;
        let metadata_url = credentials.public_url(&metadata_key);
        info!("Uploaded metadata: {}", metadata_url);

        let image_key = credentials.object_key(&format!("{}.{}", hash, IMAGE_EXTENSION));
        store
            .put_file(&image_path, &image_key, IMAGE_CONTENT_TYPE)
            .await?;
        let image_url = credentials.public_url(&image_key);
        info!("Uploaded image: {}", image_url);

        Ok(UploadResult {
            image_url,
            metadata_url,
        })
    }

    /// Post the upload announcement. Failures are logged, never returned.
    pub async fn notify(
        &self,
        webhook_url: &str,
        result: &UploadResult,
        metadata: &UploadMetadata,
    ) {
        let payload = SlackWebhookClient::format_message(&UploadAnnouncement {
            image_url: &result.image_url,
            metadata_url: &result.metadata_url,
            model: &metadata.model,
            prompt: &metadata.prompt,
            negative_prompt: &metadata.negative_prompt,
        });

        match self.notifier.send(webhook_url, &payload).await {
            Ok(()) => info!("Sent upload notification"),
            Err(e) => warn!("Failed to send upload notification: {}", e),
        }
    }
}
