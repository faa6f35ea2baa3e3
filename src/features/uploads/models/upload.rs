use serde::{Deserialize, Serialize};

use super::ImageInput;

/// Prompt metadata stored next to the image as `{hash}.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadMetadata {
    pub prompt: String,
    pub negative_prompt: String,
    pub model: String,
}

/// Public URLs of the two uploaded objects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub image_url: String,
    pub metadata_url: String,
}

/// Credential inputs as supplied by the host; empty fields fall back to the
/// environment
#[derive(Debug, Clone, Default)]
pub struct CredentialInputs {
    pub access_key: String,
    pub secret_key: String,
    pub upload_path: String,
    pub endpoint: String,
    pub bucket: String,
    pub domain: String,
}

/// Everything one node invocation receives
#[derive(Debug, Clone)]
pub struct NodeInputs {
    pub image: ImageInput,
    pub metadata: UploadMetadata,
    pub webhook_url: Option<String>,
    pub credentials: CredentialInputs,
}
