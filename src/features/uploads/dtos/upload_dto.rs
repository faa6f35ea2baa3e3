use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::uploads::models::UploadResult;

/// Execute node request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ExecuteNodeDto {
    /// Generated image (PNG, JPEG or WebP), at least 32x32, RGB or RGBA
    #[schema(format = Binary, content_media_type = "image/png")]
    pub image: String,
    /// Positive prompt used to generate the image
    #[schema(example = "a cat")]
    pub prompt: Option<String>,
    /// Negative prompt used to generate the image
    pub negative_prompt: Option<String>,
    /// Model name
    #[schema(example = "sdxl")]
    pub model: Option<String>,
    /// Slack incoming webhook (falls back to SLACK_WEBHOOK_URL, empty disables)
    pub webhook_url: Option<String>,
    /// Falls back to R2_ACCESS_KEY_ID
    pub access_key: Option<String>,
    /// Falls back to R2_SECRET_ACCESS_KEY
    pub secret_key: Option<String>,
    /// Key prefix, falls back to R2_UPLOAD_PATH then "assets"
    #[schema(example = "assets")]
    pub upload_path: Option<String>,
    /// Falls back to R2_ENDPOINT
    pub endpoint: Option<String>,
    /// Falls back to R2_BUCKET_NAME
    pub bucket: Option<String>,
    /// Public domain serving the bucket, falls back to R2_DOMAIN
    #[schema(example = "cdn.example.com")]
    pub domain: Option<String>,
}

/// Response DTO for a successful node execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadResultDto {
    /// Public URL of the uploaded PNG
    #[schema(example = "https://cdn.example.com/assets/3a7bd3e2360a3d29eea436fcfb7e44c735d117c42d1c1835420b6b9942dd4f1b.png")]
    pub image_url: String,
    /// Public URL of the uploaded prompt metadata JSON
    #[schema(example = "https://cdn.example.com/assets/3a7bd3e2360a3d29eea436fcfb7e44c735d117c42d1c1835420b6b9942dd4f1b.json")]
    pub metadata_url: String,
}

impl From<UploadResult> for UploadResultDto {
    fn from(result: UploadResult) -> Self {
        Self {
            image_url: result.image_url,
            metadata_url: result.metadata_url,
        }
    }
}

/// Socket type of a node input, as understood by the host editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeInputKind {
    Image,
    String,
}

/// One input socket of the node
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NodeInputDto {
    pub name: String,
    pub kind: NodeInputKind,
    pub multiline: bool,
    /// Secret inputs never expose their environment default
    pub secret: bool,
    /// Environment variable consulted when the input is empty
    pub env_var: Option<String>,
    /// Value pre-filled by the host editor
    pub default: Option<String>,
}

/// Node descriptor the host editor uses to render and wire the node
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NodeDefinitionDto {
    pub name: String,
    pub display_name: String,
    pub category: String,
    pub inputs: Vec<NodeInputDto>,
    pub return_names: Vec<String>,
}
