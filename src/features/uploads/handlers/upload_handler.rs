use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::ValidateUrl;

use crate::core::error::AppError;
use crate::features::uploads::dtos::{ExecuteNodeDto, NodeDefinitionDto, UploadResultDto};
use crate::features::uploads::models::{CredentialInputs, ImageInput, NodeInputs, UploadMetadata};
use crate::features::uploads::services::{describe_node, UploadNode};
use crate::shared::constants::MAX_IMAGE_SIZE;
use crate::shared::types::ApiResponse;

/// Describe the node
///
/// Returns the input sockets, their environment defaults and the output
/// names, so the host editor can render the node.
#[utoipa::path(
    get,
    path = "/api/node",
    tag = "node",
    responses(
        (status = 200, description = "Node descriptor", body = ApiResponse<NodeDefinitionDto>)
    )
)]
pub async fn get_node_definition(
    State(node): State<Arc<UploadNode>>,
) -> Json<ApiResponse<NodeDefinitionDto>> {
    Json(ApiResponse::success(Some(describe_node(node.env())), None))
}

/// Execute the node
///
/// Accepts multipart/form-data with:
/// - `image`: the generated image (required); RGB or RGBA, grayscale is
///   rejected and 16-bit samples are reduced to 8 bits
/// - `prompt`, `negative_prompt`, `model`: metadata stored next to the image
/// - `webhook_url`: optional Slack webhook notified after upload
/// - `access_key`, `secret_key`, `upload_path`, `endpoint`, `bucket`, `domain`:
///   bucket settings, each falling back to its environment variable
#[utoipa::path(
    post,
    path = "/api/node/execute",
    tag = "node",
    request_body(
        content = ExecuteNodeDto,
        content_type = "multipart/form-data",
        description = "Image plus metadata and bucket settings",
    ),
    responses(
        (status = 200, description = "Image and metadata uploaded", body = ApiResponse<UploadResultDto>),
        (status = 400, description = "Invalid image or missing credentials"),
        (status = 413, description = "Image too large"),
        (status = 502, description = "Bucket rejected the upload")
    )
)]
pub async fn execute_node(
    State(node): State<Arc<UploadNode>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResultDto>>, AppError> {
    let inputs = read_inputs(multipart).await?;

    let result = node.execute(inputs).await?;

    Ok(Json(ApiResponse::success(
        Some(UploadResultDto::from(result)),
        Some("Image uploaded successfully".to_string()),
    )))
}

async fn read_inputs(mut multipart: Multipart) -> Result<NodeInputs, AppError> {
    let mut image: Option<ImageInput> = None;
    let mut metadata = UploadMetadata {
        prompt: String::new(),
        negative_prompt: String::new(),
        model: String::new(),
    };
    let mut webhook_url: Option<String> = None;
    let mut credentials = CredentialInputs::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("multipart data", e))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "image" {
            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error("image data", e))?;

            if data.len() > MAX_IMAGE_SIZE {
                return Err(AppError::PayloadTooLarge(format!(
                    "Image too large. Maximum size is {} bytes ({} MB)",
                    MAX_IMAGE_SIZE,
                    MAX_IMAGE_SIZE / 1024 / 1024
                )));
            }

            let decoded = ImageInput::decode(&data)?;
            debug!("Decoded image with shape {:?}", decoded.shape());
            image = Some(decoded);
            continue;
        }

        let target = match field_name.as_str() {
            "prompt" => &mut metadata.prompt,
            "negative_prompt" => &mut metadata.negative_prompt,
            "model" => &mut metadata.model,
            "access_key" => &mut credentials.access_key,
            "secret_key" => &mut credentials.secret_key,
            "upload_path" => &mut credentials.upload_path,
            "endpoint" => &mut credentials.endpoint,
            "bucket" => &mut credentials.bucket,
            "domain" => &mut credentials.domain,
            "webhook_url" => webhook_url.get_or_insert_with(String::new),
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
                continue;
            }
        };

        *target = field
            .text()
            .await
            .map_err(|e| multipart_error(&field_name, e))?;
    }

    let image = image.ok_or_else(|| AppError::BadRequest("Image is required".to_string()))?;

    if let Some(url) = webhook_url.as_deref().map(str::trim) {
        if !url.is_empty() && !url.validate_url() {
            return Err(AppError::BadRequest(format!(
                "webhook_url '{}' is not a valid URL",
                url
            )));
        }
    }

    Ok(NodeInputs {
        image,
        metadata,
        webhook_url,
        credentials,
    })
}

/// Body limit hits surface as multipart errors carrying 413
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    debug!("Failed to read {}: {}", context, e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Request body too large: {}", e.body_text()))
    } else {
        AppError::BadRequest(format!("Failed to read {}: {}", context, e.body_text()))
    }
}
