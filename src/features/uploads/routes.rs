use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::uploads::handlers::{execute_node, get_node_definition};
use crate::features::uploads::services::UploadNode;

/// Create routes for the upload node
pub fn routes(upload_node: Arc<UploadNode>, max_request_body_size: usize) -> Router {
    Router::new()
        .route("/api/node", get(get_node_definition))
        .route(
            "/api/node/execute",
            post(execute_node).layer(DefaultBodyLimit::max(max_request_body_size)),
        )
        .with_state(upload_node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{AppError, Result};
    use crate::features::uploads::dtos::{NodeDefinitionDto, UploadResultDto};
    use crate::modules::notification::SlackWebhookClient;
    use crate::modules::storage::{ObjectStore, StorageCredentials, StoreConnector};
    use crate::shared::types::ApiResponse;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use std::io::Cursor;
    use std::path::Path;

    struct AcceptAll;

    #[async_trait]
    impl ObjectStore for AcceptAll {
        async fn put_file(&self, _local_path: &Path, _key: &str, _content_type: &str) -> Result<()> {
            Ok(())
        }
    }

    struct RejectAll;

    #[async_trait]
    impl ObjectStore for RejectAll {
        async fn put_file(&self, _local_path: &Path, key: &str, _content_type: &str) -> Result<()> {
            Err(AppError::Upload(format!("bucket refused {}", key)))
        }
    }

    struct FixedConnector(bool);

    impl StoreConnector for FixedConnector {
        fn connect(&self, _credentials: &StorageCredentials) -> Result<Box<dyn ObjectStore>> {
            if self.0 {
                Ok(Box::new(AcceptAll))
            } else {
                Ok(Box::new(RejectAll))
            }
        }
    }

    fn server(accept_uploads: bool) -> TestServer {
        server_with_limit(accept_uploads, 8 * 1024 * 1024)
    }

    fn server_with_limit(accept_uploads: bool, max_request_body_size: usize) -> TestServer {
        let node = UploadNode::new(
            Arc::new(FixedConnector(accept_uploads)),
            SlackWebhookClient::new().unwrap(),
            Arc::new(|name: &str| (name == "R2_BUCKET_NAME").then(|| "media".to_string())),
            None,
        );
        TestServer::new(routes(Arc::new(node), max_request_body_size)).unwrap()
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbImage::from_pixel(width, height, image::Rgb([10, 200, 30]));
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    /// Pixels from a linear congruential sequence, so PNG cannot compress them
    fn noisy_png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut state: u32 = 12345;
        let image = image::RgbImage::from_fn(width, height, |_, _| {
            let mut channel = || {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
                (state >> 16) as u8
            };
            image::Rgb([channel(), channel(), channel()])
        });
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    fn form(image: Vec<u8>) -> MultipartForm {
        MultipartForm::new()
            .add_part(
                "image",
                Part::bytes(image)
                    .file_name("render.png")
                    .mime_type("image/png"),
            )
            .add_text("prompt", "a cat")
            .add_text("negative_prompt", "")
            .add_text("model", "sdxl")
            .add_text("access_key", "key")
            .add_text("secret_key", "secret")
            .add_text("endpoint", "https://acct.r2.cloudflarestorage.com")
            .add_text("domain", "cdn.example.com")
    }

    #[tokio::test]
    async fn test_get_node_definition() {
        let response = server(true).get("/api/node").await;

        response.assert_status_ok();
        let body: ApiResponse<NodeDefinitionDto> = response.json();
        let definition = body.data.unwrap();
        assert_eq!(definition.category, "R2 Nodes");
        let bucket = definition.inputs.iter().find(|i| i.name == "bucket").unwrap();
        assert_eq!(bucket.default.as_deref(), Some("media"));
    }

    #[tokio::test]
    async fn test_execute_node_returns_urls() {
        let response = server(true)
            .post("/api/node/execute")
            .multipart(form(png_bytes(64, 64)))
            .await;

        response.assert_status_ok();
        let body: ApiResponse<UploadResultDto> = response.json();
        assert!(body.success);
        let result = body.data.unwrap();
        assert!(result.image_url.starts_with("https://cdn.example.com/assets/"));
        assert!(result.image_url.ends_with(".png"));
        assert_eq!(
            result.image_url.trim_end_matches(".png"),
            result.metadata_url.trim_end_matches(".json")
        );
    }

    #[tokio::test]
    async fn test_execute_node_rejects_small_image() {
        let response = server(true)
            .post("/api/node/execute")
            .multipart(form(png_bytes(16, 16)))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ApiResponse<()> = response.json();
        assert!(!body.success);
    }

    #[tokio::test]
    async fn test_execute_node_requires_image() {
        let form = MultipartForm::new().add_text("prompt", "a cat");
        let response = server(true)
            .post("/api/node/execute")
            .multipart(form)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_execute_node_rejects_bad_webhook_url() {
        let response = server(true)
            .post("/api/node/execute")
            .multipart(form(png_bytes(64, 64)).add_text("webhook_url", "not a url"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_execute_node_body_over_limit_is_payload_too_large() {
        let image = noisy_png_bytes(128, 128);
        assert!(image.len() > 4096);

        let response = server_with_limit(true, 4096)
            .post("/api/node/execute")
            .multipart(form(image))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_execute_node_rejects_grayscale_image() {
        let gray = image::GrayImage::from_pixel(64, 64, image::Luma([90]));
        let mut bytes = Cursor::new(Vec::new());
        gray.write_to(&mut bytes, image::ImageFormat::Png).unwrap();

        let response = server(true)
            .post("/api/node/execute")
            .multipart(form(bytes.into_inner()))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_execute_node_upload_failure_is_bad_gateway() {
        let response = server(false)
            .post("/api/node/execute")
            .multipart(form(png_bytes(64, 64)))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
    }
}
