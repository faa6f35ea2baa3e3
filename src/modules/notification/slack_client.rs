//! Slack incoming-webhook client
//!
//! Posts a Block Kit message announcing a finished upload.

use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::core::error::{AppError, Result};

/// Fields rendered into the Slack message
#[derive(Debug, Clone, Copy)]
pub struct UploadAnnouncement<'a> {
    pub image_url: &'a str,
    pub metadata_url: &'a str,
    pub model: &'a str,
    pub prompt: &'a str,
    pub negative_prompt: &'a str,
}

pub struct SlackWebhookClient {
    http_client: Client,
}

impl SlackWebhookClient {
    pub fn new() -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("r2-upload-node/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    /// Build the blocks payload: image preview, text summary, link buttons
    pub fn format_message(announcement: &UploadAnnouncement<'_>) -> Value {
        json!({
            "blocks": [
                {
                    "type": "image",
                    "image_url": announcement.image_url,
                    "alt_text": "Generated Image"
                },
                {
                    "type": "section",
                    "text": {
                        "type": "mrkdwn",
                        "text": format!(
                            "*🧠 Model:* {}\n*📄 Prompt:* {}\n*🚫 Negative Prompt:* {}",
                            announcement.model, announcement.prompt, announcement.negative_prompt
                        )
                    }
                },
                {
                    "type": "actions",
                    "elements": [
                        {
                            "type": "button",
                            "text": {
                                "type": "plain_text",
                                "text": "📷 Photo Link",
                                "emoji": true
                            },
                            "url": announcement.image_url
                        },
                        {
                            "type": "button",
                            "text": {
                                "type": "plain_text",
                                "text": "📝 Prompt JSON",
                                "emoji": true
                            },
                            "url": announcement.metadata_url
                        }
                    ]
                }
            ]
        })
    }

    /// POST a payload to the webhook. Non-2xx responses are errors.
    pub async fn send(&self, webhook_url: &str, payload: &Value) -> Result<()> {
        let response = self
            .http_client
            .post(webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Notification(format!("Failed to reach webhook: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Notification(format!(
                "Webhook rejected message: {} - {}",
                status, body
            )));
        }

        debug!("Webhook accepted message with status {}", status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn announcement() -> UploadAnnouncement<'static> {
        UploadAnnouncement {
            image_url: "https://cdn.example.com/assets/abc.png",
            metadata_url: "https://cdn.example.com/assets/abc.json",
            model: "sdxl",
            prompt: "a cat",
            negative_prompt: "blurry",
        }
    }

    #[test]
    fn test_format_message_layout() {
        let payload = SlackWebhookClient::format_message(&announcement());
        let blocks = payload["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 3);

        assert_eq!(blocks[0]["type"], "image");
        assert_eq!(blocks[0]["image_url"], "https://cdn.example.com/assets/abc.png");
        assert_eq!(blocks[0]["alt_text"], "Generated Image");

        assert_eq!(blocks[1]["type"], "section");
        assert_eq!(blocks[1]["text"]["type"], "mrkdwn");
        assert_eq!(
            blocks[1]["text"]["text"],
            "*🧠 Model:* sdxl\n*📄 Prompt:* a cat\n*🚫 Negative Prompt:* blurry"
        );

        let buttons = blocks[2]["elements"].as_array().unwrap();
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0]["url"], "https://cdn.example.com/assets/abc.png");
        assert_eq!(buttons[1]["url"], "https://cdn.example.com/assets/abc.json");
        assert_eq!(buttons[1]["text"]["emoji"], true);
    }

    #[tokio::test]
    async fn test_send_posts_payload() {
        let mock_server = MockServer::start().await;
        let payload = SlackWebhookClient::format_message(&announcement());

        Mock::given(method("POST"))
            .and(path("/services/T000/B000/XXX"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SlackWebhookClient::new().unwrap();
        let url = format!("{}/services/T000/B000/XXX", mock_server.uri());
        client.send(&url, &payload).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_rejected() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no_service"))
            .mount(&mock_server)
            .await;

        let client = SlackWebhookClient::new().unwrap();
        let result = client
            .send(&mock_server.uri(), &json!({ "blocks": [] }))
            .await;

        match result {
            Err(AppError::Notification(msg)) => assert!(msg.contains("no_service")),
            other => panic!("expected notification error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_unreachable() {
        let client = SlackWebhookClient::new().unwrap();
        let result = client
            .send("http://127.0.0.1:9/hook", &json!({ "blocks": [] }))
            .await;
        assert!(matches!(result, Err(AppError::Notification(_))));
    }
}
