//! Chat notifications sent after a successful upload

mod slack_client;

pub use slack_client::{SlackWebhookClient, UploadAnnouncement};
