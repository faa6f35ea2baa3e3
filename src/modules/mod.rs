//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients for the object store and the chat webhook.

pub mod notification;
pub mod storage;
