//! Storage module for node uploads
//!
//! Provides the R2 (S3-compatible) client and the `ObjectStore` seam the
//! upload pipeline writes through.

mod object_store;
mod r2_client;

pub use object_store::{ObjectStore, StorageCredentials, StoreConnector};
pub use r2_client::R2Connector;
