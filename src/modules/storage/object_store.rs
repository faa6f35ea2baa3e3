use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use crate::core::error::Result;

/// Connection details for one upload, resolved per invocation
#[derive(Clone, PartialEq, Eq)]
pub struct StorageCredentials {
    pub access_key: String,
    pub secret_key: String,
    /// S3 API endpoint, always with a scheme
    pub endpoint: String,
    pub bucket: String,
    /// Key prefix without leading or trailing slashes (e.g. "assets")
    pub upload_path_prefix: String,
    /// Host (and optional path) serving the bucket publicly, without scheme
    pub public_domain: String,
}

impl StorageCredentials {
    /// Object key for a file name under the upload prefix
    pub fn object_key(&self, file_name: &str) -> String {
        format!("{}/{}", self.upload_path_prefix, file_name)
    }

    /// Public URL of an uploaded object
    pub fn public_url(&self, key: &str) -> String {
        format!("https://{}/{}", self.public_domain, key)
    }
}

impl fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("upload_path_prefix", &self.upload_path_prefix)
            .field("public_domain", &self.public_domain)
            .finish()
    }
}

/// Destination for uploaded files
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload the file at `local_path` to `key`.
    ///
    /// Fails with `AppError::Upload` when the transfer fails or the store
    /// does not confirm it.
    async fn put_file(&self, local_path: &Path, key: &str, content_type: &str) -> Result<()>;
}

/// Opens an [`ObjectStore`] for a set of credentials.
///
/// Opening must not touch the network so credential problems surface
/// before any transfer starts.
pub trait StoreConnector: Send + Sync {
    fn connect(&self, credentials: &StorageCredentials) -> Result<Box<dyn ObjectStore>>;
}
