// =============================================================================
// ENVIRONMENT FALLBACKS
// =============================================================================

/// Access key ID for the R2 bucket
pub const ENV_ACCESS_KEY: &str = "R2_ACCESS_KEY_ID";

/// Secret access key for the R2 bucket
pub const ENV_SECRET_KEY: &str = "R2_SECRET_ACCESS_KEY";

/// Key prefix objects are uploaded under
pub const ENV_UPLOAD_PATH: &str = "R2_UPLOAD_PATH";

/// S3-compatible API endpoint
pub const ENV_ENDPOINT: &str = "R2_ENDPOINT";

/// Target bucket name
pub const ENV_BUCKET: &str = "R2_BUCKET_NAME";

/// Public domain serving the bucket
pub const ENV_DOMAIN: &str = "R2_DOMAIN";

/// Slack incoming webhook
pub const ENV_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";

/// Upload prefix used when neither the input nor the environment sets one
pub const DEFAULT_UPLOAD_PATH: &str = "assets";

/// Region name sent to R2 (R2 ignores it, but SigV4 needs one)
pub const R2_REGION: &str = "auto";

// =============================================================================
// IMAGE CONSTRAINTS
// =============================================================================

/// Minimum accepted height and width in pixels
pub const MIN_IMAGE_DIMENSION: usize = 32;

/// Channel counts the node accepts (RGB, RGBA)
pub const SUPPORTED_CHANNELS: &[usize] = &[3, 4];

/// Maximum encoded image size accepted by the execute endpoint (32MB)
pub const MAX_IMAGE_SIZE: usize = 32 * 1024 * 1024;

// =============================================================================
// OBJECT NAMING
// =============================================================================

pub const IMAGE_EXTENSION: &str = "png";
pub const IMAGE_CONTENT_TYPE: &str = "image/png";
pub const METADATA_EXTENSION: &str = "json";
pub const METADATA_CONTENT_TYPE: &str = "application/json";
