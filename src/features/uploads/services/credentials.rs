use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::uploads::models::CredentialInputs;
use crate::modules::storage::StorageCredentials;
use crate::shared::constants::{
    DEFAULT_UPLOAD_PATH, ENV_ACCESS_KEY, ENV_BUCKET, ENV_DOMAIN, ENV_ENDPOINT, ENV_SECRET_KEY,
    ENV_UPLOAD_PATH, ENV_WEBHOOK_URL,
};

/// Environment variable lookup, swappable in tests
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Lookup backed by the process environment
pub fn process_env() -> EnvLookup {
    Arc::new(|name: &str| std::env::var(name).ok())
}

/// Explicit input if non-empty, else the environment variable, else empty
fn input_or_env(input: &str, env: &EnvLookup, var: &str) -> String {
    let explicit = input.trim();
    if !explicit.is_empty() {
        return explicit.to_string();
    }

    env(var)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.is_empty() || endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    }
}

fn normalize_domain(domain: &str) -> String {
    domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(domain)
        .trim_end_matches('/')
        .to_string()
}

/// Resolve bucket credentials for one invocation.
///
/// Fails with `AppError::Configuration` listing every field that is still
/// empty after the environment fallback.
pub fn resolve_credentials(
    inputs: &CredentialInputs,
    env: &EnvLookup,
) -> Result<StorageCredentials> {
    let access_key = input_or_env(&inputs.access_key, env, ENV_ACCESS_KEY);
    let secret_key = input_or_env(&inputs.secret_key, env, ENV_SECRET_KEY);
    let endpoint = normalize_endpoint(&input_or_env(&inputs.endpoint, env, ENV_ENDPOINT));
    let bucket = input_or_env(&inputs.bucket, env, ENV_BUCKET);
    let public_domain = normalize_domain(&input_or_env(&inputs.domain, env, ENV_DOMAIN));

    let mut upload_path = input_or_env(&inputs.upload_path, env, ENV_UPLOAD_PATH);
    if upload_path.is_empty() {
        upload_path = DEFAULT_UPLOAD_PATH.to_string();
    }
    let upload_path_prefix = upload_path.trim_matches('/').to_string();

    let missing: Vec<String> = [
        ("access_key", ENV_ACCESS_KEY, &access_key),
        ("secret_key", ENV_SECRET_KEY, &secret_key),
        ("endpoint", ENV_ENDPOINT, &endpoint),
        ("bucket", ENV_BUCKET, &bucket),
        ("domain", ENV_DOMAIN, &public_domain),
        ("upload_path", ENV_UPLOAD_PATH, &upload_path_prefix),
    ]
    .into_iter()
    .filter(|(_, _, value)| value.is_empty())
    .map(|(field, var, _)| format!("{} ({})", field, var))
    .collect();

    if !missing.is_empty() {
        return Err(AppError::Configuration(format!(
            "Missing required R2 credentials in inputs or environment variables: {}",
            missing.join(", ")
        )));
    }

    Ok(StorageCredentials {
        access_key,
        secret_key,
        endpoint,
        bucket,
        upload_path_prefix,
        public_domain,
    })
}

/// Webhook URL from the input, falling back to `SLACK_WEBHOOK_URL`.
/// `None` disables the notification.
pub fn resolve_webhook_url(input: Option<&str>, env: &EnvLookup) -> Option<String> {
    let url = input_or_env(input.unwrap_or_default(), env, ENV_WEBHOOK_URL);
    (!url.is_empty()).then_some(url)
}
