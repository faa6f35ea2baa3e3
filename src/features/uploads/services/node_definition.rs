use super::credentials::EnvLookup;
use crate::features::uploads::dtos::{NodeDefinitionDto, NodeInputDto, NodeInputKind};
use crate::shared::constants::{
    DEFAULT_UPLOAD_PATH, ENV_ACCESS_KEY, ENV_BUCKET, ENV_DOMAIN, ENV_ENDPOINT, ENV_SECRET_KEY,
    ENV_UPLOAD_PATH, ENV_WEBHOOK_URL,
};

pub const NODE_NAME: &str = "R2BucketUploadNode";
pub const NODE_DISPLAY_NAME: &str = "🪣 R2 Storage";
pub const NODE_CATEGORY: &str = "R2 Nodes";

struct InputSpec {
    name: &'static str,
    kind: NodeInputKind,
    multiline: bool,
    secret: bool,
    env_var: Option<&'static str>,
    fallback: Option<&'static str>,
}

const fn text(name: &'static str, multiline: bool) -> InputSpec {
    InputSpec {
        name,
        kind: NodeInputKind::String,
        multiline,
        secret: false,
        env_var: None,
        fallback: None,
    }
}

const fn from_env(name: &'static str, env_var: &'static str, secret: bool) -> InputSpec {
    InputSpec {
        name,
        kind: NodeInputKind::String,
        multiline: false,
        secret,
        env_var: Some(env_var),
        fallback: None,
    }
}

const INPUTS: &[InputSpec] = &[
    InputSpec {
        name: "image",
        kind: NodeInputKind::Image,
        multiline: false,
        secret: false,
        env_var: None,
        fallback: None,
    },
    text("prompt", true),
    text("negative_prompt", true),
    text("model", false),
    from_env("webhook_url", ENV_WEBHOOK_URL, true),
    from_env("access_key", ENV_ACCESS_KEY, true),
    from_env("secret_key", ENV_SECRET_KEY, true),
    InputSpec {
        fallback: Some(DEFAULT_UPLOAD_PATH),
        ..from_env("upload_path", ENV_UPLOAD_PATH, false)
    },
    from_env("endpoint", ENV_ENDPOINT, false),
    from_env("bucket", ENV_BUCKET, false),
    from_env("domain", ENV_DOMAIN, false),
];

/// Describe the node's sockets with defaults from the current environment
pub fn describe_node(env: &EnvLookup) -> NodeDefinitionDto {
    let inputs = INPUTS
        .iter()
        .map(|spec| {
            let default = if spec.secret {
                None
            } else {
                spec.env_var
                    .and_then(|var| env(var))
                    .filter(|value| !value.is_empty())
                    .or_else(|| spec.fallback.map(str::to_string))
            };

            NodeInputDto {
                name: spec.name.to_string(),
                kind: spec.kind,
                multiline: spec.multiline,
                secret: spec.secret,
                env_var: spec.env_var.map(str::to_string),
                default,
            }
        })
        .collect();

    NodeDefinitionDto {
        name: NODE_NAME.to_string(),
        display_name: NODE_DISPLAY_NAME.to_string(),
        category: NODE_CATEGORY.to_string(),
        inputs,
        return_names: vec!["Image URL".to_string(), "Prompt URL".to_string()],
    }
}
