mod credentials;
mod node_definition;
mod scratch;
mod upload_service;

pub use credentials::process_env;
pub use node_definition::describe_node;
pub use upload_service::UploadNode;
