mod image_input;
mod upload;

pub use image_input::ImageInput;
pub use upload::{CredentialInputs, NodeInputs, UploadMetadata, UploadResult};
