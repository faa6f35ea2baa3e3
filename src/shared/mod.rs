pub mod constants;
pub mod content_hash;
pub mod types;
